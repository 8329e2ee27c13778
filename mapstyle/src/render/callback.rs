//! The tile renderer's drawing sink

use super::{CaptionPlacement, RenderContext, SymbolPlacement, WaySymbol, WayText};
use crate::graphics::Paint;
use crate::hills::HillshadingShape;
use crate::model::{PointOfInterest, Way};

/// Receives the drawing primitives produced by render instructions.
///
/// Instructions never draw directly; the renderer implementing this trait
/// decides how primitives are layered, collision-checked and rasterized.
/// `level` is the drawing level assigned to the instruction at load time.
pub trait RenderCallback {
    fn render_area(
        &mut self,
        context: &RenderContext,
        fill: &Paint,
        stroke: &Paint,
        level: usize,
        way: &Way,
    );

    fn render_area_caption(
        &mut self,
        context: &RenderContext,
        caption: &CaptionPlacement<'_>,
        way: &Way,
    );

    fn render_area_symbol(&mut self, context: &RenderContext, symbol: &SymbolPlacement, way: &Way);

    fn render_poi_caption(
        &mut self,
        context: &RenderContext,
        caption: &CaptionPlacement<'_>,
        poi: &PointOfInterest,
    );

    fn render_poi_circle(
        &mut self,
        context: &RenderContext,
        radius: f32,
        fill: &Paint,
        stroke: &Paint,
        level: usize,
        poi: &PointOfInterest,
    );

    fn render_poi_symbol(
        &mut self,
        context: &RenderContext,
        symbol: &SymbolPlacement,
        poi: &PointOfInterest,
    );

    fn render_way(
        &mut self,
        context: &RenderContext,
        stroke: &Paint,
        dy: f32,
        level: usize,
        way: &Way,
    );

    fn render_way_symbol(&mut self, context: &RenderContext, symbol: &WaySymbol, way: &Way);

    fn render_way_text(&mut self, context: &RenderContext, text: &WayText<'_>, way: &Way);

    /// `layer` is the map layer the shading is drawn in.
    fn render_hillshading(
        &mut self,
        context: &RenderContext,
        layer: i8,
        level: usize,
        shape: &HillshadingShape,
    );
}
