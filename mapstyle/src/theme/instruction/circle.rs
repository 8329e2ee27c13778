//! Circles at points of interest

use super::BuildContext;
use crate::graphics::{Color, Paint};
use crate::model::{PointOfInterest, Way};
use crate::render::{RenderCallback, RenderContext};
use crate::theme::attributes::attributes;
use crate::theme::{ThemeError, ZoomScaledCache};

/// A filled and outlined circle centred on a POI.
///
/// The radius is fixed unless `scale-radius` is set; the stroke width
/// follows the zoom factor only when the radius does.
#[derive(Debug)]
pub struct Circle {
    name: String,
    category: Option<String>,
    level: usize,
    fill: Paint,
    stroke: Paint,
    radius: f32,
    scale_radius: bool,
    radii: ZoomScaledCache<f32>,
    strokes: ZoomScaledCache<Paint>,
}

impl Circle {
    pub(crate) fn build(
        name: &str,
        properties: &ini::Properties,
        ctx: &BuildContext<'_>,
        level: usize,
    ) -> Result<Self, ThemeError> {
        let scale_factor = ctx.display_model.scale_factor();
        let mut category = None;
        let mut fill = Paint::fill(Color::TRANSPARENT);
        let mut stroke = Paint::stroke(Color::TRANSPARENT);
        let mut radius = None;
        let mut scale_radius = false;

        for attr in attributes(name, properties) {
            match attr.name {
                "cat" => category = Some(attr.string()),
                "fill" => fill.color = attr.color()?,
                "stroke" => stroke.color = attr.color()?,
                "stroke-width" => stroke.stroke_width = attr.non_negative_f32()? * scale_factor,
                "radius" => radius = Some(attr.non_negative_f32()? * scale_factor),
                "scale-radius" => scale_radius = attr.bool()?,
                _ => return Err(attr.unknown()),
            }
        }

        let radius = radius.ok_or_else(|| ThemeError::MissingAttribute {
            element: name.to_string(),
            name: "radius".to_string(),
        })?;

        Ok(Self {
            name: name.to_string(),
            category,
            level,
            fill,
            stroke,
            radius,
            scale_radius,
            radii: ZoomScaledCache::new(),
            strokes: ZoomScaledCache::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn radius_at(&self, zoom: u8) -> f32 {
        *self.radii.get_or(zoom, &self.radius)
    }

    pub fn stroke_at(&self, zoom: u8) -> &Paint {
        self.strokes.get_or(zoom, &self.stroke)
    }

    pub fn render_node(
        &self,
        callback: &mut dyn RenderCallback,
        context: &RenderContext,
        poi: &PointOfInterest,
    ) {
        let zoom = context.zoom();
        callback.render_poi_circle(
            context,
            self.radius_at(zoom),
            &self.fill,
            self.stroke_at(zoom),
            self.level,
            poi,
        );
    }

    pub fn render_way(&self, _callback: &mut dyn RenderCallback, _context: &RenderContext, _way: &Way) {}

    pub fn scale_stroke_width(&self, scale_factor: f32, zoom: u8) {
        if !self.scale_radius {
            return;
        }
        self.radii.insert(zoom, self.radius * scale_factor);
        self.strokes
            .insert(zoom, self.stroke.with_scaled_stroke(scale_factor, false));
    }

    pub fn scale_text_size(&self, _scale_factor: f32, _zoom: u8) {}

    pub fn destroy(&self) {}
}
