//! Render instruction variants
//!
//! A render instruction owns the style attributes of one theme section and
//! turns a matched feature into drawing primitives. Style attributes are
//! immutable after loading; zoom-dependent paints are derived once per zoom
//! level by [`RenderInstruction::scale_stroke_width`] and
//! [`RenderInstruction::scale_text_size`] during theme preparation and are
//! only read afterwards.
//!
//! # Variants
//!
//! | Element       | POI | Way | Notes                                   |
//! |---------------|-----|-----|-----------------------------------------|
//! | `area`        |     |  ✓  | fill, stroke, optional bitmap pattern   |
//! | `caption`     |  ✓  |  ✓  | label, optionally placed next to a symbol |
//! | `circle`      |  ✓  |     | fixed or zoom-scaled radius             |
//! | `hillshading` |     |     | drawn once per tile, see [`crate::hills`] |
//! | `line`        |     |  ✓  | stroke, dashes, bitmap pattern          |
//! | `line-symbol` |     |  ✓  | icon repeated along the way             |
//! | `path-text`   |     |  ✓  | text following the way                  |
//! | `symbol`      |  ✓  |  ✓  | icon                                    |

mod area;
mod caption;
mod circle;
mod hillshading;
mod line;
mod line_symbol;
mod path_text;
mod symbol;

pub use area::Area;
pub use caption::Caption;
pub use circle::Circle;
pub use hillshading::Hillshading;
pub use line::Line;
pub use line_symbol::LineSymbol;
pub use path_text::PathText;
pub use symbol::Symbol;

use super::resource::LazyBitmap;
use super::TextKeyRegistry;
use crate::display::DisplayModel;
use crate::graphics::GraphicFactory;
use crate::model::{PointOfInterest, Way};
use crate::render::{RenderCallback, RenderContext};
use std::collections::HashMap;
use std::sync::Arc;

/// Shared inputs while building instructions from theme sections.
pub(crate) struct BuildContext<'a> {
    pub factory: &'a Arc<dyn GraphicFactory>,
    pub display_model: &'a DisplayModel,
    pub text_keys: &'a TextKeyRegistry,
    /// Symbols by their `id` attribute.
    pub symbols: &'a HashMap<String, Arc<Symbol>>,
}

/// One instruction of a render theme.
#[derive(Debug)]
pub enum RenderInstruction {
    Area(Area),
    Caption(Caption),
    Circle(Circle),
    Hillshading(Hillshading),
    Line(Line),
    LineSymbol(LineSymbol),
    PathText(PathText),
    Symbol(Arc<Symbol>),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            RenderInstruction::Area($inner) => $body,
            RenderInstruction::Caption($inner) => $body,
            RenderInstruction::Circle($inner) => $body,
            RenderInstruction::Hillshading($inner) => $body,
            RenderInstruction::Line($inner) => $body,
            RenderInstruction::LineSymbol($inner) => $body,
            RenderInstruction::PathText($inner) => $body,
            RenderInstruction::Symbol($inner) => $body,
        }
    };
}

impl RenderInstruction {
    /// Theme section name, e.g. `line.motorway`.
    pub fn name(&self) -> &str {
        dispatch!(self, i => i.name())
    }

    /// Element keyword of the variant.
    pub fn element(&self) -> &'static str {
        match self {
            RenderInstruction::Area(_) => "area",
            RenderInstruction::Caption(_) => "caption",
            RenderInstruction::Circle(_) => "circle",
            RenderInstruction::Hillshading(_) => "hillshading",
            RenderInstruction::Line(_) => "line",
            RenderInstruction::LineSymbol(_) => "line-symbol",
            RenderInstruction::PathText(_) => "path-text",
            RenderInstruction::Symbol(_) => "symbol",
        }
    }

    pub fn category(&self) -> Option<&str> {
        dispatch!(self, i => i.category())
    }

    pub fn level(&self) -> usize {
        dispatch!(self, i => i.level())
    }

    /// Bitmap resources referenced by the instruction.
    pub fn resources(&self) -> Vec<&LazyBitmap> {
        match self {
            RenderInstruction::Area(area) => area.resource().into_iter().collect(),
            RenderInstruction::Line(line) => line.resource().into_iter().collect(),
            RenderInstruction::LineSymbol(symbol) => vec![symbol.resource()],
            RenderInstruction::Symbol(symbol) => vec![symbol.resource()],
            RenderInstruction::Caption(_)
            | RenderInstruction::Circle(_)
            | RenderInstruction::Hillshading(_)
            | RenderInstruction::PathText(_) => Vec::new(),
        }
    }

    pub fn render_node(
        &self,
        callback: &mut dyn RenderCallback,
        context: &RenderContext,
        poi: &PointOfInterest,
    ) {
        dispatch!(self, i => i.render_node(callback, context, poi))
    }

    pub fn render_way(&self, callback: &mut dyn RenderCallback, context: &RenderContext, way: &Way) {
        dispatch!(self, i => i.render_way(callback, context, way))
    }

    /// Derives the stroke-related values for `zoom`.
    pub fn scale_stroke_width(&self, scale_factor: f32, zoom: u8) {
        dispatch!(self, i => i.scale_stroke_width(scale_factor, zoom))
    }

    /// Derives the text-related values for `zoom`.
    pub fn scale_text_size(&self, scale_factor: f32, zoom: u8) {
        dispatch!(self, i => i.scale_text_size(scale_factor, zoom))
    }

    /// Releases resources held by the instruction.
    pub fn destroy(&self) {
        dispatch!(self, i => i.destroy())
    }
}
