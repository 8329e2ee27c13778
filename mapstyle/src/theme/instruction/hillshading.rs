//! Hillshading layers

use super::BuildContext;
use crate::hills::{compose, HillshadingParams};
use crate::model::{PointOfInterest, Way};
use crate::render::{RenderCallback, RenderContext};
use crate::theme::attributes::attributes;
use crate::theme::ThemeError;

/// Layer the shading is drawn in unless configured.
const DEFAULT_LAYER: i8 = 5;

/// A hillshading overlay, rendered once per tile rather than per feature.
#[derive(Debug)]
pub struct Hillshading {
    name: String,
    category: Option<String>,
    level: usize,
    layer: i8,
    params: HillshadingParams,
}

impl Hillshading {
    pub(crate) fn build(
        name: &str,
        properties: &ini::Properties,
        _ctx: &BuildContext<'_>,
        level: usize,
    ) -> Result<Self, ThemeError> {
        let mut category = None;
        let mut layer = DEFAULT_LAYER;
        let mut params = HillshadingParams::default();

        for attr in attributes(name, properties) {
            match attr.name {
                "cat" => category = Some(attr.string()),
                "min-zoom" => params.min_zoom = attr.u8()?,
                "max-zoom" => {
                    params.max_zoom = attr.u8()?;
                }
                "magnitude" => params.magnitude = attr.u8()?,
                "always" => params.always = attr.bool()?,
                "layer" => {
                    layer = attr
                        .value
                        .parse()
                        .map_err(|_| attr.invalid("expected a layer between -128 and 127"))?;
                }
                _ => return Err(attr.unknown()),
            }
        }

        if params.min_zoom > params.max_zoom {
            return Err(ThemeError::InvalidValue {
                element: name.to_string(),
                name: "max-zoom".to_string(),
                value: params.max_zoom.to_string(),
                reason: format!("must not be below min-zoom {}", params.min_zoom),
            });
        }

        Ok(Self {
            name: name.to_string(),
            category,
            level,
            layer,
            params,
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

    pub fn layer(&self) -> i8 {
        self.layer
    }

    pub fn params(&self) -> &HillshadingParams {
        &self.params
    }

    /// Emits the shading shapes for the context's tile.
    pub fn render_tile(&self, callback: &mut dyn RenderCallback, context: &RenderContext) {
        let shapes = compose(&context.tile, context.hills.as_deref(), &self.params);
        for shape in &shapes {
            callback.render_hillshading(context, self.layer, self.level, shape);
        }
    }

    pub fn render_node(
        &self,
        _callback: &mut dyn RenderCallback,
        _context: &RenderContext,
        _poi: &PointOfInterest,
    ) {
    }

    pub fn render_way(&self, _callback: &mut dyn RenderCallback, _context: &RenderContext, _way: &Way) {}

    pub fn scale_stroke_width(&self, _scale_factor: f32, _zoom: u8) {}

    pub fn scale_text_size(&self, _scale_factor: f32, _zoom: u8) {}

    pub fn destroy(&self) {}
}
