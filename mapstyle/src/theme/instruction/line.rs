//! Way strokes

use super::BuildContext;
use crate::graphics::{Color, Paint};
use crate::model::{PointOfInterest, Way};
use crate::render::{RenderCallback, RenderContext};
use crate::theme::attributes::{attributes, BitmapAttributes};
use crate::theme::resource::LazyBitmap;
use crate::theme::{Scale, ThemeError, ZoomScaledCache};
use std::borrow::Cow;
use std::sync::Arc;

/// Strokes a way, optionally dashed, offset or patterned.
#[derive(Debug)]
pub struct Line {
    name: String,
    category: Option<String>,
    level: usize,
    stroke: Paint,
    dy: f32,
    scale: Scale,
    shader: Option<LazyBitmap>,
    strokes: ZoomScaledCache<Paint>,
    dys: ZoomScaledCache<f32>,
}

impl Line {
    pub(crate) fn build(
        name: &str,
        properties: &ini::Properties,
        ctx: &BuildContext<'_>,
        level: usize,
    ) -> Result<Self, ThemeError> {
        let scale_factor = ctx.display_model.scale_factor();
        let mut category = None;
        let mut stroke = Paint::stroke(Color::BLACK);
        let mut dy = 0.0;
        let mut scale = Scale::default();
        let mut bitmap = BitmapAttributes::default();

        for attr in attributes(name, properties) {
            if bitmap.accept(&attr, scale_factor)? {
                continue;
            }
            match attr.name {
                "cat" => category = Some(attr.string()),
                "stroke" => stroke.color = attr.color()?,
                "stroke-width" => stroke.stroke_width = attr.non_negative_f32()? * scale_factor,
                "stroke-dasharray" => stroke.dash = Some(attr.dash_array(scale_factor)?),
                "stroke-linecap" => stroke.cap = attr.keyword()?,
                "stroke-linejoin" => stroke.join = attr.keyword()?,
                "dy" => dy = attr.f32()? * scale_factor,
                "scale" => scale = attr.keyword()?,
                _ => return Err(attr.unknown()),
            }
        }

        let shader = bitmap
            .spec(ctx.display_model)
            .map(|spec| LazyBitmap::new(spec, Arc::clone(ctx.factory)));

        Ok(Self {
            name: name.to_string(),
            category,
            level,
            stroke,
            dy,
            scale,
            shader,
            strokes: ZoomScaledCache::new(),
            dys: ZoomScaledCache::new(),
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

    pub fn resource(&self) -> Option<&LazyBitmap> {
        self.shader.as_ref()
    }

    pub fn stroke_at(&self, zoom: u8) -> &Paint {
        self.strokes.get_or(zoom, &self.stroke)
    }

    pub fn dy_at(&self, zoom: u8) -> f32 {
        *self.dys.get_or(zoom, &self.dy)
    }

    pub fn render_node(
        &self,
        _callback: &mut dyn RenderCallback,
        _context: &RenderContext,
        _poi: &PointOfInterest,
    ) {
    }

    pub fn render_way(&self, callback: &mut dyn RenderCallback, context: &RenderContext, way: &Way) {
        let zoom = context.zoom();
        let stroke = self.stroke_at(zoom);
        let stroke = match self.shader.as_ref().and_then(LazyBitmap::get) {
            Some(bitmap) => Cow::Owned(stroke.with_shader(bitmap, way.shader_origin())),
            None => Cow::Borrowed(stroke),
        };
        callback.render_way(context, &stroke, self.dy_at(zoom), self.level, way);
    }

    pub fn scale_stroke_width(&self, scale_factor: f32, zoom: u8) {
        let factor = self.scale.effective_factor(scale_factor);
        self.strokes
            .insert(zoom, self.stroke.with_scaled_stroke(factor, self.scale.scales_dash()));
        self.dys.insert(zoom, self.dy * factor);
    }

    pub fn scale_text_size(&self, _scale_factor: f32, _zoom: u8) {}

    pub fn destroy(&self) {
        if let Some(shader) = &self.shader {
            shader.release();
        }
    }
}
