//! Text along ways

use super::BuildContext;
use crate::graphics::{Color, FontFamily, FontStyle, Paint};
use crate::model::{PointOfInterest, Way};
use crate::render::{RenderCallback, RenderContext, WayText};
use crate::theme::attributes::attributes;
use crate::theme::text_key::TextKey;
use crate::theme::{Display, Scale, ThemeError, ZoomScaledCache};
use std::sync::Arc;

const REPEAT_GAP_DEFAULT: f32 = 100.0;
const REPEAT_START_DEFAULT: f32 = 10.0;

/// Draws a tag value following the course of a way, e.g. street names.
#[derive(Debug)]
pub struct PathText {
    name: String,
    category: Option<String>,
    level: usize,
    text_key: Arc<TextKey>,
    display: Display,
    priority: i32,
    dy: f32,
    scale: Scale,
    fill: Paint,
    stroke: Paint,
    repeat: bool,
    repeat_gap: f32,
    repeat_start: f32,
    rotate: bool,
    dys: ZoomScaledCache<f32>,
    fills: ZoomScaledCache<Paint>,
    strokes: ZoomScaledCache<Paint>,
}

impl PathText {
    pub(crate) fn build(
        name: &str,
        properties: &ini::Properties,
        ctx: &BuildContext<'_>,
        level: usize,
    ) -> Result<Self, ThemeError> {
        let scale_factor = ctx.display_model.scale_factor();
        let mut category = None;
        let mut text_key = None;
        let mut display = Display::default();
        let mut priority = 0;
        let mut dy = 0.0;
        let mut scale = Scale::default();
        let mut fill = Paint::fill(Color::BLACK);
        let mut stroke = Paint::stroke(Color::BLACK);
        let mut font_family = FontFamily::Default;
        let mut font_style = FontStyle::Normal;
        let mut font_size = 0.0;
        let mut repeat = true;
        let mut repeat_gap = REPEAT_GAP_DEFAULT * scale_factor;
        let mut repeat_start = REPEAT_START_DEFAULT * scale_factor;
        let mut rotate = true;

        for attr in attributes(name, properties) {
            match attr.name {
                "cat" => category = Some(attr.string()),
                "k" => text_key = Some(ctx.text_keys.get_instance(attr.value)),
                "display" => display = attr.keyword()?,
                "priority" => priority = attr.i32()?,
                "dy" => dy = attr.f32()? * scale_factor,
                "fill" => fill.color = attr.color()?,
                "stroke" => stroke.color = attr.color()?,
                "stroke-width" => stroke.stroke_width = attr.non_negative_f32()? * scale_factor,
                "font-family" => font_family = attr.keyword()?,
                "font-style" => font_style = attr.keyword()?,
                "font-size" => font_size = attr.non_negative_f32()? * scale_factor,
                "repeat" => repeat = attr.bool()?,
                "repeat-gap" => repeat_gap = attr.non_negative_f32()? * scale_factor,
                "repeat-start" => repeat_start = attr.non_negative_f32()? * scale_factor,
                "rotate" => rotate = attr.bool()?,
                "scale" => scale = attr.keyword()?,
                _ => return Err(attr.unknown()),
            }
        }

        let text_key = text_key.ok_or_else(|| ThemeError::MissingAttribute {
            element: name.to_string(),
            name: "k".to_string(),
        })?;

        for paint in [&mut fill, &mut stroke] {
            paint.font_family = font_family;
            paint.font_style = font_style;
            paint.text_size = font_size;
        }

        Ok(Self {
            name: name.to_string(),
            category,
            level,
            text_key,
            display,
            priority,
            dy,
            scale,
            fill,
            stroke,
            repeat,
            repeat_gap,
            repeat_start,
            rotate,
            dys: ZoomScaledCache::new(),
            fills: ZoomScaledCache::new(),
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

    pub fn repeat_gap(&self) -> f32 {
        self.repeat_gap
    }

    pub fn repeat_start(&self) -> f32 {
        self.repeat_start
    }

    pub fn fill_at(&self, zoom: u8) -> &Paint {
        self.fills.get_or(zoom, &self.fill)
    }

    pub fn stroke_at(&self, zoom: u8) -> &Paint {
        self.strokes.get_or(zoom, &self.stroke)
    }

    pub fn render_node(
        &self,
        _callback: &mut dyn RenderCallback,
        _context: &RenderContext,
        _poi: &PointOfInterest,
    ) {
    }

    pub fn render_way(&self, callback: &mut dyn RenderCallback, context: &RenderContext, way: &Way) {
        if self.display == Display::Never {
            return;
        }
        let Some(text) = self.text_key.get_value(&way.tags) else {
            return;
        };
        let zoom = context.zoom();
        let way_text = WayText {
            display: self.display,
            priority: self.priority,
            text,
            dy: *self.dys.get_or(zoom, &self.dy),
            fill: self.fill_at(zoom),
            stroke: self.stroke_at(zoom),
            repeat: self.repeat,
            repeat_gap: self.repeat_gap,
            repeat_start: self.repeat_start,
            rotate: self.rotate,
        };
        callback.render_way_text(context, &way_text, way);
    }

    pub fn scale_stroke_width(&self, scale_factor: f32, zoom: u8) {
        self.dys
            .insert(zoom, self.dy * self.scale.effective_factor(scale_factor));
    }

    pub fn scale_text_size(&self, scale_factor: f32, zoom: u8) {
        let factor = self.scale.effective_factor(scale_factor);
        self.fills.insert(zoom, self.fill.with_scaled_text(factor));
        self.strokes.insert(zoom, self.stroke.with_scaled_text(factor));
    }

    pub fn destroy(&self) {}
}
