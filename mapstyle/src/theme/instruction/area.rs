//! Closed polygon fill and outline

use super::BuildContext;
use crate::graphics::{Color, Paint};
use crate::model::{PointOfInterest, Way};
use crate::render::{RenderCallback, RenderContext};
use crate::theme::attributes::{attributes, BitmapAttributes};
use crate::theme::resource::LazyBitmap;
use crate::theme::{Scale, ThemeError, ZoomScaledCache};
use std::borrow::Cow;
use std::sync::Arc;

/// Fills a closed way and optionally outlines it.
///
/// With a `src` the fill is a bitmap pattern anchored to world pixel
/// coordinates, so patterns continue seamlessly across tiles.
#[derive(Debug)]
pub struct Area {
    name: String,
    category: Option<String>,
    level: usize,
    fill: Paint,
    stroke: Paint,
    scale: Scale,
    shader: Option<LazyBitmap>,
    strokes: ZoomScaledCache<Paint>,
}

impl Area {
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
        let mut scale = Scale::default();
        let mut bitmap = BitmapAttributes::default();

        for attr in attributes(name, properties) {
            if bitmap.accept(&attr, scale_factor)? {
                continue;
            }
            match attr.name {
                "cat" => category = Some(attr.string()),
                "fill" => fill.color = attr.color()?,
                "stroke" => stroke.color = attr.color()?,
                "stroke-width" => stroke.stroke_width = attr.non_negative_f32()? * scale_factor,
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
            fill,
            stroke,
            scale,
            shader,
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

    /// Pattern resource, if the area is filled with a bitmap.
    pub fn resource(&self) -> Option<&LazyBitmap> {
        self.shader.as_ref()
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Stroke paint derived for `zoom`, falling back to the base paint.
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
        let fill = match self.shader.as_ref().and_then(LazyBitmap::get) {
            Some(bitmap) => Cow::Owned(self.fill.with_shader(bitmap, way.shader_origin())),
            None => Cow::Borrowed(&self.fill),
        };
        callback.render_area(context, &fill, self.stroke_at(context.zoom()), self.level, way);
    }

    pub fn scale_stroke_width(&self, scale_factor: f32, zoom: u8) {
        let factor = self.scale.effective_factor(scale_factor);
        let paint = self.stroke.with_scaled_stroke(factor, false);
        tracing::trace!(area = %self.name, zoom, width = paint.stroke_width, "Scaled area stroke");
        self.strokes.insert(zoom, paint);
    }

    pub fn scale_text_size(&self, _scale_factor: f32, _zoom: u8) {}

    pub fn destroy(&self) {
        if let Some(shader) = &self.shader {
            shader.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::Style;
    use crate::model::Point;
    use crate::render::{RecordingCallback, RenderCall};
    use crate::test_support::{build_single, square_way, StubFactory};

    fn area(section: &str, factory: StubFactory) -> Area {
        match build_single(section, factory) {
            crate::theme::RenderInstruction::Area(area) => area,
            other => panic!("expected area, got {other:?}"),
        }
    }

    #[test]
    fn test_scale_none_keeps_stroke_width() {
        let area = area(
            "[area]\nfill=#00000000\nstroke=#FF000000\nstroke-width=2\nscale=none\n",
            StubFactory::new(),
        );
        area.scale_stroke_width(1.5f32.powi(-2), 10);
        area.scale_stroke_width(1.5f32.powi(6), 18);
        assert_eq!(area.stroke_at(10).stroke_width, 2.0);
        assert_eq!(area.stroke_at(18).stroke_width, 2.0);
    }

    #[test]
    fn test_scale_stroke_per_zoom_independent() {
        let area = area("[area]\nstroke=#FF000000\nstroke-width=2\n", StubFactory::new());
        area.scale_stroke_width(3.0, 14);
        area.scale_stroke_width(1.0, 12);
        assert_eq!(area.stroke_at(14).stroke_width, 6.0);
        assert_eq!(area.stroke_at(12).stroke_width, 2.0);
        assert_eq!(area.stroke_at(13).stroke_width, 2.0);
    }

    #[test]
    fn test_render_way_emits_area() {
        let area = area("[area]\nfill=#FF00FF00\n", StubFactory::new());
        let mut callback = RecordingCallback::new();
        let way = square_way();
        let context = RenderContext::new(way.upper_left);
        area.render_way(&mut callback, &context, &way);

        match callback.calls() {
            [RenderCall::Area { fill, stroke, .. }] => {
                assert_eq!(fill.color, Color::argb(255, 0, 255, 0));
                assert_eq!(fill.style, Style::Fill);
                assert!(fill.shader.is_none());
                assert!(stroke.color.is_transparent());
            }
            other => panic!("unexpected calls {other:?}"),
        }
    }

    #[test]
    fn test_shader_shift_follows_way_origin() {
        let area = area(
            "[area]\nsrc=pattern.png\n",
            StubFactory::new().with_bitmap("pattern.png", 16, 16),
        );
        let mut callback = RecordingCallback::new();
        let way = square_way();
        let context = RenderContext::new(way.upper_left);
        area.render_way(&mut callback, &context, &way);

        let RenderCall::Area { fill, .. } = &callback.calls()[0] else {
            panic!("expected area");
        };
        let shader = fill.shader.as_ref().unwrap();
        assert_eq!(shader.shift, way.shader_origin());
        assert_ne!(shader.shift, Point::default());
    }

    #[test]
    fn test_missing_pattern_falls_back_to_color() {
        let area = area("[area]\nfill=#FF0000FF\nsrc=missing.png\n", StubFactory::new());
        let mut callback = RecordingCallback::new();
        let way = square_way();
        let context = RenderContext::new(way.upper_left);
        area.render_way(&mut callback, &context, &way);
        area.render_way(&mut callback, &context, &way);

        assert_eq!(callback.len(), 2);
        let RenderCall::Area { fill, .. } = &callback.calls()[1] else {
            panic!("expected area");
        };
        assert!(fill.shader.is_none());
    }

    #[test]
    fn test_render_node_is_noop() {
        let area = area("[area]\nfill=#FF00FF00\n", StubFactory::new());
        let mut callback = RecordingCallback::new();
        let poi = crate::test_support::poi(&[]);
        let context = RenderContext::new(crate::test_support::TEST_TILE);
        area.render_node(&mut callback, &context, &poi);
        assert!(callback.is_empty());
    }
}
