//! Text labels for points of interest and areas

use super::{BuildContext, Symbol};
use crate::graphics::{Color, FontFamily, FontStyle, Paint};
use crate::model::{PointOfInterest, Way};
use crate::render::{CaptionPlacement, RenderCallback, RenderContext};
use crate::theme::attributes::attributes;
use crate::theme::placement::{compute_horizontal_offset, compute_vertical_offset};
use crate::theme::text_key::TextKey;
use crate::theme::{Display, Position, Scale, ThemeError, ZoomScaledCache};
use std::sync::Arc;

/// Gap between a symbol and its caption, before display scaling.
pub const DEFAULT_GAP: f32 = 5.0;

/// A label showing the value of one tag.
///
/// When `symbol-id` names a symbol the caption is placed beside it,
/// otherwise it is centred on the anchor point.
#[derive(Debug)]
pub struct Caption {
    name: String,
    category: Option<String>,
    level: usize,
    text_key: Arc<TextKey>,
    display: Display,
    priority: i32,
    dy: f32,
    gap: f32,
    position: Position,
    scale: Scale,
    fill: Paint,
    stroke: Paint,
    max_text_width: f32,
    symbol: Option<Arc<Symbol>>,
    dys: ZoomScaledCache<f32>,
    fills: ZoomScaledCache<Paint>,
    strokes: ZoomScaledCache<Paint>,
}

impl Caption {
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
        let mut position = None;
        let mut scale = Scale::default();
        let mut fill = Paint::fill(Color::BLACK);
        let mut stroke = Paint::stroke(Color::BLACK);
        let mut font_family = FontFamily::Default;
        let mut font_style = FontStyle::Normal;
        let mut font_size = 0.0;
        let mut symbol_id = None;

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
                "position" => position = Some(attr.keyword()?),
                "symbol-id" => symbol_id = Some(attr.string()),
                "scale" => scale = attr.keyword()?,
                _ => return Err(attr.unknown()),
            }
        }

        let text_key = text_key.ok_or_else(|| ThemeError::MissingAttribute {
            element: name.to_string(),
            name: "k".to_string(),
        })?;

        let symbol = symbol_id.and_then(|id| {
            let symbol = ctx.symbols.get(&id).cloned();
            if symbol.is_none() {
                tracing::warn!(caption = name, symbol_id = %id, "Caption references unknown symbol");
            }
            symbol
        });

        let position = position.unwrap_or(if symbol.is_some() {
            Position::Below
        } else {
            Position::Center
        });

        for paint in [&mut fill, &mut stroke] {
            paint.font_family = font_family;
            paint.font_style = font_style;
            paint.text_size = font_size;
            paint.text_align = position.text_align();
        }

        Ok(Self {
            name: name.to_string(),
            category,
            level,
            text_key,
            display,
            priority,
            dy,
            gap: DEFAULT_GAP * scale_factor,
            position,
            scale,
            fill,
            stroke,
            max_text_width: ctx.display_model.max_text_width(),
            symbol,
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

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn text_key(&self) -> &TextKey {
        &self.text_key
    }

    pub fn has_symbol(&self) -> bool {
        self.symbol.is_some()
    }

    pub fn fill_at(&self, zoom: u8) -> &Paint {
        self.fills.get_or(zoom, &self.fill)
    }

    pub fn stroke_at(&self, zoom: u8) -> &Paint {
        self.strokes.get_or(zoom, &self.stroke)
    }

    pub fn dy_at(&self, zoom: u8) -> f32 {
        *self.dys.get_or(zoom, &self.dy)
    }

    /// Offsets of the caption anchor relative to the feature's label point.
    pub fn offsets(&self, zoom: u8) -> (f32, f32) {
        let dy = self.dy_at(zoom);
        let boundary = self.symbol.as_ref().and_then(|symbol| symbol.boundary());
        match boundary {
            Some(boundary) => {
                let gap = self.gap as f64;
                (
                    compute_horizontal_offset(&boundary, self.position, gap) as f32,
                    compute_vertical_offset(&boundary, self.position, gap, dy as f64) as f32,
                )
            }
            None => (0.0, dy),
        }
    }

    fn placement<'a>(&'a self, zoom: u8, text: &'a str) -> CaptionPlacement<'a> {
        let (horizontal_offset, vertical_offset) = self.offsets(zoom);
        CaptionPlacement {
            display: self.display,
            priority: self.priority,
            text,
            horizontal_offset,
            vertical_offset,
            fill: self.fill_at(zoom),
            stroke: self.stroke_at(zoom),
            position: self.position,
            max_text_width: self.max_text_width,
        }
    }

    pub fn render_node(
        &self,
        callback: &mut dyn RenderCallback,
        context: &RenderContext,
        poi: &PointOfInterest,
    ) {
        if self.display == Display::Never {
            return;
        }
        let Some(text) = self.text_key.get_value(&poi.tags) else {
            return;
        };
        callback.render_poi_caption(context, &self.placement(context.zoom(), text), poi);
    }

    pub fn render_way(&self, callback: &mut dyn RenderCallback, context: &RenderContext, way: &Way) {
        if self.display == Display::Never {
            return;
        }
        let Some(text) = self.text_key.get_value(&way.tags) else {
            return;
        };
        callback.render_area_caption(context, &self.placement(context.zoom(), text), way);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::Align;
    use crate::render::{RecordingCallback, RenderCall};
    use crate::test_support::{poi, square_way, theme_from, StubFactory, TEST_TILE};
    use crate::theme::RenderInstruction;

    fn first_caption(theme: &crate::theme::RenderTheme) -> &Caption {
        theme
            .instructions()
            .iter()
            .find_map(|i| match i {
                RenderInstruction::Caption(c) => Some(c),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_defaults_without_symbol() {
        let theme = theme_from("[caption]\nk=name\nfont-size=12\n", StubFactory::new());
        let caption = first_caption(&theme);
        assert_eq!(caption.position(), Position::Center);
        assert_eq!(caption.fill_at(0).text_align, Align::Center);
        assert_eq!(caption.offsets(0), (0.0, 0.0));
    }

    #[test]
    fn test_below_symbol_by_default() {
        let theme = theme_from(
            "[symbol.peak]\nid=peak\nsrc=peak.png\n\n[caption.peak]\nk=name\nsymbol-id=peak\n",
            StubFactory::new().with_bitmap("peak.png", 16, 16),
        );
        let caption = first_caption(&theme);
        assert!(caption.has_symbol());
        assert_eq!(caption.position(), Position::Below);
        // symbol boundary (-8, -8, 8, 8), gap 5
        assert_eq!(caption.offsets(0), (0.0, 13.0));
    }

    #[test]
    fn test_right_of_symbol_aligns_left() {
        let theme = theme_from(
            "[symbol]\nid=s\nsrc=s.png\n\n[caption]\nk=name\nsymbol-id=s\nposition=right\ndy=1\n",
            StubFactory::new().with_bitmap("s.png", 10, 10),
        );
        let caption = first_caption(&theme);
        assert_eq!(caption.fill_at(0).text_align, Align::Left);
        assert_eq!(caption.offsets(0), (10.0, 1.0));
    }

    #[test]
    fn test_unknown_symbol_id_is_ignored() {
        let theme = theme_from("[caption]\nk=name\nsymbol-id=nothing\n", StubFactory::new());
        let caption = first_caption(&theme);
        assert!(!caption.has_symbol());
        assert_eq!(caption.position(), Position::Center);
    }

    #[test]
    fn test_text_size_scaled_per_zoom() {
        let theme = theme_from("[caption]\nk=name\nfont-size=10\n", StubFactory::new());
        let caption = first_caption(&theme);
        caption.scale_text_size(1.5, 14);
        assert_eq!(caption.fill_at(14).text_size, 15.0);
        assert_eq!(caption.stroke_at(14).text_size, 15.0);
        assert_eq!(caption.fill_at(13).text_size, 10.0);
    }

    #[test]
    fn test_scale_none_keeps_text_size() {
        let theme = theme_from("[caption]\nk=name\nfont-size=10\nscale=none\n", StubFactory::new());
        let caption = first_caption(&theme);
        caption.scale_text_size(2.0, 14);
        assert_eq!(caption.fill_at(14).text_size, 10.0);
    }

    #[test]
    fn test_renders_only_when_tag_present() {
        let theme = theme_from("[caption]\nk=name\n", StubFactory::new());
        let caption = first_caption(&theme);
        let mut callback = RecordingCallback::new();
        let context = RenderContext::new(TEST_TILE);

        caption.render_node(&mut callback, &context, &poi(&[("ele", "1200")]));
        assert!(callback.is_empty());

        caption.render_node(&mut callback, &context, &poi(&[("name", "Zugspitze")]));
        caption.render_way(&mut callback, &context, &square_way());
        match callback.calls() {
            [RenderCall::PoiCaption(poi_caption), RenderCall::AreaCaption(area_caption)] => {
                assert_eq!(poi_caption.text, "Zugspitze");
                assert_eq!(area_caption.text, "Central Park");
            }
            other => panic!("unexpected calls {other:?}"),
        }
    }

    #[test]
    fn test_display_never_skips() {
        let theme = theme_from("[caption]\nk=name\ndisplay=never\n", StubFactory::new());
        let caption = first_caption(&theme);
        let mut callback = RecordingCallback::new();
        caption.render_node(
            &mut callback,
            &RenderContext::new(TEST_TILE),
            &poi(&[("name", "x")]),
        );
        assert!(callback.is_empty());
    }
}
