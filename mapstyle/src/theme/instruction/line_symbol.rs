//! Icons repeated along ways

use super::BuildContext;
use crate::model::{PointOfInterest, Rectangle, Way};
use crate::render::{RenderCallback, RenderContext, WaySymbol};
use crate::theme::attributes::{attributes, BitmapAttributes};
use crate::theme::placement::compute_boundary;
use crate::theme::resource::LazyBitmap;
use crate::theme::{Display, Position, Scale, SymbolOrientation, ThemeError, ZoomScaledCache};
use std::sync::{Arc, OnceLock};

const REPEAT_GAP_DEFAULT: f32 = 200.0;
const REPEAT_START_DEFAULT: f32 = 30.0;

/// Places an icon on a way, optionally repeated at a fixed gap, e.g.
/// one-way arrows.
#[derive(Debug)]
pub struct LineSymbol {
    name: String,
    category: Option<String>,
    level: usize,
    display: Display,
    priority: i32,
    dy: f32,
    align_center: bool,
    repeat: bool,
    repeat_gap: f32,
    repeat_start: f32,
    rotate: bool,
    position: Position,
    orientation: SymbolOrientation,
    scale: Scale,
    bitmap: LazyBitmap,
    boundary: OnceLock<Rectangle>,
    dys: ZoomScaledCache<f32>,
}

impl LineSymbol {
    pub(crate) fn build(
        name: &str,
        properties: &ini::Properties,
        ctx: &BuildContext<'_>,
        level: usize,
    ) -> Result<Self, ThemeError> {
        let scale_factor = ctx.display_model.scale_factor();
        let mut category = None;
        let mut display = Display::default();
        let mut priority = 0;
        let mut dy = 0.0;
        let mut align_center = false;
        let mut repeat = false;
        let mut repeat_gap = REPEAT_GAP_DEFAULT * scale_factor;
        let mut repeat_start = REPEAT_START_DEFAULT * scale_factor;
        let mut rotate = true;
        let mut position = Position::BelowRight;
        let mut orientation = SymbolOrientation::Auto;
        let mut scale = Scale::default();
        let mut bitmap = BitmapAttributes::default();

        for attr in attributes(name, properties) {
            if bitmap.accept(&attr, scale_factor)? {
                continue;
            }
            match attr.name {
                "cat" => category = Some(attr.string()),
                "display" => display = attr.keyword()?,
                "priority" => priority = attr.i32()?,
                "dy" => dy = attr.f32()? * scale_factor,
                "align-center" => align_center = attr.bool()?,
                "repeat" => repeat = attr.bool()?,
                "repeat-gap" => repeat_gap = attr.non_negative_f32()? * scale_factor,
                "repeat-start" => repeat_start = attr.non_negative_f32()? * scale_factor,
                "rotate" => rotate = attr.bool()?,
                "position" => position = attr.keyword()?,
                "symbol-orientation" => orientation = attr.keyword()?,
                "scale" => scale = attr.keyword()?,
                _ => return Err(attr.unknown()),
            }
        }

        let spec = bitmap
            .spec(ctx.display_model)
            .ok_or_else(|| ThemeError::MissingAttribute {
                element: name.to_string(),
                name: "src".to_string(),
            })?;

        Ok(Self {
            name: name.to_string(),
            category,
            level,
            display,
            priority,
            dy,
            align_center,
            repeat,
            repeat_gap,
            repeat_start,
            rotate,
            position,
            orientation,
            scale,
            bitmap: LazyBitmap::new(spec, Arc::clone(ctx.factory)),
            boundary: OnceLock::new(),
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

    pub fn resource(&self) -> &LazyBitmap {
        &self.bitmap
    }

    pub fn repeat_gap(&self) -> f32 {
        self.repeat_gap
    }

    pub fn repeat_start(&self) -> f32 {
        self.repeat_start
    }

    /// The icon extent once computed, `None` before the first render.
    pub fn boundary(&self) -> Option<Rectangle> {
        self.boundary.get().copied()
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
        let Some(bitmap) = self.bitmap.get() else {
            return;
        };
        let boundary = *self.boundary.get_or_init(|| {
            compute_boundary(bitmap.width() as f64, bitmap.height() as f64, self.position)
        });

        let symbol = WaySymbol {
            display: self.display,
            priority: self.priority,
            bitmap,
            dy: *self.dys.get_or(context.zoom(), &self.dy),
            boundary,
            align_center: self.align_center,
            repeat: self.repeat,
            repeat_gap: self.repeat_gap,
            repeat_start: self.repeat_start,
            rotate: self.rotate,
            orientation: self.orientation,
        };
        callback.render_way_symbol(context, &symbol, way);
    }

    pub fn scale_stroke_width(&self, scale_factor: f32, zoom: u8) {
        self.dys
            .insert(zoom, self.dy * self.scale.effective_factor(scale_factor));
    }

    pub fn scale_text_size(&self, _scale_factor: f32, _zoom: u8) {}

    pub fn destroy(&self) {
        self.bitmap.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RecordingCallback, RenderCall};
    use crate::test_support::{build_single, square_way, StubFactory};
    use crate::theme::RenderInstruction;

    fn line_symbol(section: &str, factory: StubFactory) -> LineSymbol {
        match build_single(section, factory) {
            RenderInstruction::LineSymbol(s) => s,
            other => panic!("expected line-symbol, got {other:?}"),
        }
    }

    #[test]
    fn test_boundary_computed_once_above() {
        let factory = StubFactory::new().with_bitmap("arrow.png", 12, 12);
        let symbol = line_symbol(
            "[line-symbol]\nsrc=arrow.png\nrepeat=true\nrepeat-gap=50\nrepeat-start=10\nposition=above\n",
            factory.clone(),
        );
        assert!(symbol.boundary().is_none());

        let way = square_way();
        let context = RenderContext::new(way.upper_left);
        let mut callback = RecordingCallback::new();
        symbol.render_way(&mut callback, &context, &way);
        symbol.render_way(&mut callback, &context, &way);

        let expected = Rectangle::new(-6.0, -12.0, 6.0, 0.0);
        assert_eq!(symbol.boundary(), Some(expected));
        assert_eq!(factory.load_count(), 1);
        assert_eq!(callback.len(), 2);
        for call in callback.calls() {
            let RenderCall::WaySymbol {
                boundary,
                repeat,
                repeat_gap,
                repeat_start,
                ..
            } = call
            else {
                panic!("expected way symbol");
            };
            assert_eq!(*boundary, expected);
            assert!(*repeat);
            assert_eq!(*repeat_gap, 50.0);
            assert_eq!(*repeat_start, 10.0);
        }
    }

    #[test]
    fn test_defaults() {
        let symbol = line_symbol(
            "[line-symbol]\nsrc=arrow.png\n",
            StubFactory::new().with_bitmap("arrow.png", 8, 4),
        );
        assert_eq!(symbol.repeat_gap(), 200.0);
        assert_eq!(symbol.repeat_start(), 30.0);

        let way = square_way();
        let mut callback = RecordingCallback::new();
        symbol.render_way(&mut callback, &RenderContext::new(way.upper_left), &way);
        let RenderCall::WaySymbol {
            boundary,
            repeat,
            rotate,
            ..
        } = &callback.calls()[0]
        else {
            panic!("expected way symbol");
        };
        // below-right places the icon at the anchor
        assert_eq!(*boundary, Rectangle::new(0.0, 0.0, 8.0, 4.0));
        assert!(!*repeat);
        assert!(*rotate);
    }

    #[test]
    fn test_missing_bitmap_is_noop() {
        let factory = StubFactory::new();
        let symbol = line_symbol("[line-symbol]\nsrc=missing.png\n", factory.clone());
        let way = square_way();
        let context = RenderContext::new(way.upper_left);
        let mut callback = RecordingCallback::new();
        symbol.render_way(&mut callback, &context, &way);
        symbol.render_way(&mut callback, &context, &way);
        assert!(callback.is_empty());
        assert_eq!(factory.load_count(), 1);
    }
}
