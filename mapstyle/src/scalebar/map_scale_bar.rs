//! Scale bar overlay

use super::{calculate_scale_bar_length_and_value, DistanceUnit, ScaleBarLengthAndValue};
use crate::display::DisplayModel;
use crate::graphics::{
    keyword_enum, Bitmap, Canvas, Cap, Color, FontStyle, GraphicFactory, GraphicsError,
    OffscreenCanvas, Paint,
};
use crate::model::{LatLong, Point};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

const BITMAP_WIDTH: f32 = 120.0;
const BITMAP_HEIGHT: f32 = 40.0;
const DEFAULT_HORIZONTAL_MARGIN: f32 = 5.0;
const DEFAULT_VERTICAL_MARGIN: f32 = 0.0;
const LATITUDE_REDRAW_THRESHOLD: f64 = 0.2;
const SCALE_BAR_MARGIN: f32 = 10.0;
const STROKE_EXTERNAL: f32 = 4.0;
const STROKE_INTERNAL: f32 = 2.0;
const TEXT_MARGIN: f32 = 1.0;
const TEXT_SIZE: f32 = 12.0;

/// Centre and zoom level of the map view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPosition {
    pub center: LatLong,
    pub zoom: u8,
}

impl MapPosition {
    pub fn new(center: LatLong, zoom: u8) -> Self {
        Self { center, zoom }
    }
}

/// Source of the current map position, polled on every draw.
pub trait MapViewPosition: Send + Sync {
    fn map_position(&self) -> MapPosition;
}

/// A map position updated by the view and read by overlays.
#[derive(Debug)]
pub struct SharedMapPosition {
    position: RwLock<MapPosition>,
}

impl SharedMapPosition {
    pub fn new(position: MapPosition) -> Self {
        Self {
            position: RwLock::new(position),
        }
    }

    pub fn set(&self, position: MapPosition) {
        *self.position.write() = position;
    }

    pub fn set_center(&self, center: LatLong) {
        self.position.write().center = center;
    }

    pub fn set_zoom(&self, zoom: u8) {
        self.position.write().zoom = zoom;
    }
}

impl MapViewPosition for SharedMapPosition {
    fn map_position(&self) -> MapPosition {
        *self.position.read()
    }
}

keyword_enum! {
    /// Corner or edge of the map view the scale bar is anchored to.
    pub enum ScaleBarPosition("scale bar position") {
        BottomCenter => "bottom_center",
        BottomLeft => "bottom_left",
        BottomRight => "bottom_right",
        TopCenter => "top_center",
        TopLeft => "top_left",
        TopRight => "top_right",
    }
}

impl ScaleBarPosition {
    fn is_top(&self) -> bool {
        matches!(
            self,
            ScaleBarPosition::TopCenter | ScaleBarPosition::TopLeft | ScaleBarPosition::TopRight
        )
    }

    fn is_left(&self) -> bool {
        matches!(self, ScaleBarPosition::BottomLeft | ScaleBarPosition::TopLeft)
    }

    fn is_right(&self) -> bool {
        matches!(self, ScaleBarPosition::BottomRight | ScaleBarPosition::TopRight)
    }
}

keyword_enum! {
    /// Whether a secondary unit is drawn below the primary one.
    pub enum ScaleBarMode("scale bar mode") {
        Both => "both",
        Single => "single",
    }
}

/// Bars chosen by the last redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleBarValues {
    pub primary: ScaleBarLengthAndValue,
    pub secondary: Option<ScaleBarLengthAndValue>,
}

struct ScaleBarPaints {
    bar: Paint,
    bar_outline: Paint,
    text: Paint,
    text_outline: Paint,
}

impl ScaleBarPaints {
    fn new(scale: f32) -> Self {
        let bar_paint = |color, width| {
            let mut paint = Paint::stroke(color);
            paint.stroke_width = width * scale;
            paint.cap = Cap::Square;
            paint
        };
        let text_paint = |mut paint: Paint, width| {
            paint.stroke_width = width * scale;
            paint.font_style = FontStyle::Bold;
            paint.text_size = TEXT_SIZE * scale;
            paint
        };
        Self {
            bar: bar_paint(Color::BLACK, STROKE_INTERNAL),
            bar_outline: bar_paint(Color::WHITE, STROKE_EXTERNAL),
            text: text_paint(Paint::fill(Color::BLACK), 0.0),
            text_outline: text_paint(Paint::stroke(Color::WHITE), 2.0),
        }
    }
}

/// Precomposed scale bar that is recomputed only when the view moved enough
/// to change it.
///
/// A redraw happens on the first draw, after any setter that changes the
/// appearance, on zoom changes and when the latitude drifts by more than
/// 0.2 degrees from the last redraw.
pub struct MapScaleBar {
    map_view_position: Arc<dyn MapViewPosition>,
    display_model: DisplayModel,
    canvas: Box<dyn OffscreenCanvas>,
    bitmap: Option<Arc<dyn Bitmap>>,
    paints: ScaleBarPaints,
    unit: DistanceUnit,
    secondary_unit: DistanceUnit,
    mode: ScaleBarMode,
    position: ScaleBarPosition,
    margin_horizontal: u32,
    margin_vertical: u32,
    visible: bool,
    redraw_needed: bool,
    prev_position: Option<MapPosition>,
    values: Option<ScaleBarValues>,
    redraw_count: usize,
}

impl MapScaleBar {
    pub fn new(
        map_view_position: Arc<dyn MapViewPosition>,
        factory: &dyn GraphicFactory,
        display_model: DisplayModel,
    ) -> Result<Self, GraphicsError> {
        let scale = display_model.scale_factor();
        let canvas = factory.create_canvas(
            (BITMAP_WIDTH * scale).round() as u32,
            (BITMAP_HEIGHT * scale).round() as u32,
        )?;
        Ok(Self {
            map_view_position,
            display_model,
            canvas,
            bitmap: None,
            paints: ScaleBarPaints::new(scale),
            unit: DistanceUnit::Metric,
            secondary_unit: DistanceUnit::Imperial,
            mode: ScaleBarMode::Both,
            position: ScaleBarPosition::BottomLeft,
            margin_horizontal: (DEFAULT_HORIZONTAL_MARGIN * scale).round() as u32,
            margin_vertical: (DEFAULT_VERTICAL_MARGIN * scale).round() as u32,
            visible: true,
            redraw_needed: true,
            prev_position: None,
            values: None,
            redraw_count: 0,
        })
    }

    pub fn distance_unit(&self) -> DistanceUnit {
        self.unit
    }

    pub fn set_distance_unit(&mut self, unit: DistanceUnit) {
        if unit != self.unit {
            self.unit = unit;
            self.redraw_needed = true;
        }
    }

    pub fn secondary_distance_unit(&self) -> DistanceUnit {
        self.secondary_unit
    }

    pub fn set_secondary_distance_unit(&mut self, unit: DistanceUnit) {
        if unit != self.secondary_unit {
            self.secondary_unit = unit;
            self.redraw_needed = true;
        }
    }

    pub fn mode(&self) -> ScaleBarMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ScaleBarMode) {
        if mode != self.mode {
            self.mode = mode;
            self.redraw_needed = true;
        }
    }

    pub fn position(&self) -> ScaleBarPosition {
        self.position
    }

    pub fn set_position(&mut self, position: ScaleBarPosition) {
        if position != self.position {
            self.position = position;
            self.redraw_needed = true;
        }
    }

    pub fn set_margins(&mut self, horizontal: u32, vertical: u32) {
        self.margin_horizontal = horizontal;
        self.margin_vertical = vertical;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Bars chosen by the last redraw, `None` before the first one.
    pub fn values(&self) -> Option<ScaleBarValues> {
        self.values
    }

    /// Number of times the bar bitmap was recomputed.
    pub fn redraw_count(&self) -> usize {
        self.redraw_count
    }

    pub fn bitmap_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    /// Forces a redraw on the next [`draw`](Self::draw).
    pub fn invalidate(&mut self) {
        self.redraw_needed = true;
    }

    pub fn is_redraw_necessary(&self) -> bool {
        let Some(prev) = self.prev_position else {
            return true;
        };
        if self.redraw_needed {
            return true;
        }
        let current = self.map_view_position.map_position();
        if current.zoom != prev.zoom {
            return true;
        }
        (current.center.latitude - prev.center.latitude).abs() > LATITUDE_REDRAW_THRESHOLD
    }

    /// Draws the scale bar onto `target`, recomputing it first if needed.
    pub fn draw(&mut self, target: &mut dyn Canvas) {
        if !self.visible {
            return;
        }
        if self.is_redraw_necessary() {
            self.redraw();
        }
        let Some(bitmap) = &self.bitmap else {
            return;
        };
        let left = self.position_left(target.width(), bitmap.width());
        let top = self.position_top(target.height(), bitmap.height());
        target.draw_bitmap(bitmap.as_ref(), Point::new(left as f64, top as f64));
    }

    fn position_left(&self, view_width: u32, bitmap_width: u32) -> i64 {
        let (view, bitmap) = (view_width as i64, bitmap_width as i64);
        if self.position.is_left() {
            self.margin_horizontal as i64
        } else if self.position.is_right() {
            view - bitmap - self.margin_horizontal as i64
        } else {
            (view - bitmap) / 2
        }
    }

    fn position_top(&self, view_height: u32, bitmap_height: u32) -> i64 {
        if self.position.is_top() {
            self.margin_vertical as i64
        } else {
            view_height as i64 - bitmap_height as i64 - self.margin_vertical as i64
        }
    }

    fn redraw(&mut self) {
        let position = self.map_view_position.map_position();
        let tile_size = self.display_model.tile_size();
        let width = self.canvas.width();

        let primary = calculate_scale_bar_length_and_value(
            position.center.latitude,
            position.zoom,
            tile_size,
            self.unit,
            width,
        );
        let secondary = (self.mode == ScaleBarMode::Both).then(|| {
            calculate_scale_bar_length_and_value(
                position.center.latitude,
                position.zoom,
                tile_size,
                self.secondary_unit,
                width,
            )
        });

        let text1 = self.unit.scale_text(primary.value);
        let text2 = secondary.map(|s| self.secondary_unit.scale_text(s.value));
        let length2 = secondary.map_or(0, |s| s.length);

        self.canvas.fill_color(Color::TRANSPARENT);
        let layout = Layout::new(
            self.canvas.as_ref(),
            self.position,
            self.display_model.scale_factor(),
        );
        for paint in [&self.paints.bar_outline, &self.paints.bar] {
            layout.draw_bars(self.canvas.as_mut(), primary.length, length2, paint);
        }
        for paint in [&self.paints.text_outline, &self.paints.text] {
            layout.draw_texts(
                self.canvas.as_mut(),
                &text1,
                text2.as_deref(),
                paint,
                &self.paints.text_outline,
            );
        }

        self.bitmap = Some(self.canvas.to_bitmap());
        self.values = Some(ScaleBarValues { primary, secondary });
        self.prev_position = Some(position);
        self.redraw_needed = false;
        self.redraw_count += 1;
        tracing::debug!(
            latitude = position.center.latitude,
            zoom = position.zoom,
            primary = %text1,
            secondary = text2.as_deref().unwrap_or(""),
            "Scale bar redrawn"
        );
    }
}

impl fmt::Debug for MapScaleBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapScaleBar")
            .field("unit", &self.unit)
            .field("secondary_unit", &self.secondary_unit)
            .field("mode", &self.mode)
            .field("position", &self.position)
            .field("visible", &self.visible)
            .field("values", &self.values)
            .finish()
    }
}

/// Bar and label geometry inside the scale bar bitmap.
///
/// Bars run from an origin along a direction: rightwards from the left edge,
/// leftwards from the right edge, or rightwards from a centred origin for a
/// single centred bar.
struct Layout {
    width: f32,
    height: f32,
    scale: f32,
    position: ScaleBarPosition,
}

impl Layout {
    fn new(canvas: &dyn OffscreenCanvas, position: ScaleBarPosition, scale: f32) -> Self {
        Self {
            width: canvas.width() as f32,
            height: canvas.height() as f32,
            scale,
            position,
        }
    }

    fn half_stroke(&self) -> f32 {
        STROKE_EXTERNAL * self.scale * 0.5
    }

    fn margin(&self) -> f32 {
        SCALE_BAR_MARGIN * self.scale
    }

    fn line(canvas: &mut dyn OffscreenCanvas, x0: f32, y0: f32, x1: f32, y1: f32, paint: &Paint) {
        canvas.draw_line(
            Point::new(x0.round() as f64, y0.round() as f64),
            Point::new(x1.round() as f64, y1.round() as f64),
            paint,
        );
    }

    fn draw_bars(&self, canvas: &mut dyn OffscreenCanvas, length1: u32, length2: u32, paint: &Paint) {
        let (l1, l2) = (length1 as f32, length2 as f32);
        let max = l1.max(l2);
        let single = length2 == 0;

        let (origin, direction) = if self.position.is_right() {
            (self.width - self.half_stroke(), -1.0)
        } else if single && !self.position.is_left() {
            ((self.width - max) * 0.5, 1.0)
        } else {
            (self.half_stroke(), 1.0)
        };
        let x = |offset: f32| origin + direction * offset;
        let (h, mid, m) = (self.height, self.height * 0.5, self.margin());

        if single {
            let (baseline, tick_from, tick_to) = if self.position.is_top() {
                (m, m, mid)
            } else {
                (h - m, mid, h - m)
            };
            Self::line(canvas, x(0.0), baseline, x(max), baseline, paint);
            Self::line(canvas, x(0.0), tick_from, x(0.0), tick_to, paint);
            Self::line(canvas, x(max), tick_from, x(max), tick_to, paint);
        } else {
            Self::line(canvas, x(0.0), mid, x(max), mid, paint);
            Self::line(canvas, x(0.0), m, x(0.0), h - m, paint);
            Self::line(canvas, x(l1), m, x(l1), mid, paint);
            Self::line(canvas, x(l2), mid, x(l2), h - m, paint);
        }
    }

    fn text_x(&self, canvas: &dyn OffscreenCanvas, text: &str, measure: &Paint, single: bool) -> f32 {
        let inset = STROKE_EXTERNAL * self.scale + TEXT_MARGIN * self.scale;
        if self.position.is_right() {
            self.width - inset - canvas.text_width(text, measure)
        } else if single && !self.position.is_left() {
            (self.width - canvas.text_width(text, measure)) * 0.5
        } else {
            inset
        }
    }

    fn draw_texts(
        &self,
        canvas: &mut dyn OffscreenCanvas,
        text1: &str,
        text2: Option<&str>,
        paint: &Paint,
        measure: &Paint,
    ) {
        let text_margin = TEXT_MARGIN * self.scale;
        let mid = self.height * 0.5;
        match text2 {
            None => {
                let y = if self.position.is_top() {
                    self.margin()
                        + self.half_stroke()
                        + text_margin
                        + canvas.text_height(text1, measure)
                } else {
                    self.height - self.margin() - self.half_stroke() - text_margin
                };
                let x = self.text_x(canvas, text1, measure, true);
                canvas.draw_text(text1, Point::new(x.round() as f64, y.round() as f64), paint);
            }
            Some(text2) => {
                let x1 = self.text_x(canvas, text1, measure, false);
                let y1 = mid - self.half_stroke() - text_margin;
                canvas.draw_text(text1, Point::new(x1.round() as f64, y1.round() as f64), paint);

                let x2 = self.text_x(canvas, text2, measure, false);
                let y2 = mid + self.half_stroke() + text_margin + canvas.text_height(text2, measure);
                canvas.draw_text(text2, Point::new(x2.round() as f64, y2.round() as f64), paint);
            }
        }
    }
}
