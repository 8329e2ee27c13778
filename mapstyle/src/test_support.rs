//! Shared fixtures for unit tests

use crate::display::DisplayModel;
use crate::graphics::{
    Bitmap, BitmapSpec, Canvas, Color, GraphicFactory, GraphicsError, OffscreenCanvas, Paint,
};
use crate::model::{LatLong, Point, PointOfInterest, Tag, Tile, Way};
use crate::theme::{RenderInstruction, RenderTheme};
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A tile away from the world origin, so shader shifts are observable.
pub const TEST_TILE: Tile = Tile {
    x: 2200,
    y: 1343,
    zoom: 12,
    tile_size: 256,
};

#[derive(Debug, Clone, Copy)]
pub struct StubBitmap {
    width: u32,
    height: u32,
}

impl StubBitmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Bitmap for StubBitmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Counters shared by a factory and every canvas it creates.
#[derive(Debug, Default)]
struct Counters {
    loads: AtomicUsize,
    canvases: AtomicUsize,
    fills: AtomicUsize,
    lines: AtomicUsize,
    texts: Mutex<Vec<String>>,
}

/// Graphic factory serving registered bitmap sizes. Unknown sources fail
/// to decode. Clones share their registrations and counters.
#[derive(Debug, Clone, Default)]
pub struct StubFactory {
    bitmaps: Arc<Mutex<HashMap<String, (u32, u32)>>>,
    counters: Arc<Counters>,
}

impl StubFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bitmap(self, src: &str, width: u32, height: u32) -> Self {
        self.bitmaps.lock().insert(src.to_string(), (width, height));
        self
    }

    pub fn load_count(&self) -> usize {
        self.counters.loads.load(Ordering::SeqCst)
    }

    pub fn canvas_count(&self) -> usize {
        self.counters.canvases.load(Ordering::SeqCst)
    }

    /// Number of `fill_color` calls on canvases from this factory.
    pub fn fill_count(&self) -> usize {
        self.counters.fills.load(Ordering::SeqCst)
    }

    pub fn line_count(&self) -> usize {
        self.counters.lines.load(Ordering::SeqCst)
    }

    pub fn texts(&self) -> Vec<String> {
        self.counters.texts.lock().clone()
    }
}

impl GraphicFactory for StubFactory {
    fn load_bitmap(&self, spec: &BitmapSpec) -> Result<Arc<dyn Bitmap>, GraphicsError> {
        self.counters.loads.fetch_add(1, Ordering::SeqCst);
        let size = self.bitmaps.lock().get(&spec.src).copied();
        match size {
            Some((width, height)) => {
                let (width, height) = spec.target_size(width, height);
                Ok(Arc::new(StubBitmap::new(width, height)))
            }
            None => Err(GraphicsError::Decode {
                path: PathBuf::from(&spec.src),
                reason: "not registered".to_string(),
            }),
        }
    }

    fn create_canvas(
        &self,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn OffscreenCanvas>, GraphicsError> {
        if width == 0 || height == 0 {
            return Err(GraphicsError::InvalidSize { width, height });
        }
        self.counters.canvases.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StubCanvas {
            width,
            height,
            counters: Arc::clone(&self.counters),
        }))
    }
}

/// Canvas that only counts what is drawn on it.
pub struct StubCanvas {
    width: u32,
    height: u32,
    counters: Arc<Counters>,
}

impl StubCanvas {
    pub fn new(factory: &StubFactory, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            counters: Arc::clone(&factory.counters),
        }
    }
}

impl Canvas for StubCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_color(&mut self, _color: Color) {
        self.counters.fills.fetch_add(1, Ordering::SeqCst);
    }

    fn draw_line(&mut self, _from: Point, _to: Point, _paint: &Paint) {
        self.counters.lines.fetch_add(1, Ordering::SeqCst);
    }

    fn draw_text(&mut self, text: &str, _at: Point, _paint: &Paint) {
        self.counters.texts.lock().push(text.to_string());
    }

    fn draw_bitmap(&mut self, _bitmap: &dyn Bitmap, _at: Point) {}

    fn text_width(&self, text: &str, paint: &Paint) -> f32 {
        text.chars().count() as f32 * paint.text_size * 0.5
    }

    fn text_height(&self, _text: &str, paint: &Paint) -> f32 {
        paint.text_size
    }
}

impl OffscreenCanvas for StubCanvas {
    fn to_bitmap(&self) -> Arc<dyn Bitmap> {
        Arc::new(StubBitmap::new(self.width, self.height))
    }
}

fn tags(pairs: &[(&str, &str)]) -> Vec<Tag> {
    pairs.iter().map(|(k, v)| Tag::new(*k, *v)).collect()
}

pub fn poi(pairs: &[(&str, &str)]) -> PointOfInterest {
    PointOfInterest::new(0, tags(pairs), LatLong::new(47.5, 11.5))
}

/// A closed square way on [`TEST_TILE`] tagged as a named park.
pub fn square_way() -> Way {
    let ring = vec![
        Point::new(10.0, 10.0),
        Point::new(100.0, 10.0),
        Point::new(100.0, 100.0),
        Point::new(10.0, 100.0),
        Point::new(10.0, 10.0),
    ];
    Way::new(
        0,
        tags(&[("name", "Central Park"), ("leisure", "park")]),
        vec![ring],
        TEST_TILE,
    )
}

pub fn theme_from_with(text: &str, factory: StubFactory, display_model: DisplayModel) -> RenderTheme {
    RenderTheme::from_ini_str(text, Arc::new(factory), display_model).unwrap()
}

pub fn theme_from(text: &str, factory: StubFactory) -> RenderTheme {
    theme_from_with(text, factory, DisplayModel::default())
}

/// Builds the first instruction of a single-section theme.
pub fn build_single_with(
    text: &str,
    factory: StubFactory,
    display_model: DisplayModel,
) -> RenderInstruction {
    theme_from_with(text, factory, display_model)
        .into_instructions()
        .into_iter()
        .next()
        .unwrap()
}

pub fn build_single(text: &str, factory: StubFactory) -> RenderInstruction {
    build_single_with(text, factory, DisplayModel::default())
}
