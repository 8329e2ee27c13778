//! Graphics capabilities consumed by the engine
//!
//! The engine never rasterizes ways or POIs itself; it hands [`Paint`]s and
//! geometry to a [`RenderCallback`](crate::render::RenderCallback). It does
//! need a small set of backend capabilities, expressed by the traits here:
//!
//! - [`GraphicFactory`] decodes bitmap resources and creates offscreen canvases
//! - [`Bitmap`] is an opaque decoded image with known dimensions
//! - [`Canvas`] draws lines, text and bitmaps (used by the scale bar)
//!
//! The [`skia`] module provides a CPU implementation on top of `tiny-skia`.

mod bitmap;
mod color;
mod glyphs;
mod paint;
pub mod skia;

pub use bitmap::BitmapSpec;
pub use color::Color;
pub(crate) use paint::keyword_enum;
pub use paint::{Align, BitmapShader, Cap, FontFamily, FontStyle, Join, Paint, Style};

use crate::model::Point;
use std::any::Any;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by a graphics backend.
#[derive(Debug, Error)]
pub enum GraphicsError {
    /// Resource could not be read from disk
    #[error("Failed to read bitmap resource {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Resource could not be decoded
    #[error("Failed to decode bitmap resource {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    /// Requested dimensions are not usable
    #[error("Invalid bitmap size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// Canvas content could not be written out
    #[error("Failed to encode {path}: {reason}")]
    Encode { path: PathBuf, reason: String },
}

/// A decoded image owned by a graphics backend.
pub trait Bitmap: Send + Sync + fmt::Debug {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Allows a backend to recover its concrete bitmap type.
    fn as_any(&self) -> &dyn Any;
}

/// A drawing surface.
pub trait Canvas {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Fills the whole surface, replacing its content.
    fn fill_color(&mut self, color: Color);

    fn draw_line(&mut self, from: Point, to: Point, paint: &Paint);

    /// Draws `text` with its baseline starting at `at`.
    fn draw_text(&mut self, text: &str, at: Point, paint: &Paint);

    /// Draws `bitmap` with its top-left corner at `at`.
    fn draw_bitmap(&mut self, bitmap: &dyn Bitmap, at: Point);

    fn text_width(&self, text: &str, paint: &Paint) -> f32;
    fn text_height(&self, text: &str, paint: &Paint) -> f32;
}

/// A canvas backed by its own bitmap.
pub trait OffscreenCanvas: Canvas + Send {
    /// Snapshot of the current content.
    fn to_bitmap(&self) -> Arc<dyn Bitmap>;
}

/// Backend capability set used by instructions and the scale bar.
pub trait GraphicFactory: Send + Sync {
    /// Loads and decodes a bitmap resource at the size described by `spec`.
    fn load_bitmap(&self, spec: &BitmapSpec) -> Result<Arc<dyn Bitmap>, GraphicsError>;

    /// Creates a transparent offscreen canvas.
    fn create_canvas(
        &self,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn OffscreenCanvas>, GraphicsError>;
}
