//! CPU graphics backend built on `tiny-skia`
//!
//! Bitmap resources are decoded with the `image` crate, resized to the size
//! requested by their [`BitmapSpec`] and stored premultiplied in a
//! [`tiny_skia::Pixmap`].
//!
//! Text is rasterized with fontdue from embedded DejaVu Sans faces. A stroke
//! paint draws the text outline as a halo of half the stroke width.
//!
//! # Example
//!
//! ```ignore
//! use mapstyle::graphics::skia::SkiaGraphicFactory;
//! use mapstyle::graphics::{BitmapSpec, GraphicFactory};
//!
//! let factory = SkiaGraphicFactory::new("themes/resources");
//! let bitmap = factory.load_bitmap(&BitmapSpec::new("symbols/peak.png"))?;
//! ```

use super::glyphs::{self, GlyphMask};
use super::{
    Bitmap, BitmapSpec, Canvas, Cap, Color, GraphicFactory, GraphicsError, Join, OffscreenCanvas,
    Paint, Style,
};
use crate::hills::{Border, HillshadingShape, ShadingTile};
use crate::model::Point;
use image::imageops::FilterType;
use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tiny_skia::{
    BlendMode, FilterQuality, IntRect, IntSize, LineCap, LineJoin, PathBuilder, Pattern, Pixmap,
    PixmapPaint, Rect, Shader, SpreadMode, Stroke, StrokeDash, Transform,
};

/// A premultiplied RGBA bitmap.
#[derive(Debug, Clone)]
pub struct SkiaBitmap {
    pixmap: Pixmap,
}

impl SkiaBitmap {
    pub fn new(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

impl Bitmap for SkiaBitmap {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Factory decoding resources below a root directory.
#[derive(Debug, Clone)]
pub struct SkiaGraphicFactory {
    resource_root: PathBuf,
}

impl SkiaGraphicFactory {
    pub fn new(resource_root: impl Into<PathBuf>) -> Self {
        Self {
            resource_root: resource_root.into(),
        }
    }

    pub fn resource_root(&self) -> &Path {
        &self.resource_root
    }

    fn resolve(&self, src: &str) -> PathBuf {
        let src = src.strip_prefix("file:").unwrap_or(src);
        self.resource_root.join(src.trim_start_matches('/'))
    }
}

impl GraphicFactory for SkiaGraphicFactory {
    fn load_bitmap(&self, spec: &BitmapSpec) -> Result<Arc<dyn Bitmap>, GraphicsError> {
        let path = self.resolve(&spec.src);
        let decoded = image::open(&path).map_err(|e| match e {
            image::ImageError::IoError(source) => GraphicsError::Io {
                path: path.clone(),
                source,
            },
            other => GraphicsError::Decode {
                path: path.clone(),
                reason: other.to_string(),
            },
        })?;

        let rgba = decoded.to_rgba8();
        let (width, height) = spec.target_size(rgba.width(), rgba.height());
        let rgba = if (width, height) == rgba.dimensions() {
            rgba
        } else {
            image::imageops::resize(&rgba, width, height, FilterType::Triangle)
        };

        let mut data = rgba.into_raw();
        premultiply(&mut data);

        let size =
            IntSize::from_wh(width, height).ok_or(GraphicsError::InvalidSize { width, height })?;
        let pixmap =
            Pixmap::from_vec(data, size).ok_or(GraphicsError::InvalidSize { width, height })?;

        tracing::debug!(src = %spec.src, width, height, "Decoded bitmap resource");
        Ok(Arc::new(SkiaBitmap::new(pixmap)))
    }

    fn create_canvas(
        &self,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn OffscreenCanvas>, GraphicsError> {
        Ok(Box::new(SkiaCanvas::new(width, height)?))
    }
}

/// Converts straight RGBA bytes to premultiplied alpha in place.
fn premultiply(data: &mut [u8]) {
    for pixel in data.chunks_exact_mut(4) {
        let a = pixel[3] as u16;
        if a == 255 {
            continue;
        }
        for c in &mut pixel[..3] {
            *c = ((*c as u16 * a + 127) / 255) as u8;
        }
    }
}

/// An offscreen canvas drawing into a pixmap.
#[derive(Debug, Clone)]
pub struct SkiaCanvas {
    pixmap: Pixmap,
}

impl SkiaCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self, GraphicsError> {
        let pixmap = Pixmap::new(width, height).ok_or(GraphicsError::InvalidSize { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Writes the canvas content as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), GraphicsError> {
        let path = path.as_ref();
        self.pixmap
            .save_png(path)
            .map_err(|e| GraphicsError::Encode {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    /// Draws one hillshading shape.
    ///
    /// When the shape carries neighbour strips they are merged into the
    /// padding of a transient copy of the shading bitmap first, so the
    /// cached bitmap itself is never modified. The whole bitmap is sampled
    /// through a pattern mapping `source_rect` onto `destination_rect`, so
    /// filtering at the clipped edges reads the padding.
    pub fn draw_hillshading(&mut self, shape: &HillshadingShape) {
        let Some(source) = shape.source.as_ref() else {
            return;
        };
        let Some(bitmap) = downcast(source.bitmap.as_ref()) else {
            tracing::warn!("Hillshading bitmap was not created by the skia backend");
            return;
        };

        let composed;
        let pixmap = if shape.neighbors.is_empty() {
            bitmap.pixmap()
        } else {
            composed = merge_neighbors(bitmap.pixmap(), source.padding, shape);
            &composed
        };

        let (src, dst) = (&shape.source_rect, &shape.destination_rect);
        if src.is_empty() || dst.is_empty() {
            return;
        }
        let Some(area) = Rect::from_ltrb(
            dst.left as f32,
            dst.top as f32,
            dst.right as f32,
            dst.bottom as f32,
        ) else {
            return;
        };

        let sx = dst.width() / src.width();
        let sy = dst.height() / src.height();
        let transform = Transform::from_row(
            sx as f32,
            0.0,
            0.0,
            sy as f32,
            (dst.left - src.left * sx) as f32,
            (dst.top - src.top * sy) as f32,
        );
        let paint = tiny_skia::Paint {
            shader: Pattern::new(
                pixmap.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Bilinear,
                shape.magnitude,
                transform,
            ),
            blend_mode: BlendMode::SourceOver,
            anti_alias: false,
            ..Default::default()
        };
        self.pixmap
            .fill_rect(area, &paint, Transform::identity(), None);
    }
}

fn downcast(bitmap: &dyn Bitmap) -> Option<&SkiaBitmap> {
    bitmap.as_any().downcast_ref::<SkiaBitmap>()
}

/// Copies the inner border strip of each neighbour into the padding of a
/// copy of `base`.
fn merge_neighbors(base: &Pixmap, padding: u32, shape: &HillshadingShape) -> Pixmap {
    let mut merged = base.clone();
    if padding == 0 {
        return merged;
    }
    let (w, h) = (base.width(), base.height());
    let p = padding;
    let copy = PixmapPaint {
        blend_mode: BlendMode::Source,
        ..Default::default()
    };

    for neighbor in &shape.neighbors {
        let Some(other) = downcast(neighbor.tile.bitmap.as_ref()) else {
            continue;
        };
        let other = other.pixmap();
        if other.width() != w || other.height() != h || w <= 2 * p || h <= 2 * p {
            tracing::trace!(border = ?neighbor.border, "Skipping mismatched hillshading neighbour");
            continue;
        }

        // (strip taken from the neighbour, destination in the merged copy)
        let (strip, x, y) = match neighbor.border {
            Border::North => (IntRect::from_xywh(p as i32, (h - 2 * p) as i32, w - 2 * p, p), p, 0),
            Border::South => (IntRect::from_xywh(p as i32, p as i32, w - 2 * p, p), p, h - p),
            Border::West => (IntRect::from_xywh((w - 2 * p) as i32, p as i32, p, h - 2 * p), 0, p),
            Border::East => (IntRect::from_xywh(p as i32, p as i32, p, h - 2 * p), w - p, p),
        };
        let Some(strip) = strip.and_then(|rect| other.clone_rect(rect)) else {
            continue;
        };
        merged.draw_pixmap(
            x as i32,
            y as i32,
            strip.as_ref(),
            &copy,
            Transform::identity(),
            None,
        );
    }
    merged
}

fn to_skia_cap(cap: Cap) -> LineCap {
    match cap {
        Cap::Butt => LineCap::Butt,
        Cap::Round => LineCap::Round,
        Cap::Square => LineCap::Square,
    }
}

fn to_skia_join(join: Join) -> LineJoin {
    match join {
        Join::Bevel => LineJoin::Bevel,
        Join::Miter => LineJoin::Miter,
        Join::Round => LineJoin::Round,
    }
}

impl Canvas for SkiaCanvas {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn fill_color(&mut self, color: Color) {
        self.pixmap.fill(color.to_skia());
    }

    fn draw_line(&mut self, from: Point, to: Point, paint: &Paint) {
        let mut builder = PathBuilder::new();
        builder.move_to(from.x as f32, from.y as f32);
        builder.line_to(to.x as f32, to.y as f32);
        let Some(path) = builder.finish() else {
            return;
        };

        let skia_paint = tiny_skia::Paint {
            shader: Shader::SolidColor(paint.color.to_skia()),
            anti_alias: true,
            ..Default::default()
        };
        let stroke = Stroke {
            width: paint.stroke_width.max(0.0),
            line_cap: to_skia_cap(paint.cap),
            line_join: to_skia_join(paint.join),
            dash: paint
                .dash
                .as_ref()
                .and_then(|dash| StrokeDash::new(dash.clone(), 0.0)),
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &skia_paint, &stroke, Transform::identity(), None);
    }

    fn draw_text(&mut self, text: &str, at: Point, paint: &Paint) {
        if paint.text_size <= 0.0 || paint.color.is_transparent() {
            return;
        }
        let Some(font) = glyphs::font_for(paint.font_style) else {
            return;
        };
        let Some(mask) = GlyphMask::rasterize(font, text, paint.text_size) else {
            return;
        };
        let mask = match paint.style {
            Style::Stroke => mask.dilate((paint.stroke_width * 0.5).ceil().max(0.0) as u32),
            Style::Fill => mask,
        };
        let Some(glyph_pixmap) = mask.to_pixmap(paint.color) else {
            return;
        };
        self.pixmap.draw_pixmap(
            at.x.round() as i32 + mask.left,
            at.y.round() as i32 + mask.top,
            glyph_pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    fn draw_bitmap(&mut self, bitmap: &dyn Bitmap, at: Point) {
        match downcast(bitmap) {
            Some(bitmap) => self.pixmap.draw_pixmap(
                at.x.round() as i32,
                at.y.round() as i32,
                bitmap.pixmap().as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            ),
            None => tracing::warn!("Bitmap was not created by the skia backend"),
        }
    }

    fn text_width(&self, text: &str, paint: &Paint) -> f32 {
        glyphs::font_for(paint.font_style)
            .map_or(0.0, |font| glyphs::advance(font, text, paint.text_size))
    }

    fn text_height(&self, text: &str, paint: &Paint) -> f32 {
        glyphs::font_for(paint.font_style)
            .map_or(0.0, |font| glyphs::bounds_height(font, text, paint.text_size))
    }
}

impl OffscreenCanvas for SkiaCanvas {
    fn to_bitmap(&self) -> Arc<dyn Bitmap> {
        Arc::new(SkiaBitmap::new(self.pixmap.clone()))
    }
}

/// Wraps a shading bitmap produced elsewhere for use with this backend.
pub fn shading_tile_from_pixmap(pixmap: Pixmap, padding: u32) -> ShadingTile {
    ShadingTile::new(Arc::new(SkiaBitmap::new(pixmap)), padding)
}
