//! Glyph rasterization for the skia backend
//!
//! Uses fontdue with embedded DejaVu Sans faces, parsed once on first use.
//! Every font family maps to the sans face; bold styles use the bold face.

use super::{Color, FontStyle};
use fontdue::{Font, FontSettings};
use std::sync::OnceLock;
use tiny_skia::{Pixmap, PremultipliedColorU8};

static REGULAR: OnceLock<Option<Font>> = OnceLock::new();
static BOLD: OnceLock<Option<Font>> = OnceLock::new();

const REGULAR_BYTES: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");
const BOLD_BYTES: &[u8] = include_bytes!("../../fonts/DejaVuSans-Bold.ttf");

fn parse(name: &str, bytes: &'static [u8]) -> Option<Font> {
    match Font::from_bytes(bytes, FontSettings::default()) {
        Ok(font) => Some(font),
        Err(e) => {
            tracing::error!(font = name, error = e, "Failed to parse embedded font");
            None
        }
    }
}

/// The embedded face for `style`, or `None` if it failed to parse.
pub(crate) fn font_for(style: FontStyle) -> Option<&'static Font> {
    match style {
        FontStyle::Bold | FontStyle::BoldItalic => BOLD
            .get_or_init(|| parse("DejaVuSans-Bold", BOLD_BYTES))
            .as_ref(),
        FontStyle::Normal | FontStyle::Italic => REGULAR
            .get_or_init(|| parse("DejaVuSans", REGULAR_BYTES))
            .as_ref(),
    }
}

/// Horizontal advance of `text` including kerning.
pub(crate) fn advance(font: &Font, text: &str, size: f32) -> f32 {
    let mut width = 0.0;
    let mut previous = None;
    for c in text.chars() {
        if let Some(kern) = previous.and_then(|p| font.horizontal_kern(p, c, size)) {
            width += kern;
        }
        width += font.metrics(c, size).advance_width;
        previous = Some(c);
    }
    width
}

/// Height of the union of the glyph boxes of `text`.
pub(crate) fn bounds_height(font: &Font, text: &str, size: f32) -> f32 {
    let mut top = i32::MIN;
    let mut bottom = i32::MAX;
    for c in text.chars() {
        let metrics = font.metrics(c, size);
        if metrics.width == 0 || metrics.height == 0 {
            continue;
        }
        top = top.max(metrics.ymin + metrics.height as i32);
        bottom = bottom.min(metrics.ymin);
    }
    if top < bottom {
        0.0
    } else {
        (top - bottom) as f32
    }
}

/// Coverage of a rasterized line of text.
///
/// `left` and `top` place the mask relative to the start of the baseline,
/// with y growing downwards.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GlyphMask {
    pub left: i32,
    pub top: i32,
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<u8>,
}

impl GlyphMask {
    /// Rasterizes `text` on one baseline. `None` when nothing is visible.
    pub fn rasterize(font: &Font, text: &str, size: f32) -> Option<GlyphMask> {
        let mut glyphs = Vec::new();
        let mut pen = 0.0f32;
        let mut previous = None;
        for c in text.chars() {
            if let Some(kern) = previous.and_then(|p| font.horizontal_kern(p, c, size)) {
                pen += kern;
            }
            let (metrics, bitmap) = font.rasterize(c, size);
            if metrics.width > 0 && metrics.height > 0 {
                let left = (pen + metrics.xmin as f32).round() as i32;
                let top = -(metrics.ymin + metrics.height as i32);
                glyphs.push((left, top, metrics.width, metrics.height, bitmap));
            }
            pen += metrics.advance_width;
            previous = Some(c);
        }

        let left = glyphs.iter().map(|g| g.0).min()?;
        let top = glyphs.iter().map(|g| g.1).min()?;
        let right = glyphs.iter().map(|g| g.0 + g.2 as i32).max()?;
        let bottom = glyphs.iter().map(|g| g.1 + g.3 as i32).max()?;
        let width = (right - left) as usize;
        let height = (bottom - top) as usize;

        let mut coverage = vec![0u8; width * height];
        for (gx, gy, gw, gh, bitmap) in &glyphs {
            let ox = (gx - left) as usize;
            let oy = (gy - top) as usize;
            for row in 0..*gh {
                for col in 0..*gw {
                    let cell = &mut coverage[(oy + row) * width + ox + col];
                    *cell = (*cell).max(bitmap[row * gw + col]);
                }
            }
        }

        Some(GlyphMask {
            left,
            top,
            width,
            height,
            coverage,
        })
    }

    /// Grows the coverage by `radius` pixels in every direction, giving the
    /// halo used for outlined text.
    pub fn dilate(&self, radius: u32) -> GlyphMask {
        if radius == 0 {
            return self.clone();
        }
        let r = radius as i32;
        let width = self.width + 2 * radius as usize;
        let height = self.height + 2 * radius as usize;
        let mut coverage = vec![0u8; width * height];

        for y in 0..self.height {
            for x in 0..self.width {
                let value = self.coverage[y * self.width + x];
                if value == 0 {
                    continue;
                }
                for dy in -r..=r {
                    for dx in -r..=r {
                        if dx * dx + dy * dy > r * r {
                            continue;
                        }
                        let tx = (x as i32 + r + dx) as usize;
                        let ty = (y as i32 + r + dy) as usize;
                        let cell = &mut coverage[ty * width + tx];
                        *cell = (*cell).max(value);
                    }
                }
            }
        }

        GlyphMask {
            left: self.left - r,
            top: self.top - r,
            width,
            height,
            coverage,
        }
    }

    /// Colors the coverage with `color` into a premultiplied pixmap.
    pub fn to_pixmap(&self, color: Color) -> Option<Pixmap> {
        let mut pixmap = Pixmap::new(self.width as u32, self.height as u32)?;
        let scale = |channel: u8, alpha: u16| ((channel as u16 * alpha + 127) / 255) as u8;
        for (pixel, &cover) in pixmap.pixels_mut().iter_mut().zip(&self.coverage) {
            let alpha = (color.a as u16 * cover as u16 + 127) / 255;
            *pixel = PremultipliedColorU8::from_rgba(
                scale(color.r, alpha),
                scale(color.g, alpha),
                scale(color.b, alpha),
                alpha as u8,
            )
            .unwrap_or(PremultipliedColorU8::TRANSPARENT);
        }
        Some(pixmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_fonts_parse() {
        assert!(font_for(FontStyle::Normal).is_some());
        assert!(font_for(FontStyle::BoldItalic).is_some());
    }

    #[test]
    fn test_advance_grows_with_text() {
        let font = font_for(FontStyle::Normal).unwrap();
        let short = advance(font, "1 km", 12.0);
        let long = advance(font, "10 km", 12.0);
        assert!(short > 0.0);
        assert!(long > short);
        assert_eq!(advance(font, "", 12.0), 0.0);
    }

    #[test]
    fn test_bounds_height_tracks_size() {
        let font = font_for(FontStyle::Bold).unwrap();
        let height = bounds_height(font, "200 m", 12.0);
        assert!(height > 6.0 && height <= 13.0, "height {height}");
        assert!(bounds_height(font, "200 m", 24.0) > height);
        assert_eq!(bounds_height(font, "   ", 12.0), 0.0);
    }

    #[test]
    fn test_rasterize_sits_on_baseline() {
        let font = font_for(FontStyle::Normal).unwrap();
        let mask = GlyphMask::rasterize(font, "km", 12.0).unwrap();
        // no descenders: the mask ends at the baseline
        assert!(mask.top < 0);
        assert!(mask.top + mask.height as i32 <= 1);
        assert!(mask.coverage.iter().any(|&c| c > 200));
        assert!(GlyphMask::rasterize(font, " ", 12.0).is_none());
    }

    #[test]
    fn test_dilate_expands_mask() {
        let mask = GlyphMask {
            left: 0,
            top: -1,
            width: 1,
            height: 1,
            coverage: vec![200],
        };
        let halo = mask.dilate(1);
        assert_eq!((halo.left, halo.top, halo.width, halo.height), (-1, -2, 3, 3));
        // plus-shaped neighbourhood, corners stay empty
        assert_eq!(halo.coverage, vec![0, 200, 0, 200, 200, 200, 0, 200, 0]);
    }

    #[test]
    fn test_to_pixmap_premultiplies() {
        let mask = GlyphMask {
            left: 0,
            top: 0,
            width: 2,
            height: 1,
            coverage: vec![255, 128],
        };
        let pixmap = mask.to_pixmap(Color::WHITE).unwrap();
        let full = pixmap.pixel(0, 0).unwrap();
        let half = pixmap.pixel(1, 0).unwrap();
        assert_eq!((full.red(), full.alpha()), (255, 255));
        assert_eq!((half.red(), half.alpha()), (128, 128));
    }
}
