//! Paint description passed to drawing primitives

use super::{Bitmap, Color};
use crate::model::Point;
use std::sync::Arc;

/// Declares a fieldless enum parsed from lower-case theme keywords.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($kind:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $keyword:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// The theme keyword for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $keyword),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ParseValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($keyword => Ok($name::$variant),)+
                    _ => Err($crate::error::ParseValueError::new($kind, s)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use keyword_enum;

keyword_enum! {
    /// Whether a paint fills or strokes geometry.
    pub enum Style("style") {
        Fill => "fill",
        Stroke => "stroke",
    }
}

keyword_enum! {
    /// Line end decoration.
    pub enum Cap("stroke-linecap") {
        Butt => "butt",
        Round => "round",
        Square => "square",
    }
}

keyword_enum! {
    /// Corner decoration between line segments.
    pub enum Join("stroke-linejoin") {
        Bevel => "bevel",
        Miter => "miter",
        Round => "round",
    }
}

keyword_enum! {
    /// Horizontal text alignment relative to the anchor.
    pub enum Align("align") {
        Center => "center",
        Left => "left",
        Right => "right",
    }
}

keyword_enum! {
    pub enum FontFamily("font-family") {
        Default => "default",
        Monospace => "monospace",
        SansSerif => "sans_serif",
        Serif => "serif",
    }
}

keyword_enum! {
    pub enum FontStyle("font-style") {
        Bold => "bold",
        BoldItalic => "bold_italic",
        Italic => "italic",
        Normal => "normal",
    }
}

/// A bitmap pattern together with the world-pixel shift that anchors it.
///
/// The shift is supplied per draw call so that a pattern lines up across
/// neighbouring tiles; it is never stored on the shared instruction.
#[derive(Debug, Clone)]
pub struct BitmapShader {
    pub bitmap: Arc<dyn Bitmap>,
    pub shift: Point,
}

/// Describes how geometry or text is drawn.
#[derive(Debug, Clone)]
pub struct Paint {
    pub color: Color,
    pub style: Style,
    pub stroke_width: f32,
    pub cap: Cap,
    pub join: Join,
    pub dash: Option<Vec<f32>>,
    pub text_size: f32,
    pub text_align: Align,
    pub font_family: FontFamily,
    pub font_style: FontStyle,
    pub shader: Option<BitmapShader>,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            style: Style::Fill,
            stroke_width: 0.0,
            cap: Cap::Round,
            join: Join::Round,
            dash: None,
            text_size: 0.0,
            text_align: Align::Center,
            font_family: FontFamily::Default,
            font_style: FontStyle::Normal,
            shader: None,
        }
    }
}

impl Paint {
    /// A fill paint of the given color.
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// A stroke paint of the given color.
    pub fn stroke(color: Color) -> Self {
        Self {
            color,
            style: Style::Stroke,
            ..Default::default()
        }
    }

    /// True when drawing with this paint has no visible effect.
    pub fn is_transparent(&self) -> bool {
        self.shader.is_none() && self.color.is_transparent()
    }

    /// Returns a copy with the stroke width, and optionally the dash
    /// pattern, multiplied by `factor`.
    pub fn with_scaled_stroke(&self, factor: f32, scale_dash: bool) -> Paint {
        let mut paint = self.clone();
        paint.stroke_width = self.stroke_width * factor;
        if scale_dash {
            paint.dash = self
                .dash
                .as_ref()
                .map(|dash| dash.iter().map(|d| d * factor).collect());
        }
        paint
    }

    /// Returns a copy with the text size multiplied by `factor`.
    pub fn with_scaled_text(&self, factor: f32) -> Paint {
        let mut paint = self.clone();
        paint.text_size = self.text_size * factor;
        paint
    }

    /// Returns a copy that fills with `bitmap` anchored at `origin`.
    pub fn with_shader(&self, bitmap: Arc<dyn Bitmap>, origin: Point) -> Paint {
        let mut paint = self.clone();
        paint.shader = Some(BitmapShader {
            bitmap,
            shift: origin,
        });
        paint
    }
}
