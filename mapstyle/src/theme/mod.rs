//! Render themes
//!
//! A render theme is an INI document with one section per render
//! instruction. The section name starts with the element keyword, optionally
//! followed by a dot and a free label:
//!
//! ```ini
//! [theme]
//! map-background = #FFF8F4F0
//!
//! [area.park]
//! fill = #FFC8FACC
//!
//! [symbol.peak]
//! id = peak
//! src = symbols/peak.png
//!
//! [caption.peak]
//! k = name
//! symbol-id = peak
//! ```
//!
//! Loading a theme validates every attribute; any configuration error rejects
//! the whole theme. Bitmap resources are not touched until first rendered.

pub(crate) mod attributes;
mod error;
pub mod instruction;
mod options;
mod parser;
pub mod placement;
mod position;
mod render_theme;
mod resource;
mod text_key;
mod zoom_cache;

pub use error::ThemeError;
pub use instruction::{
    Area, Caption, Circle, Hillshading, Line, LineSymbol, PathText, RenderInstruction, Symbol,
};
pub use options::{Display, ResourceScaling, Scale, SymbolOrientation};
pub use position::Position;
pub use render_theme::RenderTheme;
pub use resource::LazyBitmap;
pub use text_key::{TextKey, TextKeyRegistry};
pub use zoom_cache::ZoomScaledCache;
