//! mapstyle - Render-theme instruction engine for vector map tiles
//!
//! This library turns a declarative map style (a render theme) into concrete,
//! zoom-level-specific drawing primitives: area fills, line strokes, dashed
//! lines, bitmap-shaded fills, repeated line symbols, captions placed relative
//! to icons and hillshading overlays. It also provides the scale bar solver
//! that picks a round ground distance for the current zoom and latitude.
//!
//! # High-Level API
//!
//! ```ignore
//! use mapstyle::display::DisplayModel;
//! use mapstyle::graphics::skia::SkiaGraphicFactory;
//! use mapstyle::render::{RecordingCallback, RenderContext};
//! use mapstyle::theme::RenderTheme;
//! use std::sync::Arc;
//!
//! let factory = Arc::new(SkiaGraphicFactory::new("themes/resources"));
//! let theme = RenderTheme::load_from(path, factory, DisplayModel::default())?;
//!
//! // Single-threaded preprocessing, once per zoom level
//! theme.prepare(1.0, 0..=20);
//!
//! // Rule matching (done by the tile renderer) selects instructions
//! let mut callback = RecordingCallback::new();
//! let context = RenderContext::new(tile);
//! for instruction in theme.instructions() {
//!     instruction.render_way(&mut callback, &context, &way);
//! }
//! ```

pub mod display;
pub mod error;
pub mod graphics;
pub mod hills;
pub mod logging;
pub mod mercator;
pub mod model;
pub mod render;
pub mod scalebar;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_support;

/// Version of the mapstyle library and CLI.
///
/// The version is defined in the workspace `Cargo.toml` and injected at
/// compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
