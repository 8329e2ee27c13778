//! Render callback interface and per-tile context

mod callback;
mod context;
mod primitives;
mod recording;

pub use callback::RenderCallback;
pub use context::RenderContext;
pub use primitives::{CaptionPlacement, SymbolPlacement, WaySymbol, WayText};
pub use recording::{RecordedCaption, RecordingCallback, RenderCall};
