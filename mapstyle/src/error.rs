//! Error types shared across the crate
//!
//! Each concern owns its error enum; this module gathers them for callers
//! that handle several at once.

use thiserror::Error;

pub use crate::graphics::GraphicsError;
pub use crate::hills::HillsError;
pub use crate::mercator::MercatorError;
pub use crate::theme::ThemeError;

/// A textual value that does not name a member of an enumerated set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: '{value}'")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseValueError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
