//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`inspect`] - Drawing primitives for one tagged feature
//! - [`scale_bar`] - Scale bar values and PNG rendering
//! - [`validate`] - Theme loading and instruction listing

pub mod common;
pub mod inspect;
pub mod scale_bar;
pub mod validate;
