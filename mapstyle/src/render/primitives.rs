//! Parameters of the richer drawing primitives

use crate::graphics::{Bitmap, Paint};
use crate::model::Rectangle;
use crate::theme::{Display, Position, SymbolOrientation};
use std::sync::Arc;

/// A caption anchored at a POI or area label point.
#[derive(Debug, Clone)]
pub struct CaptionPlacement<'a> {
    pub display: Display,
    pub priority: i32,
    pub text: &'a str,
    pub horizontal_offset: f32,
    pub vertical_offset: f32,
    pub fill: &'a Paint,
    pub stroke: &'a Paint,
    pub position: Position,
    pub max_text_width: f32,
}

/// An icon anchored at a POI or area label point.
#[derive(Debug, Clone)]
pub struct SymbolPlacement {
    pub display: Display,
    pub priority: i32,
    pub bitmap: Arc<dyn Bitmap>,
}

/// An icon repeated along a way.
#[derive(Debug, Clone)]
pub struct WaySymbol {
    pub display: Display,
    pub priority: i32,
    pub bitmap: Arc<dyn Bitmap>,
    pub dy: f32,
    /// Icon extent relative to its anchor on the way.
    pub boundary: Rectangle,
    pub align_center: bool,
    pub repeat: bool,
    pub repeat_gap: f32,
    pub repeat_start: f32,
    pub rotate: bool,
    pub orientation: SymbolOrientation,
}

/// Text drawn along a way.
#[derive(Debug, Clone)]
pub struct WayText<'a> {
    pub display: Display,
    pub priority: i32,
    pub text: &'a str,
    pub dy: f32,
    pub fill: &'a Paint,
    pub stroke: &'a Paint,
    pub repeat: bool,
    pub repeat_gap: f32,
    pub repeat_start: f32,
    pub rotate: bool,
}
