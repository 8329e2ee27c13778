//! Anchor geometry for captions and symbols
//!
//! All functions are pure and work in pixels relative to the anchor point.

use super::Position;
use crate::model::Rectangle;

fn x_factor(position: Position) -> f64 {
    if position.on_left_side() {
        -1.0
    } else if position.on_right_side() {
        0.0
    } else {
        -0.5
    }
}

fn y_factor(position: Position) -> f64 {
    if position.on_upper_side() {
        -1.0
    } else if position.on_lower_side() {
        0.0
    } else {
        -0.5
    }
}

/// Rectangle occupied by a `width` x `height` item placed at `position`.
///
/// The top edge is derived from the width, so non-square items placed on
/// the vertical centre line are offset by `y_factor * width`.
pub fn compute_boundary(width: f64, height: f64, position: Position) -> Rectangle {
    let x = x_factor(position) * width;
    let y = y_factor(position) * width;
    Rectangle::new(x, y, x + width, y + height)
}

/// Horizontal offset of a label placed beside `boundary`.
pub fn compute_horizontal_offset(boundary: &Rectangle, position: Position, gap: f64) -> f64 {
    if position.on_left_side() {
        boundary.left - gap
    } else if position.on_right_side() {
        boundary.right + gap
    } else {
        (boundary.left + boundary.right) / 2.0
    }
}

/// Vertical offset of a label placed above or below `boundary`, shifted by
/// the zoom-scaled `dy`.
pub fn compute_vertical_offset(boundary: &Rectangle, position: Position, gap: f64, dy: f64) -> f64 {
    let base = if position.on_upper_side() {
        boundary.top - gap
    } else if position.on_lower_side() {
        boundary.bottom + gap
    } else {
        (boundary.top + boundary.bottom) / 2.0
    };
    base + dy
}
