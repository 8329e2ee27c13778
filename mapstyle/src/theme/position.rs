//! Anchor positions for captions and symbols

use crate::graphics::{keyword_enum, Align};

keyword_enum! {
    /// Where a label or icon sits relative to its anchor point.
    pub enum Position("position") {
        Center => "center",
        Above => "above",
        AboveLeft => "above_left",
        AboveRight => "above_right",
        Below => "below",
        BelowLeft => "below_left",
        BelowRight => "below_right",
        Left => "left",
        Right => "right",
    }
}

impl Position {
    pub fn on_upper_side(&self) -> bool {
        matches!(
            self,
            Position::Above | Position::AboveLeft | Position::AboveRight
        )
    }

    pub fn on_lower_side(&self) -> bool {
        matches!(
            self,
            Position::Below | Position::BelowLeft | Position::BelowRight
        )
    }

    pub fn on_left_side(&self) -> bool {
        matches!(
            self,
            Position::Left | Position::AboveLeft | Position::BelowLeft
        )
    }

    pub fn on_right_side(&self) -> bool {
        matches!(
            self,
            Position::Right | Position::AboveRight | Position::BelowRight
        )
    }

    /// Text alignment matching this position: text left of its anchor is
    /// right-aligned and vice versa.
    pub fn text_align(&self) -> Align {
        if self.on_left_side() {
            Align::Right
        } else if self.on_right_side() {
            Align::Left
        } else {
            Align::Center
        }
    }
}
