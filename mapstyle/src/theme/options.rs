//! Enumerated instruction options

use crate::graphics::keyword_enum;

keyword_enum! {
    /// Label visibility policy.
    pub enum Display("display") {
        Always => "always",
        IfSpace => "ifspace",
        Never => "never",
    }
}

keyword_enum! {
    /// Which sizes follow the per-zoom scale factor.
    pub enum Scale("scale") {
        All => "all",
        None => "none",
        Stroke => "stroke",
    }
}

keyword_enum! {
    /// Orientation of symbols placed along a way.
    pub enum SymbolOrientation("symbol-orientation") {
        Auto => "auto",
        AutoDown => "auto_down",
        Right => "right",
        Left => "left",
        Up => "up",
        Down => "down",
    }
}

keyword_enum! {
    /// How a bitmap resource is sized.
    pub enum ResourceScaling("symbol-scaling") {
        Default => "default",
        Size => "size",
        Tile => "tile",
    }
}

impl Default for Display {
    fn default() -> Self {
        Display::IfSpace
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::Stroke
    }
}

impl Scale {
    /// Factor actually applied for a requested `factor`.
    pub fn effective_factor(&self, factor: f32) -> f32 {
        match self {
            Scale::None => 1.0,
            Scale::All | Scale::Stroke => factor,
        }
    }

    /// True when dash entries follow the factor as well.
    pub fn scales_dash(&self) -> bool {
        matches!(self, Scale::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_factor() {
        assert_eq!(Scale::None.effective_factor(3.0), 1.0);
        assert_eq!(Scale::Stroke.effective_factor(3.0), 3.0);
        assert_eq!(Scale::All.effective_factor(3.0), 3.0);
    }

    #[test]
    fn test_only_all_scales_dash() {
        assert!(Scale::All.scales_dash());
        assert!(!Scale::Stroke.scales_dash());
        assert!(!Scale::None.scales_dash());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Scale::default(), Scale::Stroke);
        assert_eq!(Display::default(), Display::IfSpace);
    }

    #[test]
    fn test_parse_orientation() {
        assert_eq!(
            "auto_down".parse::<SymbolOrientation>().unwrap(),
            SymbolOrientation::AutoDown
        );
    }
}
