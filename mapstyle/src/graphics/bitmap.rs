//! Bitmap resource descriptions

use std::fmt;

/// Identifies a bitmap resource and the size it should be rendered at.
///
/// Explicit sizes are already multiplied by the display scale when built
/// from theme attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapSpec {
    /// Resource path, relative to the factory's resource root.
    pub src: String,
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Percentage applied after all other sizing (100 = unchanged).
    pub percent: u32,
    /// Display scale applied to the intrinsic size when no explicit size is set.
    pub scale_factor: f32,
}

impl BitmapSpec {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            width: None,
            height: None,
            percent: 100,
            scale_factor: 1.0,
        }
    }

    /// Computes the rendered size for a resource with the given intrinsic
    /// dimensions.
    ///
    /// When both dimensions are given they win; when only one is given the
    /// other follows the intrinsic aspect ratio. The percentage is applied
    /// last. The result is at least one pixel in each direction.
    pub fn target_size(&self, intrinsic_width: u32, intrinsic_height: u32) -> (u32, u32) {
        let iw = intrinsic_width.max(1) as f32;
        let ih = intrinsic_height.max(1) as f32;
        let aspect = iw / ih;

        let (mut w, mut h) = match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => (w, h),
            (None, Some(h)) if h > 0.0 => (h * aspect, h),
            (Some(w), None) if w > 0.0 => (w, w / aspect),
            _ => (iw * self.scale_factor, ih * self.scale_factor),
        };

        if self.percent != 100 {
            let ratio = self.percent as f32 / 100.0;
            w *= ratio;
            h *= ratio;
        }

        ((w.round() as u32).max(1), (h.round() as u32).max(1))
    }
}

impl fmt::Display for BitmapSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.src)?;
        match (self.width, self.height) {
            (Some(w), Some(h)) => write!(f, " ({}x{})", w, h)?,
            (Some(w), None) => write!(f, " (w={})", w)?,
            (None, Some(h)) => write!(f, " (h={})", h)?,
            (None, None) => {}
        }
        if self.percent != 100 {
            write!(f, " {}%", self.percent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intrinsic_size_scaled_by_display() {
        let mut spec = BitmapSpec::new("a.png");
        spec.scale_factor = 2.0;
        assert_eq!(spec.target_size(16, 8), (32, 16));
    }

    #[test]
    fn test_explicit_size_wins() {
        let mut spec = BitmapSpec::new("a.png");
        spec.width = Some(10.0);
        spec.height = Some(30.0);
        spec.scale_factor = 2.0;
        assert_eq!(spec.target_size(16, 8), (10, 30));
    }

    #[test]
    fn test_single_dimension_keeps_aspect_ratio() {
        let mut spec = BitmapSpec::new("a.png");
        spec.height = Some(20.0);
        assert_eq!(spec.target_size(40, 10), (80, 20));

        let mut spec = BitmapSpec::new("a.png");
        spec.width = Some(20.0);
        assert_eq!(spec.target_size(40, 10), (20, 5));
    }

    #[test]
    fn test_percent_applied_last() {
        let mut spec = BitmapSpec::new("a.png");
        spec.width = Some(20.0);
        spec.height = Some(20.0);
        spec.percent = 50;
        assert_eq!(spec.target_size(1, 1), (10, 10));
    }

    #[test]
    fn test_never_zero_sized() {
        let mut spec = BitmapSpec::new("a.png");
        spec.percent = 1;
        assert_eq!(spec.target_size(4, 4), (1, 1));
    }
}
