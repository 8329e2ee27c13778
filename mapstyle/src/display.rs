//! Display parameters shared by a theme session

/// Tile size at a scale factor of 1.0.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Describes the output device a theme is prepared for.
///
/// The effective scale factor is the product of the device and user
/// factors. Theme sizes (stroke widths, font sizes, offsets, symbol sizes)
/// are multiplied by it when the theme is loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayModel {
    pub device_scale_factor: f32,
    pub user_scale_factor: f32,
    /// Overrides the tile size derived from the scale factor.
    pub fixed_tile_size: Option<u32>,
    /// Maximum caption width as a fraction of the tile size.
    pub max_text_width_factor: f32,
}

impl Default for DisplayModel {
    fn default() -> Self {
        Self {
            device_scale_factor: 1.0,
            user_scale_factor: 1.0,
            fixed_tile_size: None,
            max_text_width_factor: 0.7,
        }
    }
}

impl DisplayModel {
    pub fn with_device_scale_factor(mut self, factor: f32) -> Self {
        self.device_scale_factor = factor;
        self
    }

    pub fn with_user_scale_factor(mut self, factor: f32) -> Self {
        self.user_scale_factor = factor;
        self
    }

    pub fn with_fixed_tile_size(mut self, tile_size: u32) -> Self {
        self.fixed_tile_size = Some(tile_size);
        self
    }

    pub fn scale_factor(&self) -> f32 {
        self.device_scale_factor * self.user_scale_factor
    }

    /// Tile edge length in pixels.
    pub fn tile_size(&self) -> u32 {
        match self.fixed_tile_size {
            Some(size) => size,
            None => (DEFAULT_TILE_SIZE as f32 * self.scale_factor()).ceil() as u32,
        }
    }

    /// Maximum caption width in pixels.
    pub fn max_text_width(&self) -> f32 {
        self.tile_size() as f32 * self.max_text_width_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let model = DisplayModel::default();
        assert_eq!(model.scale_factor(), 1.0);
        assert_eq!(model.tile_size(), 256);
        assert!((model.max_text_width() - 179.2).abs() < 1e-3);
    }

    #[test]
    fn test_scale_factor_is_product() {
        let model = DisplayModel::default()
            .with_device_scale_factor(2.0)
            .with_user_scale_factor(1.5);
        assert_eq!(model.scale_factor(), 3.0);
        assert_eq!(model.tile_size(), 768);
    }

    #[test]
    fn test_fixed_tile_size_wins() {
        let model = DisplayModel::default()
            .with_device_scale_factor(2.0)
            .with_fixed_tile_size(256);
        assert_eq!(model.tile_size(), 256);
    }
}
