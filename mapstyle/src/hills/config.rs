//! Hillshading configuration for a renderer

use super::{HillsError, ShadingTile, ShadingTileSource};
use std::fmt;
use std::sync::Arc;

/// Longitude beyond which a missing cell is retried on the other side of
/// the antimeridian.
const ANTIMERIDIAN_RETRY_LONGITUDE: i32 = 178;

/// DEM source and global settings used when rendering hillshading.
#[derive(Clone)]
pub struct HillsRenderConfig {
    source: Arc<dyn ShadingTileSource>,
    magnitude_scale_factor: f32,
}

impl HillsRenderConfig {
    pub fn new(source: Arc<dyn ShadingTileSource>) -> Self {
        Self {
            source,
            magnitude_scale_factor: 1.0,
        }
    }

    pub fn with_magnitude_scale_factor(mut self, factor: f32) -> Self {
        self.magnitude_scale_factor = factor;
        self
    }

    pub fn magnitude_scale_factor(&self) -> f32 {
        self.magnitude_scale_factor
    }

    /// Fetches the shading bitmap for the cell at (`lat`, `lon`).
    ///
    /// Near the antimeridian a missing cell is looked up again with the
    /// longitude shifted by 180°.
    pub fn shading_tile(
        &self,
        lat: i32,
        lon: i32,
        px_per_lat: f64,
        px_per_lon: f64,
    ) -> Result<Option<ShadingTile>, HillsError> {
        let tile = self.source.shading_tile(lat, lon, px_per_lat, px_per_lon)?;
        if tile.is_some() || lon.abs() <= ANTIMERIDIAN_RETRY_LONGITUDE {
            return Ok(tile);
        }
        let shifted = if lon > 0 { lon - 180 } else { lon + 180 };
        tracing::trace!(lat, lon, shifted, "Retrying shading cell across antimeridian");
        self.source.shading_tile(lat, shifted, px_per_lat, px_per_lon)
    }
}

impl fmt::Debug for HillsRenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HillsRenderConfig")
            .field("magnitude_scale_factor", &self.magnitude_scale_factor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hills::InMemoryShadingSource;
    use crate::test_support::StubBitmap;

    fn tile() -> ShadingTile {
        ShadingTile::new(Arc::new(StubBitmap::new(4, 4)), 0)
    }

    #[test]
    fn test_direct_lookup() {
        let source = Arc::new(InMemoryShadingSource::new());
        source.insert(10, 20, tile());
        let config = HillsRenderConfig::new(source);
        assert!(config.shading_tile(10, 20, 1.0, 1.0).unwrap().is_some());
        assert!(config.shading_tile(10, 21, 1.0, 1.0).unwrap().is_none());
    }

    #[test]
    fn test_antimeridian_retry() {
        let source = Arc::new(InMemoryShadingSource::new());
        source.insert(-17, -1, tile());
        source.insert(-17, 0, tile());
        let config = HillsRenderConfig::new(source);
        // 179 - 180 = -1
        assert!(config.shading_tile(-17, 179, 1.0, 1.0).unwrap().is_some());
        // -180 + 180 = 0
        assert!(config.shading_tile(-17, -180, 1.0, 1.0).unwrap().is_some());
        // no retry below the threshold
        assert!(config.shading_tile(-17, 178, 1.0, 1.0).unwrap().is_none());
    }

    #[test]
    fn test_magnitude_scale_factor() {
        let config = HillsRenderConfig::new(Arc::new(InMemoryShadingSource::new()))
            .with_magnitude_scale_factor(2.0);
        assert_eq!(config.magnitude_scale_factor(), 2.0);
    }
}
