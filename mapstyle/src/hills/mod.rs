//! Hillshading overlays
//!
//! Shading bitmaps are produced from digital elevation models (DEM) by an
//! external cache, one bitmap per 1° x 1° cell. Each bitmap carries a border
//! of `padding` pixels around its inner area so that neighbouring cells can
//! be blended seamlessly.
//!
//! The [`compositor`] relates a map tile to the cells it overlaps and emits
//! one [`HillshadingShape`] per overlapping cell, ready for the render
//! callback.
//!
//! # Example
//!
//! ```ignore
//! use mapstyle::hills::{HillsRenderConfig, InMemoryShadingSource};
//!
//! let source = Arc::new(InMemoryShadingSource::new());
//! source.insert(47, 11, shading_tile);
//! let hills = Arc::new(HillsRenderConfig::new(source));
//! let context = RenderContext::new(tile).with_hills(hills);
//! theme.render_hillshading(&mut callback, &context);
//! ```

pub mod compositor;
mod config;

pub use compositor::{compose, HillshadingParams};
pub use config::HillsRenderConfig;

use crate::graphics::Bitmap;
use crate::model::Rectangle;
use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;

/// Latitude extent of one shading cell in degrees.
pub const SHADING_LAT_STEP: i32 = 1;
/// Longitude extent of one shading cell in degrees.
pub const SHADING_LON_STEP: i32 = 1;

/// Errors raised by a DEM source.
#[derive(Debug, Error)]
pub enum HillsError {
    /// Elevation data could not be read
    #[error("Failed to read elevation data for {lat},{lon}: {source}")]
    Io {
        lat: i32,
        lon: i32,
        #[source]
        source: std::io::Error,
    },

    /// Elevation data exists but could not be turned into a shading bitmap
    #[error("Failed to compute shading for {lat},{lon}: {reason}")]
    Shading { lat: i32, lon: i32, reason: String },
}

/// A shading bitmap for one DEM cell.
#[derive(Debug, Clone)]
pub struct ShadingTile {
    pub bitmap: Arc<dyn Bitmap>,
    /// Border width in pixels on each side of the inner area.
    pub padding: u32,
}

impl ShadingTile {
    pub fn new(bitmap: Arc<dyn Bitmap>, padding: u32) -> Self {
        Self { bitmap, padding }
    }

    pub fn inner_width(&self) -> u32 {
        self.bitmap.width().saturating_sub(2 * self.padding)
    }

    pub fn inner_height(&self) -> u32 {
        self.bitmap.height().saturating_sub(2 * self.padding)
    }
}

/// Provides shading bitmaps keyed by the south-west corner of their cell.
///
/// Implementations may block while elevation data is read and converted.
pub trait ShadingTileSource: Send + Sync {
    /// The shading bitmap for the cell whose south-west corner is
    /// (`lat`, `lon`), or `None` when no elevation data covers it.
    ///
    /// `px_per_lat` and `px_per_lon` give the map resolution being rendered
    /// so that a source can choose a suitable bitmap resolution.
    fn shading_tile(
        &self,
        lat: i32,
        lon: i32,
        px_per_lat: f64,
        px_per_lon: f64,
    ) -> Result<Option<ShadingTile>, HillsError>;
}

/// Shading source backed by precomputed bitmaps.
#[derive(Debug, Default)]
pub struct InMemoryShadingSource {
    tiles: DashMap<(i32, i32), ShadingTile>,
}

impl InMemoryShadingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, lat: i32, lon: i32, tile: ShadingTile) {
        self.tiles.insert((lat, lon), tile);
    }

    pub fn remove(&self, lat: i32, lon: i32) -> Option<ShadingTile> {
        self.tiles.remove(&(lat, lon)).map(|(_, tile)| tile)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl ShadingTileSource for InMemoryShadingSource {
    fn shading_tile(
        &self,
        lat: i32,
        lon: i32,
        _px_per_lat: f64,
        _px_per_lon: f64,
    ) -> Result<Option<ShadingTile>, HillsError> {
        Ok(self.tiles.get(&(lat, lon)).map(|entry| entry.value().clone()))
    }
}

/// Side of a shading cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    North,
    South,
    East,
    West,
}

/// A neighbouring cell whose border strip fills one side of the padding.
#[derive(Debug, Clone)]
pub struct NeighborMerge {
    pub border: Border,
    pub tile: ShadingTile,
}

/// One drawable hillshading piece for a map tile.
#[derive(Debug, Clone)]
pub struct HillshadingShape {
    /// Shading bitmap, absent for placeholder shapes of `always` layers.
    pub source: Option<ShadingTile>,
    /// Region of the padded shading bitmap to draw.
    pub source_rect: Rectangle,
    /// Target region in pixels relative to the map tile.
    pub destination_rect: Rectangle,
    /// Opacity in `0.0..=1.0`.
    pub magnitude: f32,
    /// Neighbour strips to merge into the padding before drawing.
    pub neighbors: Vec<NeighborMerge>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubBitmap;

    #[test]
    fn test_inner_size_excludes_padding() {
        let tile = ShadingTile::new(Arc::new(StubBitmap::new(104, 84)), 2);
        assert_eq!(tile.inner_width(), 100);
        assert_eq!(tile.inner_height(), 80);
    }

    #[test]
    fn test_in_memory_source_lookup() {
        let source = InMemoryShadingSource::new();
        source.insert(47, 11, ShadingTile::new(Arc::new(StubBitmap::new(8, 8)), 1));
        assert!(source.shading_tile(47, 11, 1.0, 1.0).unwrap().is_some());
        assert!(source.shading_tile(47, 12, 1.0, 1.0).unwrap().is_none());
        assert!(source.remove(47, 11).is_some());
        assert!(source.is_empty());
    }
}
