//! Map tile to shading cell composition
//!
//! For a map tile the compositor walks every 1° x 1° shading cell that
//! overlaps the tile. For each cell it computes two rectangles:
//!
//! - the part of the padded shading bitmap covering the overlap
//! - the part of the map tile covering the overlap, in tile pixels
//!
//! When a cell edge falls inside the map tile, the adjacent cell's border
//! strip is attached so the backend can fill the padding before drawing and
//! avoid visible seams.

use super::{
    Border, HillsRenderConfig, HillshadingShape, NeighborMerge, ShadingTile, SHADING_LAT_STEP,
    SHADING_LON_STEP,
};
use crate::mercator;
use crate::model::{Rectangle, Tile};

/// Theme settings of one hillshading layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HillshadingParams {
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Base opacity, 0 to 255.
    pub magnitude: u8,
    /// Emit placeholder shapes where no elevation data exists.
    pub always: bool,
}

impl Default for HillshadingParams {
    fn default() -> Self {
        Self {
            min_zoom: 9,
            max_zoom: 17,
            magnitude: 64,
            always: false,
        }
    }
}

impl HillshadingParams {
    pub fn is_active(&self, zoom: u8) -> bool {
        (self.min_zoom..=self.max_zoom).contains(&zoom)
    }

    /// Opacity after applying the renderer's scale factor, in `0.0..=1.0`.
    pub fn effective_magnitude(&self, scale_factor: f32) -> f32 {
        (self.magnitude as f32 * scale_factor).clamp(0.0, 255.0) / 255.0
    }
}

/// Geographic and pixel extent of the map tile being shaded.
struct MapTileFrame {
    tile: Tile,
    map_size: u64,
    origin_x: f64,
    origin_y: f64,
    top: f64,
    bottom: f64,
    left: f64,
    right: f64,
}

impl MapTileFrame {
    fn new(tile: Tile) -> Self {
        let map_size = tile.map_size();
        let origin = tile.origin();
        let size = tile.tile_size as f64;
        Self {
            tile,
            map_size,
            origin_x: origin.x,
            origin_y: origin.y,
            top: mercator::pixel_y_to_latitude(origin.y, map_size),
            bottom: mercator::pixel_y_to_latitude(origin.y + size, map_size),
            left: mercator::pixel_x_to_longitude(origin.x, map_size),
            right: mercator::pixel_x_to_longitude(origin.x + size, map_size),
        }
    }

    fn px_per_lat(&self) -> f64 {
        self.tile.tile_size as f64 / (self.top - self.bottom)
    }

    fn px_per_lon(&self) -> f64 {
        self.tile.tile_size as f64 / (self.right - self.left)
    }

    fn lat_to_tile_y(&self, lat: f64) -> f64 {
        mercator::latitude_to_pixel_y(lat, self.map_size) - self.origin_y
    }

    fn lon_to_tile_x(&self, lon: f64) -> f64 {
        mercator::longitude_to_pixel_x(lon, self.map_size) - self.origin_x
    }
}

/// Computes the hillshading shapes for `tile`.
///
/// Zoom levels outside the layer's range produce nothing. Source failures
/// are logged and the affected cell is skipped; the rest of the tile is
/// still composed.
pub fn compose(
    tile: &Tile,
    config: Option<&HillsRenderConfig>,
    params: &HillshadingParams,
) -> Vec<HillshadingShape> {
    if !params.is_active(tile.zoom) {
        return Vec::new();
    }

    let size = tile.tile_size as f64;
    let Some(config) = config else {
        if !params.always {
            return Vec::new();
        }
        return vec![HillshadingShape {
            source: None,
            source_rect: Rectangle::default(),
            destination_rect: Rectangle::new(0.0, 0.0, size, size),
            magnitude: params.effective_magnitude(1.0),
            neighbors: Vec::new(),
        }];
    };

    let frame = MapTileFrame::new(*tile);
    let magnitude = params.effective_magnitude(config.magnitude_scale_factor());
    let mut shapes = Vec::new();

    let mut lon = frame.left.floor() as i32;
    while (lon as f64) < frame.right {
        let mut lat = frame.bottom.floor() as i32;
        while (lat as f64) < frame.top {
            if let Some(shape) = compose_cell(&frame, config, params, magnitude, lat, lon) {
                shapes.push(shape);
            }
            lat += SHADING_LAT_STEP;
        }
        lon += SHADING_LON_STEP;
    }

    tracing::trace!(tile = %tile, shapes = shapes.len(), "Composed hillshading");
    shapes
}

fn fetch(
    frame: &MapTileFrame,
    config: &HillsRenderConfig,
    lat: i32,
    lon: i32,
) -> Result<Option<ShadingTile>, super::HillsError> {
    config.shading_tile(lat, lon, frame.px_per_lat(), frame.px_per_lon())
}

fn compose_cell(
    frame: &MapTileFrame,
    config: &HillsRenderConfig,
    params: &HillshadingParams,
    magnitude: f32,
    lat: i32,
    lon: i32,
) -> Option<HillshadingShape> {
    let shading = match fetch(frame, config, lat, lon) {
        Ok(shading) => shading,
        Err(e) => {
            tracing::warn!(lat, lon, error = %e, "Skipping hillshading cell");
            return None;
        }
    };
    if shading.is_none() && !params.always {
        return None;
    }

    let (padding, inner_w, inner_h) = match &shading {
        Some(tile) => (
            tile.padding as f64,
            tile.inner_width() as f64,
            tile.inner_height() as f64,
        ),
        None => (0.0, 1.0, 1.0),
    };

    let cell_bottom = lat as f64;
    let cell_top = (lat + SHADING_LAT_STEP) as f64;
    let cell_left = lon as f64;
    let cell_right = (lon + SHADING_LON_STEP) as f64;
    let cell_lat_span = cell_top - cell_bottom;
    let cell_lon_span = cell_right - cell_left;
    let size = frame.tile.tile_size as f64;

    let mut src = Rectangle::new(padding, padding, padding + inner_w, padding + inner_h);
    let mut dst = Rectangle::new(0.0, 0.0, size, size);
    let mut neighbors = Vec::new();

    // Clip whichever side is smaller: the cell where the map tile ends
    // inside it, the map tile where the cell ends inside it.
    if cell_top > frame.top {
        src.top = padding + inner_h * ((cell_top - frame.top) / cell_lat_span);
    } else if frame.top > cell_top {
        dst.top = frame.lat_to_tile_y(cell_top);
        neighbors.push((Border::North, lat + SHADING_LAT_STEP, lon));
    }
    if cell_bottom < frame.bottom {
        src.bottom = padding + inner_h - inner_h * ((frame.bottom - cell_bottom) / cell_lat_span);
    } else if frame.bottom < cell_bottom {
        dst.bottom = frame.lat_to_tile_y(cell_bottom);
        neighbors.push((Border::South, lat - SHADING_LAT_STEP, lon));
    }
    if cell_left < frame.left {
        src.left = padding + inner_w * ((frame.left - cell_left) / cell_lon_span);
    } else if frame.left < cell_left {
        dst.left = frame.lon_to_tile_x(cell_left);
        neighbors.push((Border::West, lat, lon - SHADING_LON_STEP));
    }
    if cell_right > frame.right {
        src.right = padding + inner_w - inner_w * ((cell_right - frame.right) / cell_lon_span);
    } else if frame.right > cell_right {
        dst.right = frame.lon_to_tile_x(cell_right);
        neighbors.push((Border::East, lat, lon + SHADING_LON_STEP));
    }

    if dst.is_empty() {
        return None;
    }

    let neighbors = match &shading {
        Some(tile) if tile.padding > 0 => neighbors
            .into_iter()
            .filter_map(|(border, n_lat, n_lon)| {
                match fetch(frame, config, n_lat, n_lon) {
                    Ok(Some(tile)) => Some(NeighborMerge { border, tile }),
                    Ok(None) => None,
                    Err(e) => {
                        tracing::debug!(lat = n_lat, lon = n_lon, error = %e, "Neighbour cell unavailable");
                        None
                    }
                }
            })
            .collect(),
        _ => Vec::new(),
    };

    Some(HillshadingShape {
        source_rect: if shading.is_some() {
            src
        } else {
            Rectangle::default()
        },
        source: shading,
        destination_rect: dst,
        magnitude,
        neighbors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hills::{HillsError, InMemoryShadingSource, ShadingTileSource};
    use crate::test_support::StubBitmap;
    use std::sync::Arc;

    fn shading(padding: u32) -> ShadingTile {
        ShadingTile::new(Arc::new(StubBitmap::new(100 + 2 * padding, 100 + 2 * padding)), padding)
    }

    fn params(min_zoom: u8, max_zoom: u8) -> HillshadingParams {
        HillshadingParams {
            min_zoom,
            max_zoom,
            ..Default::default()
        }
    }

    #[test]
    fn test_zoom_outside_range_produces_nothing() {
        let source = Arc::new(InMemoryShadingSource::new());
        source.insert(47, 11, shading(0));
        let config = HillsRenderConfig::new(source);
        let tile = mercator::to_tile(47.5, 11.5, 13, 256).unwrap();
        let shapes = compose(&tile, Some(&config), &params(5, 12));
        assert!(shapes.is_empty());
    }

    #[test]
    fn test_tile_inside_one_cell() {
        let source = Arc::new(InMemoryShadingSource::new());
        source.insert(47, 11, shading(0));
        let config = HillsRenderConfig::new(source);
        let tile = mercator::to_tile(47.5, 11.5, 12, 256).unwrap();

        let shapes = compose(&tile, Some(&config), &params(5, 12));
        assert_eq!(shapes.len(), 1);
        let shape = &shapes[0];
        assert_eq!(shape.destination_rect, Rectangle::new(0.0, 0.0, 256.0, 256.0));
        assert!(shape.source_rect.left > 0.0 && shape.source_rect.right < 100.0);
        assert!(shape.source_rect.top > 0.0 && shape.source_rect.bottom < 100.0);
        assert!(shape.neighbors.is_empty());
        assert!((shape.magnitude - 64.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_tile_spanning_cells_splits_destination() {
        let source = Arc::new(InMemoryShadingSource::new());
        for lat in 40..56 {
            for lon in 0..23 {
                source.insert(lat, lon, shading(1));
            }
        }
        let config = HillsRenderConfig::new(source);
        // zoom 5 tiles span several degrees
        let tile = mercator::to_tile(47.5, 11.5, 5, 256).unwrap();
        let bbox = tile.bounding_box();
        let shapes = compose(&tile, Some(&config), &params(0, 20));

        let lon_cells = (bbox.max_longitude.ceil() - bbox.min_longitude.floor()) as usize;
        let lat_cells = (bbox.max_latitude.ceil() - bbox.min_latitude.floor()) as usize;
        assert_eq!(shapes.len(), lon_cells * lat_cells);

        let covered: f64 = shapes
            .iter()
            .map(|s| s.destination_rect.width() * s.destination_rect.height())
            .sum();
        assert!((covered - 256.0 * 256.0).abs() < 1.0);

        for shape in &shapes {
            let d = &shape.destination_rect;
            assert!(d.left >= -1e-9 && d.right <= 256.0 + 1e-9);
            assert!(d.top >= -1e-9 && d.bottom <= 256.0 + 1e-9);
        }
        assert!(shapes.iter().any(|s| !s.neighbors.is_empty()));
    }

    #[test]
    fn test_missing_cells_skipped_unless_always() {
        let config = HillsRenderConfig::new(Arc::new(InMemoryShadingSource::new()));
        let tile = mercator::to_tile(47.5, 11.5, 12, 256).unwrap();
        assert!(compose(&tile, Some(&config), &params(5, 12)).is_empty());

        let always = HillshadingParams {
            always: true,
            ..params(5, 12)
        };
        let shapes = compose(&tile, Some(&config), &always);
        assert_eq!(shapes.len(), 1);
        assert!(shapes[0].source.is_none());
    }

    #[test]
    fn test_no_config_with_always_emits_placeholder() {
        let tile = mercator::to_tile(47.5, 11.5, 12, 256).unwrap();
        let always = HillshadingParams {
            always: true,
            ..params(5, 12)
        };
        let shapes = compose(&tile, None, &always);
        assert_eq!(shapes.len(), 1);
        assert_eq!(
            shapes[0].destination_rect,
            Rectangle::new(0.0, 0.0, 256.0, 256.0)
        );
        assert!(compose(&tile, None, &params(5, 12)).is_empty());
    }

    #[test]
    fn test_magnitude_is_clamped() {
        let p = HillshadingParams {
            magnitude: 200,
            ..Default::default()
        };
        assert_eq!(p.effective_magnitude(2.0), 1.0);
        assert_eq!(p.effective_magnitude(-1.0), 0.0);
    }

    struct FailingSource;

    impl ShadingTileSource for FailingSource {
        fn shading_tile(
            &self,
            lat: i32,
            lon: i32,
            _px_per_lat: f64,
            _px_per_lon: f64,
        ) -> Result<Option<ShadingTile>, HillsError> {
            if lon == 11 {
                Err(HillsError::Shading {
                    lat,
                    lon,
                    reason: "corrupt".to_string(),
                })
            } else {
                Ok(Some(shading(0)))
            }
        }
    }

    #[test]
    fn test_source_error_skips_only_that_cell() {
        let config = HillsRenderConfig::new(Arc::new(FailingSource));
        let tile = mercator::to_tile(47.5, 11.5, 5, 256).unwrap();
        let bbox = tile.bounding_box();
        let shapes = compose(&tile, Some(&config), &params(0, 20));
        let lat_cells = (bbox.max_latitude.ceil() - bbox.min_latitude.floor()) as usize;
        let lon_cells = (bbox.max_longitude.ceil() - bbox.min_longitude.floor()) as usize;
        assert_eq!(shapes.len(), (lon_cells - 1) * lat_cells);
    }
}
