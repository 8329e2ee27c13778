//! Spherical Mercator projection helpers
//!
//! Provides the conversions between geographic coordinates and world pixel
//! space used by tile rendering, hillshading and the scale bar. The world map
//! at zoom level `z` is a square of `tile_size << z` pixels.

mod types;

pub use types::{
    MercatorError, EARTH_CIRCUMFERENCE, LATITUDE_MAX, LATITUDE_MIN, LONGITUDE_MAX, LONGITUDE_MIN,
    MAX_ZOOM,
};

use crate::model::Tile;
use std::f64::consts::PI;

/// Size of the world map in pixels at the given zoom level.
#[inline]
pub fn map_size(zoom: u8, tile_size: u32) -> u64 {
    (tile_size as u64) << zoom
}

/// Distance on the ground represented by a single pixel, in meters.
///
/// # Arguments
///
/// * `latitude` - Latitude in degrees at which the resolution is measured
/// * `map_size` - World map size in pixels (see [`map_size`])
#[inline]
pub fn ground_resolution(latitude: f64, map_size: u64) -> f64 {
    latitude.to_radians().cos() * EARTH_CIRCUMFERENCE / map_size as f64
}

/// Converts a longitude to a world pixel X coordinate.
#[inline]
pub fn longitude_to_pixel_x(longitude: f64, map_size: u64) -> f64 {
    (longitude + 180.0) / 360.0 * map_size as f64
}

/// Converts a latitude to a world pixel Y coordinate.
///
/// Latitudes beyond the Mercator limits are clamped to the map edges.
#[inline]
pub fn latitude_to_pixel_y(latitude: f64, map_size: u64) -> f64 {
    let sin_latitude = latitude.to_radians().sin();
    let size = map_size as f64;
    let pixel_y = (0.5 - ((1.0 + sin_latitude) / (1.0 - sin_latitude)).ln() / (4.0 * PI)) * size;
    pixel_y.clamp(0.0, size)
}

/// Converts a world pixel X coordinate back to a longitude.
#[inline]
pub fn pixel_x_to_longitude(pixel_x: f64, map_size: u64) -> f64 {
    360.0 * (pixel_x / map_size as f64 - 0.5)
}

/// Converts a world pixel Y coordinate back to a latitude.
#[inline]
pub fn pixel_y_to_latitude(pixel_y: f64, map_size: u64) -> f64 {
    let y = 0.5 - pixel_y / map_size as f64;
    90.0 - 360.0 * (-y * 2.0 * PI).exp().atan() / PI
}

/// Longitude of the western edge of tile column `x`.
#[inline]
pub fn tile_x_to_longitude(x: u32, zoom: u8) -> f64 {
    x as f64 / (1u64 << zoom) as f64 * 360.0 - 180.0
}

/// Latitude of the northern edge of tile row `y`.
#[inline]
pub fn tile_y_to_latitude(y: u32, zoom: u8) -> f64 {
    let n = PI - 2.0 * PI * y as f64 / (1u64 << zoom) as f64;
    n.sinh().atan().to_degrees()
}

/// Converts geographic coordinates to the tile containing them.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees (Mercator range)
/// * `lon` - Longitude in degrees (-180.0 to 180.0)
/// * `zoom` - Zoom level (0 to `MAX_ZOOM`)
/// * `tile_size` - Tile edge length in pixels
///
/// # Returns
///
/// A `Result` containing the tile or an error if inputs are invalid.
pub fn to_tile(lat: f64, lon: f64, zoom: u8, tile_size: u32) -> Result<Tile, MercatorError> {
    if !(LATITUDE_MIN..=LATITUDE_MAX).contains(&lat) {
        return Err(MercatorError::InvalidLatitude(lat));
    }
    if !(LONGITUDE_MIN..=LONGITUDE_MAX).contains(&lon) {
        return Err(MercatorError::InvalidLongitude(lon));
    }
    if zoom > MAX_ZOOM {
        return Err(MercatorError::InvalidZoom(zoom));
    }

    let n = 1u64 << zoom;
    let max_index = (n - 1) as f64;

    let x = ((lon + 180.0) / 360.0 * n as f64).floor().min(max_index) as u32;

    let lat_rad = lat.to_radians();
    let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n as f64)
        .floor()
        .clamp(0.0, max_index) as u32;

    Ok(Tile::new(x, y, zoom, tile_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_size_doubles_per_zoom() {
        assert_eq!(map_size(0, 256), 256);
        assert_eq!(map_size(1, 256), 512);
        assert_eq!(map_size(12, 256), 1_048_576);
    }

    #[test]
    fn test_ground_resolution_at_equator_zoom_zero() {
        let resolution = ground_resolution(0.0, map_size(0, 256));
        assert!((resolution - EARTH_CIRCUMFERENCE / 256.0).abs() < 1e-6);
    }

    #[test]
    fn test_ground_resolution_shrinks_with_latitude() {
        let size = map_size(10, 256);
        assert!(ground_resolution(60.0, size) < ground_resolution(0.0, size));
        // cos(60°) = 0.5
        let ratio = ground_resolution(60.0, size) / ground_resolution(0.0, size);
        assert!((ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_new_york_city_at_zoom_16() {
        let tile = to_tile(40.7128, -74.0060, 16, 256).unwrap();
        assert_eq!(tile.y, 24640);
        assert_eq!(tile.x, 19295);
        assert_eq!(tile.zoom, 16);
    }

    #[test]
    fn test_invalid_latitude() {
        let result = to_tile(90.0, 0.0, 10, 256);
        assert!(matches!(
            result.unwrap_err(),
            MercatorError::InvalidLatitude(_)
        ));
    }

    #[test]
    fn test_invalid_zoom() {
        let result = to_tile(0.0, 0.0, 25, 256);
        assert_eq!(result.unwrap_err(), MercatorError::InvalidZoom(25));
    }

    #[test]
    fn test_east_edge_stays_inside_grid() {
        let tile = to_tile(0.0, 180.0, 3, 256).unwrap();
        assert_eq!(tile.x, 7);
    }

    #[test]
    fn test_pixel_roundtrip() {
        let size = map_size(12, 256);
        for (lat, lon) in [(52.5, 13.4), (-33.9, 151.2), (0.0, 0.0)] {
            let x = longitude_to_pixel_x(lon, size);
            let y = latitude_to_pixel_y(lat, size);
            assert!((pixel_x_to_longitude(x, size) - lon).abs() < 1e-9);
            assert!((pixel_y_to_latitude(y, size) - lat).abs() < 1e-9);
        }
    }

    #[test]
    fn test_tile_edges_match_pixel_conversion() {
        let zoom = 8;
        let size = map_size(zoom, 256);
        let lat = tile_y_to_latitude(100, zoom);
        let y = latitude_to_pixel_y(lat, size);
        assert!((y - 100.0 * 256.0).abs() < 1e-6);
        assert_eq!(tile_x_to_longitude(0, zoom), -180.0);
        assert_eq!(tile_x_to_longitude(128, zoom), 0.0);
    }

    #[test]
    fn test_latitude_clamped_to_map() {
        let size = map_size(2, 256);
        assert_eq!(latitude_to_pixel_y(89.9, size), 0.0);
        assert_eq!(latitude_to_pixel_y(-89.9, size), size as f64);
    }
}
