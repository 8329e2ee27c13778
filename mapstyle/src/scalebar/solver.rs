//! Scale bar length and value search

use super::DistanceUnit;
use crate::mercator;

/// Space kept free at the bitmap edge, in pixels.
const LENGTH_MARGIN: u32 = 10;

/// A chosen bar: its length in pixels and the distance it represents in the
/// unit's base unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleBarLengthAndValue {
    pub length: u32,
    pub value: u32,
}

/// Ground distance covered by one pixel, in the unit's base unit.
///
/// Zoom levels above [`mercator::MAX_ZOOM`] are measured at `MAX_ZOOM`.
pub fn unit_ground_resolution(latitude: f64, zoom: u8, tile_size: u32, unit: DistanceUnit) -> f64 {
    let map_size = mercator::map_size(zoom.min(mercator::MAX_ZOOM), tile_size);
    mercator::ground_resolution(latitude, map_size) / unit.meter_ratio()
}

/// Picks the largest round value whose bar is shorter than
/// `bitmap_width - 10` pixels.
///
/// Falls back to the smallest value of the table when nothing fits.
pub fn calculate_scale_bar_length_and_value(
    latitude: f64,
    zoom: u8,
    tile_size: u32,
    unit: DistanceUnit,
    bitmap_width: u32,
) -> ScaleBarLengthAndValue {
    let resolution = unit_ground_resolution(latitude, zoom, tile_size, unit);
    let limit = bitmap_width.saturating_sub(LENGTH_MARGIN);

    let mut chosen = ScaleBarLengthAndValue {
        length: 0,
        value: 0,
    };
    for &value in unit.scale_bar_values() {
        chosen = ScaleBarLengthAndValue {
            length: (value as f64 / resolution) as u32,
            value,
        };
        if chosen.length < limit {
            break;
        }
    }
    chosen
}
