//! Mercator constants and error definitions

use std::fmt;

/// Circumference of the earth at the equator in meters.
pub const EARTH_CIRCUMFERENCE: f64 = 40_075_016.686;

/// Web Mercator valid latitude range
pub const LATITUDE_MAX: f64 = 85.051_128_779_806_59;
pub const LATITUDE_MIN: f64 = -LATITUDE_MAX;

/// Valid longitude range
pub const LONGITUDE_MIN: f64 = -180.0;
pub const LONGITUDE_MAX: f64 = 180.0;

/// Highest zoom level the engine derives paints for.
pub const MAX_ZOOM: u8 = 24;

/// Errors that can occur during coordinate conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum MercatorError {
    /// Latitude is outside the Web Mercator range
    InvalidLatitude(f64),
    /// Longitude is outside valid range (-180.0 to 180.0)
    InvalidLongitude(f64),
    /// Zoom level is above `MAX_ZOOM`
    InvalidZoom(u8),
}

impl fmt::Display for MercatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MercatorError::InvalidLatitude(lat) => {
                write!(
                    f,
                    "Invalid latitude: {} (must be between {} and {})",
                    lat, LATITUDE_MIN, LATITUDE_MAX
                )
            }
            MercatorError::InvalidLongitude(lon) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between {} and {})",
                    lon, LONGITUDE_MIN, LONGITUDE_MAX
                )
            }
            MercatorError::InvalidZoom(zoom) => {
                write!(
                    f,
                    "Invalid zoom level: {} (must be between 0 and {})",
                    zoom, MAX_ZOOM
                )
            }
        }
    }
}

impl std::error::Error for MercatorError {}
