//! Geographic coordinates

use crate::mercator::{
    MercatorError, LATITUDE_MAX, LATITUDE_MIN, LONGITUDE_MAX, LONGITUDE_MIN,
};

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatLong {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLong {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Creates a position, rejecting coordinates outside the Mercator range.
    pub fn validated(latitude: f64, longitude: f64) -> Result<Self, MercatorError> {
        if !(LATITUDE_MIN..=LATITUDE_MAX).contains(&latitude) {
            return Err(MercatorError::InvalidLatitude(latitude));
        }
        if !(LONGITUDE_MIN..=LONGITUDE_MAX).contains(&longitude) {
            return Err(MercatorError::InvalidLongitude(longitude));
        }
        Ok(Self::new(latitude, longitude))
    }
}

/// A latitude/longitude aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub min_longitude: f64,
    pub max_latitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    pub const fn new(
        min_latitude: f64,
        min_longitude: f64,
        max_latitude: f64,
        max_longitude: f64,
    ) -> Self {
        Self {
            min_latitude,
            min_longitude,
            max_latitude,
            max_longitude,
        }
    }

    pub fn center(&self) -> LatLong {
        LatLong::new(
            (self.min_latitude + self.max_latitude) / 2.0,
            (self.min_longitude + self.max_longitude) / 2.0,
        )
    }

    pub fn contains(&self, position: &LatLong) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&position.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&position.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_rejects_out_of_range() {
        assert!(LatLong::validated(86.0, 0.0).is_err());
        assert!(LatLong::validated(0.0, 181.0).is_err());
        assert!(LatLong::validated(52.5, 13.4).is_ok());
    }

    #[test]
    fn test_bounding_box_contains_center() {
        let bbox = BoundingBox::new(50.0, 10.0, 51.0, 11.0);
        assert!(bbox.contains(&bbox.center()));
        assert!(!bbox.contains(&LatLong::new(49.9, 10.5)));
    }
}
