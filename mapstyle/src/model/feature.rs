//! Map features handed to render instructions

use super::{LatLong, Point, Tag, Tile};

/// A point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    pub layer: i8,
    pub tags: Vec<Tag>,
    pub position: LatLong,
}

impl PointOfInterest {
    pub fn new(layer: i8, tags: Vec<Tag>, position: LatLong) -> Self {
        Self {
            layer,
            tags,
            position,
        }
    }

    /// Position of the POI relative to the top-left corner of `tile`.
    pub fn pixel_position(&self, tile: &Tile) -> Point {
        let map_size = tile.map_size();
        let origin = tile.origin();
        Point::new(
            crate::mercator::longitude_to_pixel_x(self.position.longitude, map_size) - origin.x,
            crate::mercator::latitude_to_pixel_y(self.position.latitude, map_size) - origin.y,
        )
    }
}

/// A way (polyline or polygon) prepared for one tile.
///
/// `coordinates` are in pixels relative to the top-left corner of the tile
/// being rendered. `upper_left` is the tile whose world origin anchors
/// bitmap shaders so that patterns line up across tile borders.
#[derive(Debug, Clone, PartialEq)]
pub struct Way {
    pub layer: i8,
    pub tags: Vec<Tag>,
    pub coordinates: Vec<Vec<Point>>,
    pub upper_left: Tile,
}

impl Way {
    pub fn new(layer: i8, tags: Vec<Tag>, coordinates: Vec<Vec<Point>>, upper_left: Tile) -> Self {
        Self {
            layer,
            tags,
            coordinates,
            upper_left,
        }
    }

    /// World pixel origin used to shift bitmap shaders.
    pub fn shader_origin(&self) -> Point {
        self.upper_left.origin()
    }

    /// True when the outer ring is closed.
    pub fn is_closed(&self) -> bool {
        match self.coordinates.first() {
            Some(ring) if ring.len() > 2 => ring.first() == ring.last(),
            _ => false,
        }
    }

    /// Average of the outer ring's vertices, used to anchor area labels.
    pub fn center(&self) -> Option<Point> {
        let ring = self.coordinates.first()?;
        if ring.is_empty() {
            return None;
        }
        let (sx, sy) = ring
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        let n = ring.len() as f64;
        Some(Point::new(sx / n, sy / n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_closed_way() {
        let way = Way::new(0, vec![], vec![square()], Tile::new(0, 0, 1, 256));
        assert!(way.is_closed());
        let open = Way::new(
            0,
            vec![],
            vec![vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]],
            Tile::new(0, 0, 1, 256),
        );
        assert!(!open.is_closed());
    }

    #[test]
    fn test_shader_origin_follows_upper_left_tile() {
        let way = Way::new(0, vec![], vec![square()], Tile::new(2, 1, 3, 256));
        assert_eq!(way.shader_origin(), Point::new(512.0, 256.0));
    }

    #[test]
    fn test_center_of_empty_way() {
        let way = Way::new(0, vec![], vec![], Tile::new(0, 0, 0, 256));
        assert!(way.center().is_none());
    }

    #[test]
    fn test_poi_pixel_position_inside_tile() {
        let tile = crate::mercator::to_tile(52.5, 13.4, 12, 256).unwrap();
        let poi = PointOfInterest::new(0, vec![], LatLong::new(52.5, 13.4));
        let p = poi.pixel_position(&tile);
        assert!((0.0..256.0).contains(&p.x));
        assert!((0.0..256.0).contains(&p.y));
    }
}
