//! Map tiles

use super::{BoundingBox, Point, Rectangle};
use crate::mercator;
use std::fmt;

/// A square map tile at a zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
    pub tile_size: u32,
}

impl Tile {
    pub const fn new(x: u32, y: u32, zoom: u8, tile_size: u32) -> Self {
        Self {
            x,
            y,
            zoom,
            tile_size,
        }
    }

    /// World map size in pixels at this tile's zoom level.
    pub fn map_size(&self) -> u64 {
        mercator::map_size(self.zoom, self.tile_size)
    }

    /// Top-left corner of the tile in world pixel coordinates.
    pub fn origin(&self) -> Point {
        Point::new(
            self.x as f64 * self.tile_size as f64,
            self.y as f64 * self.tile_size as f64,
        )
    }

    /// The tile's extent in world pixel coordinates.
    pub fn pixel_rect(&self) -> Rectangle {
        let origin = self.origin();
        let size = self.tile_size as f64;
        Rectangle::new(origin.x, origin.y, origin.x + size, origin.y + size)
    }

    /// The geographic extent of the tile.
    pub fn bounding_box(&self) -> BoundingBox {
        let north = mercator::tile_y_to_latitude(self.y, self.zoom);
        let south = mercator::tile_y_to_latitude(self.y + 1, self.zoom);
        let west = mercator::tile_x_to_longitude(self.x, self.zoom);
        let east = mercator::tile_x_to_longitude(self.x + 1, self.zoom);
        BoundingBox::new(south, west, north, east)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}@{}", self.zoom, self.x, self.y, self.tile_size)
    }
}
