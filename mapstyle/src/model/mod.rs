//! Map data model
//!
//! Value types shared by the engine: tags, pixel geometry, geographic
//! coordinates, tiles and the features (POIs and ways) instructions render.

mod feature;
mod geo;
mod geometry;
mod tag;
mod tile;

pub use feature::{PointOfInterest, Way};
pub use geo::{BoundingBox, LatLong};
pub use geometry::{Point, Rectangle};
pub use tag::{key_code, Tag};
pub use tile::Tile;
