//! Map scale bar
//!
//! The scale bar shows the ground distance of a round number of units for
//! the current map latitude and zoom level. [`calculate_scale_bar_length_and_value`]
//! performs the search over a unit's table of round values; [`MapScaleBar`]
//! wraps it into an overlay that only recomputes when the view has moved
//! far enough to change the result.

mod map_scale_bar;
mod solver;
mod units;

pub use map_scale_bar::{
    MapPosition, MapScaleBar, MapViewPosition, ScaleBarMode, ScaleBarPosition, ScaleBarValues,
    SharedMapPosition,
};
pub use solver::{calculate_scale_bar_length_and_value, unit_ground_resolution, ScaleBarLengthAndValue};
pub use units::DistanceUnit;
