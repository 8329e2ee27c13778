//! Distance units shown by the scale bar

use crate::graphics::keyword_enum;

const ONE_KILOMETER: u32 = 1000;
const ONE_MILE: u32 = 5280;
const ONE_NAUTICAL_MILE: u32 = 1852;

const METRIC_VALUES: &[u32] = &[
    10_000_000, 5_000_000, 2_000_000, 1_000_000, 500_000, 200_000, 100_000, 50_000, 20_000,
    10_000, 5_000, 2_000, 1_000, 500, 200, 100, 50, 20, 10, 5, 2, 1,
];

/// Feet, stepping through round miles above one mile.
const IMPERIAL_VALUES: &[u32] = &[
    26_400_000, 10_560_000, 5_280_000, 2_640_000, 1_056_000, 528_000, 264_000, 105_600, 52_800,
    26_400, 10_560, 5_280, 2_000, 1_000, 500, 200, 100, 50, 20, 10, 5, 2, 1,
];

/// Metres, stepping through round nautical miles above half a mile.
const NAUTICAL_VALUES: &[u32] = &[
    9_260_000, 3_704_000, 1_852_000, 926_000, 370_400, 185_200, 92_600, 37_040, 18_520, 9_260,
    3_704, 1_852, 926, 500, 200, 100, 50, 20, 10, 5, 2, 1,
];

keyword_enum! {
    /// Unit system of a scale bar.
    pub enum DistanceUnit("distance unit") {
        Metric => "metric",
        Imperial => "imperial",
        Nautical => "nautical",
    }
}

impl Default for DistanceUnit {
    fn default() -> Self {
        DistanceUnit::Metric
    }
}

impl DistanceUnit {
    /// Metres per base unit of [`scale_bar_values`](Self::scale_bar_values).
    pub fn meter_ratio(&self) -> f64 {
        match self {
            DistanceUnit::Metric | DistanceUnit::Nautical => 1.0,
            DistanceUnit::Imperial => 0.3048,
        }
    }

    /// Candidate bar values in base units, largest first.
    pub fn scale_bar_values(&self) -> &'static [u32] {
        match self {
            DistanceUnit::Metric => METRIC_VALUES,
            DistanceUnit::Imperial => IMPERIAL_VALUES,
            DistanceUnit::Nautical => NAUTICAL_VALUES,
        }
    }

    /// Label for a bar value in base units.
    pub fn scale_text(&self, value: u32) -> String {
        match self {
            DistanceUnit::Metric if value < ONE_KILOMETER => format!("{} m", value),
            DistanceUnit::Metric => format!("{} km", value / ONE_KILOMETER),
            DistanceUnit::Imperial if value < ONE_MILE => format!("{} ft", value),
            DistanceUnit::Imperial => format!("{} mi", value / ONE_MILE),
            DistanceUnit::Nautical if value < ONE_NAUTICAL_MILE / 2 => format!("{} m", value),
            DistanceUnit::Nautical if value == ONE_NAUTICAL_MILE / 2 => "0.5 nmi".to_string(),
            DistanceUnit::Nautical => format!("{} nmi", value / ONE_NAUTICAL_MILE),
        }
    }
}
