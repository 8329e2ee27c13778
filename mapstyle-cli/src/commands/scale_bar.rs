//! Scale bar command - compute a scale bar and render it to PNG.

use std::path::PathBuf;
use std::sync::Arc;

use mapstyle::display::DisplayModel;
use mapstyle::graphics::skia::{SkiaCanvas, SkiaGraphicFactory};
use mapstyle::mercator::{MercatorError, MAX_ZOOM};
use mapstyle::model::LatLong;
use mapstyle::scalebar::{
    unit_ground_resolution, DistanceUnit, MapPosition, MapScaleBar, ScaleBarLengthAndValue,
    ScaleBarMode, ScaleBarPosition, SharedMapPosition,
};

use super::common::{check_scale, parse_size};
use crate::error::CliError;

/// Arguments for the scale-bar command.
pub struct ScaleBarArgs {
    pub lat: f64,
    pub lon: f64,
    pub zoom: u8,
    pub unit: DistanceUnit,
    pub secondary_unit: DistanceUnit,
    pub single: bool,
    pub position: ScaleBarPosition,
    pub scale: f32,
    pub tile_size: Option<u32>,
    pub size: String,
    pub output: Option<PathBuf>,
}

fn describe(unit: DistanceUnit, bar: ScaleBarLengthAndValue) -> String {
    format!("{} ({} px)", unit.scale_text(bar.value), bar.length)
}

/// Run the scale-bar command.
pub fn run(args: ScaleBarArgs) -> Result<(), CliError> {
    if args.zoom > MAX_ZOOM {
        return Err(MercatorError::InvalidZoom(args.zoom).into());
    }
    let center = LatLong::validated(args.lat, args.lon)?;
    let (width, height) = parse_size(&args.size)?;
    let mut display_model =
        DisplayModel::default().with_device_scale_factor(check_scale(args.scale)?);
    if let Some(tile_size) = args.tile_size {
        if tile_size == 0 {
            return Err(CliError::InvalidArgument(
                "tile size must be positive".to_string(),
            ));
        }
        display_model = display_model.with_fixed_tile_size(tile_size);
    }

    let map_position = Arc::new(SharedMapPosition::new(MapPosition::new(center, args.zoom)));
    let factory = SkiaGraphicFactory::new(".");
    let mut bar = MapScaleBar::new(map_position, &factory, display_model)?;
    bar.set_distance_unit(args.unit);
    bar.set_secondary_distance_unit(args.secondary_unit);
    bar.set_position(args.position);
    if args.single {
        bar.set_mode(ScaleBarMode::Single);
    }

    let mut view = SkiaCanvas::new(width, height)?;
    bar.draw(&mut view);

    let resolution = unit_ground_resolution(
        args.lat,
        args.zoom,
        display_model.tile_size(),
        DistanceUnit::Metric,
    );
    println!("Position: {}, {} at zoom {}", args.lat, args.lon, args.zoom);
    println!("  Ground resolution: {:.3} m/px", resolution);

    let Some(values) = bar.values() else {
        return Err(CliError::InvalidArgument(
            "scale bar produced no values".to_string(),
        ));
    };
    println!("  Primary:   {}", describe(args.unit, values.primary));
    if let Some(secondary) = values.secondary {
        println!("  Secondary: {}", describe(args.secondary_unit, secondary));
    }

    if let Some(output) = args.output {
        view.save_png(&output)?;
        println!();
        println!("Wrote {}x{} view to {}", width, height, output.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_uses_unit_text() {
        let bar = ScaleBarLengthAndValue {
            length: 85,
            value: 2000,
        };
        assert_eq!(describe(DistanceUnit::Metric, bar), "2 km (85 px)");
        assert_eq!(describe(DistanceUnit::Imperial, bar), "2000 ft (85 px)");
    }

    #[test]
    fn test_rejects_zoom_above_maximum() {
        let err = run(ScaleBarArgs {
            lat: 0.0,
            lon: 0.0,
            zoom: MAX_ZOOM + 1,
            unit: DistanceUnit::Metric,
            secondary_unit: DistanceUnit::Imperial,
            single: false,
            position: ScaleBarPosition::BottomLeft,
            scale: 1.0,
            tile_size: None,
            size: "256x256".to_string(),
            output: None,
        })
        .unwrap_err();
        assert!(matches!(err, CliError::Coordinates(MercatorError::InvalidZoom(_))));
    }

    #[test]
    fn test_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("bar.png");
        run(ScaleBarArgs {
            lat: 52.5,
            lon: 13.4,
            zoom: 12,
            unit: DistanceUnit::Nautical,
            secondary_unit: DistanceUnit::Metric,
            single: true,
            position: ScaleBarPosition::TopCenter,
            scale: 2.0,
            tile_size: Some(512),
            size: "320x200".to_string(),
            output: Some(output.clone()),
        })
        .unwrap();
        assert!(output.exists());
    }
}
