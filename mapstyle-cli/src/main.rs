//! mapstyle CLI - Command-line interface
//!
//! Validates render themes, shows what a theme draws for a tagged feature
//! and renders scale bars to PNG.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mapstyle::logging::{default_log_dir, default_log_file, init_logging};
use mapstyle::scalebar::{DistanceUnit, ScaleBarPosition};

use commands::common::FeatureKind;
use error::CliError;

#[derive(Parser)]
#[command(name = "mapstyle")]
#[command(version = mapstyle::VERSION)]
#[command(about = "Render-theme tools for vector map tiles", long_about = None)]
struct Cli {
    /// Directory for the session log file
    #[arg(long, global = true, default_value = default_log_dir())]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a theme and list its instructions
    Validate {
        /// Theme file (INI)
        theme: PathBuf,

        /// Directory that symbol and pattern paths are relative to
        /// (defaults to the theme's directory)
        #[arg(long)]
        resources: Option<PathBuf>,

        /// User scale factor applied on top of the device factor
        #[arg(long, default_value = "1.0")]
        scale: f32,

        /// Decode every symbol and pattern resource
        #[arg(long)]
        check_resources: bool,
    },

    /// Print the drawing primitives a theme produces for one feature
    Inspect {
        /// Theme file (INI)
        theme: PathBuf,

        /// Zoom level to prepare and render at
        #[arg(long, default_value = "14")]
        zoom: u8,

        /// Feature tag as key=value (repeatable)
        #[arg(long = "tag", value_name = "KEY=VALUE")]
        tags: Vec<String>,

        /// Feature kind
        #[arg(long, value_enum, default_value = "poi")]
        kind: FeatureKind,

        /// Only apply instructions in these categories (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Latitude of the feature in decimal degrees
        #[arg(long, default_value = "47.5")]
        lat: f64,

        /// Longitude of the feature in decimal degrees
        #[arg(long, default_value = "11.5")]
        lon: f64,

        /// Directory that symbol and pattern paths are relative to
        #[arg(long)]
        resources: Option<PathBuf>,

        /// User scale factor applied on top of the device factor
        #[arg(long, default_value = "1.0")]
        scale: f32,
    },

    /// Compute a scale bar and optionally render it to a PNG file
    ScaleBar {
        /// Latitude in decimal degrees
        #[arg(long)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, default_value = "0.0")]
        lon: f64,

        /// Zoom level
        #[arg(long)]
        zoom: u8,

        /// Primary unit: metric, imperial or nautical
        #[arg(long, default_value = "metric")]
        unit: DistanceUnit,

        /// Secondary unit drawn below the primary bar
        #[arg(long, default_value = "imperial")]
        secondary_unit: DistanceUnit,

        /// Draw the primary unit only
        #[arg(long)]
        single: bool,

        /// Anchor: bottom_left, bottom_center, bottom_right, top_left, ...
        #[arg(long, default_value = "bottom_left")]
        position: ScaleBarPosition,

        /// Device scale factor
        #[arg(long, default_value = "1.0")]
        scale: f32,

        /// Tile size in pixels (derived from the scale factor when omitted)
        #[arg(long)]
        tile_size: Option<u32>,

        /// View size as WIDTHxHEIGHT
        #[arg(long, default_value = "256x256")]
        size: String,

        /// Write the rendered view to this PNG file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let _guard = match init_logging(&cli.log_dir, default_log_file()) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e).exit(),
    };
    tracing::debug!(version = mapstyle::VERSION, "mapstyle CLI started");

    let result = match cli.command {
        Commands::Validate {
            theme,
            resources,
            scale,
            check_resources,
        } => commands::validate::run(commands::validate::ValidateArgs {
            theme,
            resources,
            scale,
            check_resources,
        }),
        Commands::Inspect {
            theme,
            zoom,
            tags,
            kind,
            categories,
            lat,
            lon,
            resources,
            scale,
        } => commands::inspect::run(commands::inspect::InspectArgs {
            theme,
            zoom,
            tags,
            kind,
            categories,
            lat,
            lon,
            resources,
            scale,
        }),
        Commands::ScaleBar {
            lat,
            lon,
            zoom,
            unit,
            secondary_unit,
            single,
            position,
            scale,
            tile_size,
            size,
            output,
        } => commands::scale_bar::run(commands::scale_bar::ScaleBarArgs {
            lat,
            lon,
            zoom,
            unit,
            secondary_unit,
            single,
            position,
            scale,
            tile_size,
            size,
            output,
        }),
    };

    if let Err(e) = result {
        e.exit();
    }
}
