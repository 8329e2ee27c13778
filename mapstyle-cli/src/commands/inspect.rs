//! Inspect command - print what a theme draws for one tagged feature.

use std::collections::HashSet;
use std::path::PathBuf;

use mapstyle::display::DisplayModel;
use mapstyle::mercator;
use mapstyle::model::{LatLong, Point, PointOfInterest, Tag, Tile, Way};
use mapstyle::render::{RecordingCallback, RenderContext};
use mapstyle::theme::RenderInstruction;

use super::common::{check_scale, load_theme, parse_tags, FeatureKind};
use crate::error::CliError;

/// Half the edge length of the synthetic square way, in pixels.
const WAY_HALF_SIZE: f64 = 32.0;

/// Arguments for the inspect command.
pub struct InspectArgs {
    pub theme: PathBuf,
    pub zoom: u8,
    pub tags: Vec<String>,
    pub kind: FeatureKind,
    pub categories: Vec<String>,
    pub lat: f64,
    pub lon: f64,
    pub resources: Option<PathBuf>,
    pub scale: f32,
}

/// A closed square around `center`, in pixels relative to `tile`.
fn square_around(center: Point, tags: Vec<Tag>, tile: Tile) -> Way {
    let (l, t) = (center.x - WAY_HALF_SIZE, center.y - WAY_HALF_SIZE);
    let (r, b) = (center.x + WAY_HALF_SIZE, center.y + WAY_HALF_SIZE);
    let ring = vec![
        Point::new(l, t),
        Point::new(r, t),
        Point::new(r, b),
        Point::new(l, b),
        Point::new(l, t),
    ];
    Way::new(0, tags, vec![ring], tile)
}

/// Run the inspect command.
pub fn run(args: InspectArgs) -> Result<(), CliError> {
    let display_model = DisplayModel::default().with_user_scale_factor(check_scale(args.scale)?);
    let tags = parse_tags(&args.tags)?;
    let position = LatLong::validated(args.lat, args.lon)?;
    let tile = mercator::to_tile(args.lat, args.lon, args.zoom, display_model.tile_size())?;

    let theme = load_theme(&args.theme, args.resources, display_model)?;
    theme.prepare(1.0, args.zoom..=args.zoom);

    let categories: HashSet<String> = args.categories.into_iter().collect();
    let instructions: Vec<&RenderInstruction> = if categories.is_empty() {
        theme.instructions().iter().collect()
    } else {
        theme.instructions_in(&categories).collect()
    };

    let context = RenderContext::new(tile);
    let poi = PointOfInterest::new(0, tags, position);
    let mut callback = RecordingCallback::new();

    match args.kind {
        FeatureKind::Poi => {
            for instruction in &instructions {
                instruction.render_node(&mut callback, &context, &poi);
            }
        }
        FeatureKind::Way => {
            let center = poi.pixel_position(&tile);
            let way = square_around(center, poi.tags.clone(), tile);
            for instruction in &instructions {
                instruction.render_way(&mut callback, &context, &way);
            }
        }
    }

    println!("Tile: {}", tile);
    println!(
        "Feature: {:?} [{}]",
        args.kind,
        poi.tags
            .iter()
            .map(Tag::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "Instructions applied: {} of {}",
        instructions.len(),
        theme.levels()
    );
    println!();

    if callback.is_empty() {
        println!("(nothing drawn)");
    }
    for call in callback.take() {
        println!("  {}", call);
    }

    theme.destroy();
    Ok(())
}
