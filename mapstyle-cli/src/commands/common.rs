//! Common types and utilities shared across CLI commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::ValueEnum;
use mapstyle::display::DisplayModel;
use mapstyle::graphics::skia::SkiaGraphicFactory;
use mapstyle::model::Tag;
use mapstyle::theme::RenderTheme;

use crate::error::CliError;

/// Kind of synthetic feature rendered by `inspect`.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum FeatureKind {
    /// A point of interest at the given coordinates
    Poi,
    /// A closed square way around the given coordinates
    Way,
}

/// Directory that theme resources are resolved against.
pub fn resource_root(theme: &Path, resources: Option<PathBuf>) -> PathBuf {
    resources.unwrap_or_else(|| {
        theme
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

/// Loads a theme with the tiny-skia backend.
pub fn load_theme(
    theme: &Path,
    resources: Option<PathBuf>,
    display_model: DisplayModel,
) -> Result<RenderTheme, CliError> {
    let factory = Arc::new(SkiaGraphicFactory::new(resource_root(theme, resources)));
    RenderTheme::load_from(theme, factory, display_model).map_err(|error| CliError::Theme {
        path: theme.to_path_buf(),
        error,
    })
}

/// Parses `key=value` arguments.
pub fn parse_tags(pairs: &[String]) -> Result<Vec<Tag>, CliError> {
    pairs
        .iter()
        .map(|pair| {
            Tag::parse(pair).ok_or_else(|| {
                CliError::InvalidArgument(format!("tag '{}' is not of the form key=value", pair))
            })
        })
        .collect()
}

/// Parses a `WIDTHxHEIGHT` size.
pub fn parse_size(size: &str) -> Result<(u32, u32), CliError> {
    let invalid = || CliError::InvalidArgument(format!("size '{}' is not WIDTHxHEIGHT", size));
    let (w, h) = size.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: u32 = w.trim().parse().map_err(|_| invalid())?;
    let height: u32 = h.trim().parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

/// Validates a user scale factor.
pub fn check_scale(scale: f32) -> Result<f32, CliError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(CliError::InvalidArgument(format!(
            "scale factor must be positive, got {}",
            scale
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        let tags = parse_tags(&["amenity=cafe".to_string(), "name = Blue Bottle".to_string()])
            .unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1].key, "name");
        assert_eq!(tags[1].value, "Blue Bottle");
        assert!(parse_tags(&["amenity".to_string()]).is_err());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("400x300").unwrap(), (400, 300));
        assert_eq!(parse_size("64X32").unwrap(), (64, 32));
        assert!(parse_size("0x10").is_err());
        assert!(parse_size("400").is_err());
        assert!(parse_size("ax2").is_err());
    }

    #[test]
    fn test_resource_root_defaults_to_theme_dir() {
        assert_eq!(
            resource_root(Path::new("themes/osm.ini"), None),
            PathBuf::from("themes")
        );
        assert_eq!(resource_root(Path::new("osm.ini"), None), PathBuf::from("."));
        assert_eq!(
            resource_root(Path::new("osm.ini"), Some(PathBuf::from("icons"))),
            PathBuf::from("icons")
        );
    }

    #[test]
    fn test_check_scale() {
        assert_eq!(check_scale(2.0).unwrap(), 2.0);
        assert!(check_scale(0.0).is_err());
        assert!(check_scale(f32::NAN).is_err());
    }
}
