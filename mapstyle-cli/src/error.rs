//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use mapstyle::error::{GraphicsError, MercatorError, ThemeError};

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(std::io::Error),
    /// Theme file could not be loaded
    Theme { path: PathBuf, error: ThemeError },
    /// Coordinates outside the projection
    Coordinates(MercatorError),
    /// Drawing or image output failed
    Graphics(GraphicsError),
    /// Argument values that clap cannot check on its own
    InvalidArgument(String),
    /// Theme resources that could not be decoded
    Resources(Vec<String>),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Theme {
                error: ThemeError::UnknownAttribute { .. } | ThemeError::UnknownElement(_),
                ..
            } => {
                eprintln!();
                eprintln!("Supported elements: area, caption, circle, hillshading, line,");
                eprintln!("line-symbol, path-text, symbol (plus the [theme] settings section).");
                eprintln!("Section names take the form [element] or [element.name].");
            }
            CliError::Theme {
                error: ThemeError::Read(_),
                ..
            } => {
                eprintln!();
                eprintln!("Check that the theme path exists and is readable.");
            }
            CliError::Resources(_) => {
                eprintln!();
                eprintln!("Resource paths are resolved against --resources, or the");
                eprintln!("theme's directory when it is not given.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::Theme { path, error } => {
                write!(f, "Failed to load theme '{}': {}", path.display(), error)
            }
            CliError::Coordinates(e) => write!(f, "Invalid coordinates: {}", e),
            CliError::Graphics(e) => write!(f, "Graphics error: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Resources(failed) => write!(
                f,
                "{} resource(s) could not be decoded: {}",
                failed.len(),
                failed.join(", ")
            ),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::LoggingInit(e) => Some(e),
            CliError::Theme { error, .. } => Some(error),
            CliError::Coordinates(e) => Some(e),
            CliError::Graphics(e) => Some(e),
            CliError::InvalidArgument(_) | CliError::Resources(_) => None,
        }
    }
}

impl From<MercatorError> for CliError {
    fn from(e: MercatorError) -> Self {
        CliError::Coordinates(e)
    }
}

impl From<GraphicsError> for CliError {
    fn from(e: GraphicsError) -> Self {
        CliError::Graphics(e)
    }
}
