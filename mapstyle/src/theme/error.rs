//! Theme configuration errors

use thiserror::Error;

/// Errors raised while loading a render theme.
///
/// All of these are fatal for the theme being loaded.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The theme file could not be read or parsed
    #[error("Failed to read theme file: {0}")]
    Read(#[from] ini::Error),

    /// The theme text is not valid INI
    #[error("Failed to parse theme: {0}")]
    Parse(#[from] ini::ParseError),

    /// Section names an element that does not exist
    #[error("Unknown theme element: [{0}]")]
    UnknownElement(String),

    /// Two sections share the same name
    #[error("Duplicate theme section: [{0}]")]
    DuplicateSection(String),

    /// Attributes appear before the first section header
    #[error("Attribute '{0}' is not inside a theme section")]
    AttributeOutsideSection(String),

    /// Attribute is not recognized for the element
    #[error("Unknown attribute: [{element}] {name} = '{value}'")]
    UnknownAttribute {
        element: String,
        name: String,
        value: String,
    },

    /// Attribute value could not be interpreted
    #[error("Invalid value: [{element}] {name} = '{value}' - {reason}")]
    InvalidValue {
        element: String,
        name: String,
        value: String,
        reason: String,
    },

    /// Mandatory attribute is absent
    #[error("Missing attribute '{name}' in [{element}]")]
    MissingAttribute { element: String, name: String },

    /// Two symbols declare the same id
    #[error("Duplicate symbol id '{id}' in [{element}]")]
    DuplicateSymbolId { element: String, id: String },
}
