//! Definition loading errors

use completion_types::DelimiterError;
use thiserror::Error;

/// Result type for definition loading
pub type DefinitionResult<T> = Result<T, DefinitionError>;

/// Reasons a definition source is rejected
///
/// Any of these aborts the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("Failed to read definitions: {0}")]
    Io(String),

    #[error("Malformed definitions: {0}")]
    Malformed(String),

    #[error("Keyword '{keyword}' is missing required attribute '{attribute}'")]
    MissingAttribute {
        keyword: String,
        attribute: &'static str,
    },

    #[error("Keyword '{keyword}' has unknown completion type '{type_name}'")]
    UnknownType { keyword: String, type_name: String },

    #[error("Template '{keyword}' has more than one ${{cursor}} marker")]
    DuplicateEndMarker { keyword: String },

    #[error("Invalid environment: {0}")]
    Delimiters(#[from] DelimiterError),
}
