//! Error types for the HueVault color engine.

use thiserror::Error;

/// Errors produced by color engine operations.
///
/// Every variant describes caller input that could not be used. Fallback
/// behaviors (count clamping, exhausted sampling, unknown deficiency kinds on
/// a single color) are not errors and never surface here.
#[derive(Debug, Error, PartialEq)]
pub enum HueError {
    /// A color string could not be resolved to three byte channels.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A numeric parameter was out of range and could not be coerced.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A deficiency kind was required but not recognized.
    #[error("unknown deficiency kind: {0}")]
    UnknownDeficiency(String),

    /// A hue scheme name was not recognized.
    #[error("unknown scheme: {0}")]
    UnknownScheme(String),
}

impl HueError {
    /// Shorthand for [`HueError::InvalidParameter`].
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        HueError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// True for every variant: all engine errors are invalid-input errors.
    ///
    /// Hosts mapping errors to responses (HTTP 400, exit codes) can rely on
    /// this instead of matching variants.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            HueError::InvalidColor(_)
            | HueError::InvalidParameter { .. }
            | HueError::UnknownDeficiency(_)
            | HueError::UnknownScheme(_) => true,
        }
    }
}
