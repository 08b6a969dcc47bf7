//! Error types for geometry and style operations.

use thiserror::Error;

/// Result type alias for ortho3d operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised synchronously by the core.
///
/// Operations against a primitive that is not attached to a scene are not
/// errors: they fall back to the identity view.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Normalizing a vector of zero length
    #[error("cannot normalize a zero-length vector")]
    DivideByZero,

    /// Fan triangulation needs at least three boundary points
    #[error("fan triangulation needs 3 or more points, got {given}")]
    InsufficientPoints { given: usize },

    /// An enumerated style option was given a value outside its set
    #[error("invalid value {value:?} for option `{option}`")]
    InvalidOption { option: &'static str, value: String },
}

impl Error {
    pub(crate) fn invalid_option(option: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidOption {
            option,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::InsufficientPoints { given: 2 }.to_string(),
            "fan triangulation needs 3 or more points, got 2"
        );
        assert_eq!(
            Error::invalid_option("arrow", "diagonal").to_string(),
            "invalid value \"diagonal\" for option `arrow`"
        );
    }
}
