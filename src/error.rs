//! Error types for gesture recognition.
//!
//! Errors only surface while building configuration or loading templates.
//! Capture and classification never fail: degenerate input resolves to
//! [`GestureKind::Invalid`](crate::GestureKind::Invalid) instead.

use thiserror::Error;

/// Main error type for gesture recognition setup.
#[derive(Error, Debug)]
pub enum GestureError {
    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A template record is malformed.
    #[error("Invalid template '{name}': {reason}")]
    InvalidTemplate { name: String, reason: String },

    /// A template pattern references a bin outside `[0, bins)`.
    #[error("Template '{name}' uses direction {direction}, but only {bins} bins are configured")]
    DirectionOutOfRange {
        name: String,
        direction: usize,
        bins: usize,
    },

    /// Template configuration could not be parsed.
    #[cfg(feature = "serde")]
    #[error("Template parse error: {0}")]
    TemplateParse(#[from] serde_json::Error),
}

/// Result type alias for gesture recognition operations.
pub type Result<T> = std::result::Result<T, GestureError>;

impl GestureError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid template error.
    #[must_use]
    pub fn invalid_template(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a direction out of range error.
    #[must_use]
    pub fn direction_out_of_range(name: impl Into<String>, direction: usize, bins: usize) -> Self {
        Self::DirectionOutOfRange {
            name: name.into(),
            direction,
            bins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GestureError::direction_out_of_range("Magic", 9, 8);
        let msg = err.to_string();
        assert!(msg.contains("Magic"));
        assert!(msg.contains('9'));
        assert!(msg.contains('8'));
    }

    #[test]
    fn test_error_constructors() {
        let err = GestureError::invalid_template("Heal", "empty name");
        assert!(matches!(err, GestureError::InvalidTemplate { .. }));

        let err = GestureError::invalid_config("resample_count must be at least 2");
        assert!(err.to_string().starts_with("Invalid configuration"));
    }
}
