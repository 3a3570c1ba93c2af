//! Error types for the constellation core.

use thiserror::Error;

/// Errors produced by field construction, parameter handling and lookups.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The drawing surface had a zero, negative or non-finite extent, or
    /// did not match the size a seed was recorded at.
    #[error("invalid dimensions: width {width}, height {height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// A field parameter was out of its allowed range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A page preset name was not recognized.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// Snapshot or file output failed.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_includes_both_extents() {
        let err = FieldError::InvalidDimensions {
            width: 0.0,
            height: 600.0,
        };
        let msg = format!("{err}");
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
        assert!(msg.contains("600"), "missing height in: {msg}");
    }

    #[test]
    fn invalid_param_includes_name_and_reason() {
        let err = FieldError::InvalidParam {
            name: "connection_distance".into(),
            reason: "must be positive".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("connection_distance"), "missing name in: {msg}");
        assert!(msg.contains("must be positive"), "missing reason in: {msg}");
    }

    #[test]
    fn invalid_color_includes_message() {
        let err = FieldError::InvalidColor("bad hex".into());
        assert!(format!("{err}").contains("bad hex"));
    }

    #[test]
    fn unknown_preset_includes_name() {
        let err = FieldError::UnknownPreset("about".into());
        assert!(format!("{err}").contains("about"));
    }

    #[test]
    fn field_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldError>();
    }

    #[test]
    fn field_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FieldError>();
    }
}
