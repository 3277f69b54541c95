//! Error types for core models.

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while building colors, overlays or configuration.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A color channel was NaN, infinite or outside `[0, 1]`
    #[error("invalid {channel} channel: {value}")]
    InvalidChannel {
        /// Channel name
        channel: &'static str,
        /// Offending value
        value: f64,
    },

    /// Malformed hex color
    #[error("invalid hex color: {0}")]
    InvalidHex(String),

    /// Neither hex nor a known color name
    #[error("unknown color: {0}")]
    UnknownColor(String),

    /// Configuration failed validation
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
