/// Core error types for the Flicker engine.

/// A specialized Result type for Flicker operations.
pub type FlickerResult<T> = Result<T, FlickerError>;

/// Top-level error type encompassing all Flicker subsystems.
///
/// Recoverable option problems (out-of-range numbers, malformed colors,
/// unknown font names) never surface here; they are clamped or substituted
/// before rendering starts. Everything in this enum aborts the render.
#[derive(Debug, thiserror::Error)]
pub enum FlickerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("asset error: {message} ({name})")]
    Asset { message: String, name: String },

    #[error("render error: {0}")]
    Render(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl FlickerError {
    /// Create an asset error.
    pub fn asset(message: impl Into<String>, name: impl Into<String>) -> Self {
        FlickerError::Asset {
            message: message.into(),
            name: name.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        FlickerError::Config(message.into())
    }
}
