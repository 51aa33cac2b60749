/// Convenience result type used across threadline.
pub type ThreadlineResult<T> = Result<T, ThreadlineError>;

/// Top-level error taxonomy used by the library APIs.
///
/// Runtime conditions of the visualizer itself (empty payloads, out-of-range path indices, stale
/// ticks) are not errors; they are handled where they occur. Errors only surface at the edges:
/// decoding payloads, validating configuration, rasterizing and encoding.
#[derive(thiserror::Error, Debug)]
pub enum ThreadlineError {
    /// Invalid user-provided configuration or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing payloads and config.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Errors raised by a drawing backend.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThreadlineError {
    /// Build a [`ThreadlineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ThreadlineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`ThreadlineError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

impl From<serde_json::Error> for ThreadlineError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
