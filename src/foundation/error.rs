/// Convenience result type used across crtype.
pub type CrtResult<T> = Result<T, CrtError>;

/// Top-level error taxonomy used by the build APIs.
///
/// Every failure of a build surfaces as exactly one of these values; nothing is retried
/// internally.
#[derive(thiserror::Error, Debug)]
pub enum CrtError {
    /// Invalid configuration or caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures while producing pixels (buffer sizing, rasterizer setup).
    #[error("render error: {0}")]
    Render(String),

    /// Failures while muxing frames into the output container.
    #[error("encode error: {0}")]
    Encode(String),

    /// Sink or filesystem IO failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CrtError {
    /// Build a [`CrtError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CrtError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CrtError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`CrtError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
