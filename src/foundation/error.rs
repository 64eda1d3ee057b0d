/// Convenience result type used across pathflow.
pub type PathflowResult<T> = Result<T, PathflowError>;

/// Top-level error taxonomy used by library APIs.
///
/// Geometry queries and sampling never fail; errors come from configuration, surface
/// allocation and output sinks.
#[derive(thiserror::Error, Debug)]
pub enum PathflowError {
    /// Invalid user-provided or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while preparing or drawing render surfaces.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while writing frames to an output sink.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PathflowError {
    /// Build a [`PathflowError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PathflowError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PathflowError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PathflowError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
