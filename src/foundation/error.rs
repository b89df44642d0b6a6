/// Convenience result type used across fuzzytext.
pub type FuzzResult<T> = Result<T, FuzzError>;

/// Top-level error taxonomy for configuration, font loading, and output.
///
/// The renderer itself never returns these for environment failures (a missing drawing context or
/// a failed allocation degrades to "nothing is drawn"); they surface from validation, IO, and
/// encoding paths.
#[derive(thiserror::Error, Debug)]
pub enum FuzzError {
    /// Invalid user-provided configuration or scenario data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Font bytes could not be registered or resolved.
    #[error("font error: {0}")]
    Font(String),

    /// Frame output (PNG/MP4/WebP) failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FuzzError {
    /// Build a [`FuzzError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FuzzError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`FuzzError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`FuzzError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
