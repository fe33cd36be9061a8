/// Convenience result type used across the poster engine.
pub type PosterResult<T> = Result<T, PosterError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum PosterError {
    /// Invalid user-provided data (dataset, config, render target).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while measuring text or placing poster elements.
    #[error("layout error: {0}")]
    Layout(String),

    /// Errors while rasterizing a poster plan or post-processing pixels.
    #[error("render error: {0}")]
    Render(String),

    /// Fragment program construction or shading failures.
    #[error("shader error: {0}")]
    Shader(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem access failures.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosterError {
    /// Build a [`PosterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PosterError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`PosterError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PosterError::Shader`] value.
    pub fn shader(msg: impl Into<String>) -> Self {
        Self::Shader(msg.into())
    }

    /// Build a [`PosterError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`PosterError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
