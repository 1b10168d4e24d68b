/// Crate-wide result alias.
pub type WaymarkResult<T> = Result<T, WaymarkError>;

/// Crate-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum WaymarkError {
    /// Invalid input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Scene lifecycle failure (mount, rebuild, teardown).
    #[error("scene error: {0}")]
    Scene(String),

    /// Asset decode or lookup failure that could not be absorbed.
    #[error("asset error: {0}")]
    Asset(String),

    /// Rasterization failure.
    #[error("render error: {0}")]
    Render(String),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WaymarkError {
    /// Build a [`WaymarkError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WaymarkError::Scene`].
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    /// Build a [`WaymarkError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`WaymarkError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
