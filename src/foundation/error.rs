/// Convenience result type used across rayframe.
pub type RayframeResult<T> = Result<T, RayframeError>;

/// Top-level error taxonomy used by tracer, module and host APIs.
#[derive(thiserror::Error, Debug)]
pub enum RayframeError {
    /// Invalid user-provided settings or dimensions.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while loading or building a scene description.
    #[error("scene error: {0}")]
    Scene(String),

    /// Errors while rendering or presenting a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Out-of-bounds or failed linear memory access.
    #[error("memory error: {0}")]
    Memory(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RayframeError {
    /// Build a [`RayframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RayframeError::Scene`] value.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    /// Build a [`RayframeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`RayframeError::Memory`] value.
    pub fn memory(msg: impl Into<String>) -> Self {
        Self::Memory(msg.into())
    }

    /// Build a [`RayframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
