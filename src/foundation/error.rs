/// Convenience result type used across reelkit.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by engine APIs.
///
/// None of these are fatal to the host: the [`crate::Editor`] facade logs a rejected operation and
/// keeps its prior state.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid user-provided storyboard or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A scene-list operation that would break a store invariant or names an unknown scene.
    #[error("invalid scene operation: {0}")]
    InvalidSceneOperation(String),

    /// A gesture event that does not fit the current gesture state or edit mode.
    #[error("gesture error: {0}")]
    Gesture(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::InvalidSceneOperation`] value.
    pub fn scene_op(msg: impl Into<String>) -> Self {
        Self::InvalidSceneOperation(msg.into())
    }

    /// Build a [`ReelError::Gesture`] value.
    pub fn gesture(msg: impl Into<String>) -> Self {
        Self::Gesture(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
