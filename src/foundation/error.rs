use std::fmt;

/// Convenience result type used across the engine.
pub type WhiteboardResult<T> = Result<T, WhiteboardError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Scenes that simply have nothing to draw are not errors; see [`crate::ContentStatus`].
#[derive(thiserror::Error, Debug)]
pub enum WhiteboardError {
    /// Invalid scene parameters or tuning constants.
    #[error("validation error: {0}")]
    Validation(String),

    /// Syntactically invalid vector path data.
    #[error(transparent)]
    PathData(#[from] PathDataError),

    /// Failure while ingesting a full SVG document.
    #[error("import error: {0}")]
    Import(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WhiteboardError {
    /// Build a [`WhiteboardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WhiteboardError::Import`] value.
    pub fn import(msg: impl Into<String>) -> Self {
        Self::Import(msg.into())
    }

    /// Build a [`WhiteboardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Path-data syntax error with the byte offset where parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathDataError {
    /// Byte offset into the path data string.
    pub offset: usize,
    /// Human-readable description.
    pub message: String,
}

impl PathDataError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for PathDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "path data error at byte {}: {}",
            self.offset, self.message
        )
    }
}

impl std::error::Error for PathDataError {}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
