// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for pose normalization and scene composition.

use std::fmt;

/// Result type alias for pose operations.
pub type Result<T> = std::result::Result<T, PoseError>;

/// Main error type for the library.
#[derive(Debug)]
pub enum PoseError {
    /// Row width other than 3, ragged rows, an empty pose, or a link that is not a pair.
    ShapeError(String),
    /// Non-numeric or non-finite values, or a link index outside the pose.
    InvalidInput(String),
    /// Every coordinate is zero, so the pose cannot be scaled to unit size.
    DegeneratePose(String),
    /// Invalid configuration provided.
    ConfigError(String),
    /// Text could not be decoded as JSON.
    JsonError(String),
    /// A scene builder rejected an operation.
    SceneError(String),
    /// Wrapped `std::io::Error`
    Io(std::io::Error),
}

impl fmt::Display for PoseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeError(msg) => write!(f, "Shape error: {msg}"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Self::DegeneratePose(msg) => write!(f, "Degenerate pose: {msg}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
            Self::JsonError(msg) => write!(f, "JSON error: {msg}"),
            Self::SceneError(msg) => write!(f, "Scene error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for PoseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PoseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for PoseError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}
