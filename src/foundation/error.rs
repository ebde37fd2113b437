/// Crate-wide result alias.
pub type SnapResult<T> = Result<T, SnapError>;

/// Errors produced by the capture, compositing, and export pipeline.
#[derive(thiserror::Error, Debug)]
pub enum SnapError {
    /// Caller-supplied input was rejected before any work started.
    #[error("validation error: {0}")]
    Validation(String),

    /// An encoded image could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Rasterization or PNG encoding failed.
    #[error("render error: {0}")]
    Render(String),

    /// The camera could not deliver a frame.
    #[error("camera error: {0}")]
    Camera(String),

    /// The user (or host) refused camera access. Never retried automatically.
    #[error("camera permission denied: {0}")]
    CameraPermissionDenied(String),

    /// An export sink failed to deliver the final image.
    #[error("export error: {0}")]
    Export(String),

    #[error("serialization error: {0}")]
    Serde(String),

    /// A running operation was cancelled by its owner.
    #[error("cancelled")]
    Cancelled,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SnapError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn camera(msg: impl Into<String>) -> Self {
        Self::Camera(msg.into())
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the operation that produced this error may be retried by the caller.
    ///
    /// Permission denials are surfaced to the user instead.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Camera(_) | Self::Export(_))
    }
}

impl From<serde_json::Error> for SnapError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
