//! Export failures

use thiserror::Error;

/// Everything that can stop an export
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExportError {
    /// No canvas to export (nothing rendered yet)
    #[error("No render target available")]
    MissingRenderTarget,

    /// Web fonts never became ready
    #[error("Fonts unavailable: {0}")]
    FontsUnavailable(String),

    /// An image referenced by the canvas could not be fetched
    #[error("Failed to load image '{src}': {reason}")]
    ImageLoad { src: String, reason: String },

    /// An image was fetched but could not be decoded
    #[error("Failed to decode image '{src}': {reason}")]
    ImageDecode { src: String, reason: String },

    #[error("Rasterization failed: {0}")]
    Rasterize(String),

    #[error("JPEG encoding failed: {0}")]
    Encode(String),

    #[error("Failed to save '{filename}': {reason}")]
    Save { filename: String, reason: String },

    /// The host environment refused an operation
    #[error("Platform error: {0}")]
    Platform(String),
}

/// How a failure is reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Silently ignored
    MissingRenderTarget,
    /// Fonts or images: notice, state unchanged
    ResourceFailure,
    /// Rasterize/encode/save: notice, cleanup, busy released
    RasterizationFailure,
}

impl ExportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExportError::MissingRenderTarget => ErrorKind::MissingRenderTarget,
            ExportError::FontsUnavailable(_)
            | ExportError::ImageLoad { .. }
            | ExportError::ImageDecode { .. } => ErrorKind::ResourceFailure,
            ExportError::Rasterize(_)
            | ExportError::Encode(_)
            | ExportError::Save { .. }
            | ExportError::Platform(_) => ErrorKind::RasterizationFailure,
        }
    }

    /// Whether the user should see a notice for this failure
    pub fn is_user_visible(&self) -> bool {
        self.kind() != ErrorKind::MissingRenderTarget
    }
}

impl From<image::ImageError> for ExportError {
    fn from(err: image::ImageError) -> Self {
        ExportError::Encode(err.to_string())
    }
}
