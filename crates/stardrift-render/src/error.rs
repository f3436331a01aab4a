//! Render error types.

/// Errors from exporting rendered frames.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// PNG encoding failed.
    #[error("failed to encode png: {0}")]
    Encode(#[from] png::EncodingError),

    /// Writing the image to disk failed.
    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}
