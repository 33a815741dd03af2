use thiserror::Error;

/// Errors that can occur while preparing cover art
#[derive(Debug, Error)]
pub enum ArtworkError {
    /// The source bytes are not an image we can decode
    #[error("Cannot decode cover image: {0}")]
    Decode(#[source] image::ImageError),

    /// Re-encoding the image failed
    #[error("Cannot encode cover image: {0}")]
    Encode(#[source] image::ImageError),

    /// The source was empty
    #[error("Cover image is empty")]
    Empty,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for artwork operations
pub type Result<T> = std::result::Result<T, ArtworkError>;
