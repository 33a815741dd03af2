/// Tag reading/writing errors
use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata error types
#[derive(Error, Debug)]
pub enum MetadataError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A tag set carries a field the container cannot hold
    #[error("Invalid field for {format}: {field}")]
    InvalidField {
        /// Container family
        format: &'static str,
        /// Offending field key
        field: String,
    },

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lofty error (FLAC, MP4)
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),

    /// id3 error (MP3)
    #[error(transparent)]
    Id3(#[from] id3::Error),
}

impl MetadataError {
    pub(crate) fn invalid_field(format: &'static str, field: impl Into<String>) -> Self {
        Self::InvalidField {
            format,
            field: field.into(),
        }
    }
}
