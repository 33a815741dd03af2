//! Error types for the organizer

use dvtag_artwork::ArtworkError;
use dvtag_core::DvtagError;
use dvtag_metadata::MetadataError;
use thiserror::Error;

/// Result type alias using `OrganizeError`
pub type Result<T> = std::result::Result<T, OrganizeError>;

/// Organizer error types
///
/// `Lookup` and `Artwork` are raised before any file of the work is touched.
#[derive(Debug, Error)]
pub enum OrganizeError {
    #[error("Lookup failed: {0}")]
    Lookup(#[from] DvtagError),

    #[error("Cover art error: {0}")]
    Artwork(#[from] ArtworkError),

    #[error("Tag error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Destination already exists: {0}")]
    DestinationExists(String),
}

impl From<walkdir::Error> for OrganizeError {
    fn from(err: walkdir::Error) -> Self {
        Self::Io(err.into())
    }
}
