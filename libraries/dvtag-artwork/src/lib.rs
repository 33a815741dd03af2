//! dvtag Artwork - cover image preparation
//!
//! A work's cover arrives as an encoded image in whatever format the
//! metadata source serves. This crate decodes it once per run and hands out:
//!
//! - PNG bytes for embedding (identical for every file of the run)
//! - dimensions and colour depth for FLAC picture blocks
//! - a JPEG rendition for the `cover.jpg` written next to the audio files
//!
//! # Example
//!
//! ```no_run
//! use dvtag_artwork::CoverArt;
//! use std::path::Path;
//!
//! let source = std::fs::read("cover.webp")?;
//! let cover = CoverArt::decode(&source)?;
//! println!("{}x{}, {} PNG bytes", cover.width(), cover.height(), cover.png_bytes().len());
//! cover.save_jpeg(Path::new("cover.jpg"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod cover;
mod error;

// Re-export public API
pub use cover::{CoverArt, PNG_MIME_TYPE};
pub use error::{ArtworkError, Result};
