//! dvtag Metadata
//!
//! Tag construction and idempotent tag writing for the three supported
//! container families.
//!
//! This crate provides:
//! - [`TagSet`]: a container-native, comparable view of a file's tags
//! - [`TrackContext`] and [`track_title`]: per-file context derived from the listing
//! - [`TagSink`]: build / read / compare / write, with one implementation per family
//!   - [`FlacSink`]: Vorbis comments + PICTURE blocks (lofty)
//!   - [`Id3Sink`]: ID3v2.4 frames (id3)
//!   - [`Mp4Sink`]: `ilst` atoms (lofty)
//!
//! # Example
//!
//! ```rust,no_run
//! use dvtag_artwork::CoverArt;
//! use dvtag_core::{AudioFormat, MetadataRecord, WorkId};
//! use dvtag_metadata::{sink_for, track_title, TrackContext};
//! use std::path::Path;
//! # fn example(record: &MetadataRecord, cover: &CoverArt) -> dvtag_metadata::Result<()> {
//! let sink = sink_for(AudioFormat::Mp3);
//! let path = Path::new("work/01. Opening.mp3");
//! let track = TrackContext::new(1, None, track_title("01. Opening.mp3"));
//!
//! let fresh = sink.build_fresh(record, cover, &track);
//! sink.write_if_different(path, &fresh)?;
//! # Ok(())
//! # }
//! ```

mod error;
mod flac;
mod gate;
mod mp4;
mod mpeg;
mod sink;
mod tag_set;
mod track;

pub use error::{MetadataError, Result};
pub use flac::FlacSink;
pub use gate::{changed_keys, needs_write};
pub use mp4::Mp4Sink;
pub use mpeg::Id3Sink;
pub use sink::{sink_for, TagSink, WriteOutcome};
pub use tag_set::{EmbeddedPicture, TagSet};
pub use track::{track_title, TrackContext};
