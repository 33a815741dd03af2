//! dvtag Organizer
//!
//! Applies a work's metadata record to every audio file in its folder and
//! tidies the folder afterwards.
//!
//! # Features
//!
//! - **Classification**: Recursive discovery of FLAC/MP3/MP4 files, grouped by
//!   directory in natural order
//! - **Disc numbering**: One disc number per group when a run holds more than
//!   one file
//! - **Idempotent tagging**: Files are only rewritten when their tags differ
//! - **Relocation**: Disc prefixes, cover creation, empty-directory pruning,
//!   and the canonical `[circle][id] title` folder name
//!
//! # Example
//!
//! ```rust,no_run
//! use dvtag_core::JsonFileProvider;
//! use dvtag_organizer::{Tagger, TaggerOptions, TracingObserver};
//! use std::path::Path;
//!
//! # fn example() -> dvtag_organizer::Result<()> {
//! let tagger = Tagger::new(JsonFileProvider::new("metadata"), TracingObserver::new())
//!     .with_options(TaggerOptions::new().with_flatten(false));
//!
//! let report = tagger.tag(Path::new("library/RJ01234567"))?;
//! println!("{} files tagged", report.written.len());
//! # Ok(())
//! # }
//! ```

pub mod disc;
pub mod discover;
pub mod error;
pub mod natural;
pub mod observer;
pub mod relocate;
pub mod sanitize;
pub mod scanner;
pub mod tagger;

pub use disc::DiscSequence;
pub use discover::discover_work_dirs;
pub use error::{OrganizeError, Result};
pub use natural::{natural_cmp, natural_entry_cmp};
pub use observer::TracingObserver;
pub use relocate::{
    disc_prefix, group_is_prefixed, strip_disc_prefix, RelocateOptions, Relocator,
};
pub use sanitize::{sanitize_name_component, work_folder_name};
pub use scanner::{AudioFileGroup, Classification, FileClassifier};
pub use tagger::{TagReport, Tagger, TaggerOptions};
