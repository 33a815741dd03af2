//! dvtag Core
//!
//! Shared types, traits, and error handling for the dvtag tagging engine.
//!
//! The core crate defines:
//! - **Domain Types**: `MetadataRecord`, `WorkId`, `AgeRating`, `AudioFormat`
//! - **Core Traits**: `MetadataProvider` (where records come from) and
//!   `RunObserver` (where run events go)
//! - **Error Handling**: Unified `DvtagError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use dvtag_core::WorkId;
//!
//! let id = WorkId::find_in("[Circle][rj01234567] Some Work").unwrap();
//! assert_eq!(id.as_str(), "RJ01234567");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod events;
pub mod provider;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{DvtagError, Result};
pub use events::RunEvent;
pub use provider::JsonFileProvider;
pub use traits::{MetadataProvider, NullObserver, RunObserver};
pub use types::{AgeRating, AudioFormat, MetadataRecord, WorkId};
