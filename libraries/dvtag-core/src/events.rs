/// Events reported by a tagging run
use crate::types::{MetadataRecord, WorkId};
use std::path::Path;

/// Something observable that happened during a run
///
/// Events borrow from the run; observers that need to keep them must copy
/// what they want.
#[derive(Debug, Clone, Copy)]
pub enum RunEvent<'a> {
    /// The metadata record was fetched and the run is about to start
    MetadataLoaded {
        /// The record that will be applied
        record: &'a MetadataRecord,
    },

    /// A file's tags were (re)written
    TrackTagged {
        /// File that received the tags
        path: &'a Path,
        /// 1-based position within its group
        track: u32,
        /// Disc number, if disc numbering is active
        disc: Option<u32>,
        /// Derived track title
        title: &'a str,
    },

    /// A file already carried the expected tags
    TrackUnchanged {
        /// File that was left untouched
        path: &'a Path,
        /// 1-based position within its group
        track: u32,
        /// Disc number, if disc numbering is active
        disc: Option<u32>,
    },

    /// A file was renamed with its disc prefix
    FileMoved {
        /// Original location
        from: &'a Path,
        /// New location
        to: &'a Path,
    },

    /// No cover file existed at the work root, so one was written
    CoverCreated {
        /// The new cover file
        path: &'a Path,
    },

    /// An empty subdirectory was removed
    DirectoryPruned {
        /// The removed directory
        path: &'a Path,
    },

    /// The work root was renamed
    FolderRenamed {
        /// Original root
        from: &'a Path,
        /// New root
        to: &'a Path,
    },

    /// Every step of the run finished
    Finished {
        /// Work that was processed
        work_id: &'a WorkId,
    },
}
