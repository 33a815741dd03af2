/// Format-polymorphic tag sink
use crate::error::Result;
use crate::flac::FlacSink;
use crate::gate;
use crate::mp4::Mp4Sink;
use crate::mpeg::Id3Sink;
use crate::tag_set::TagSet;
use crate::track::TrackContext;
use dvtag_artwork::CoverArt;
use dvtag_core::{AudioFormat, MetadataRecord};
use std::path::Path;

/// What `write_if_different` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file's tags were replaced
    Written,
    /// The file already carried exactly these tags
    Unchanged,
}

/// One container family's view of tags
///
/// `build_fresh` is pure; `read_existing` and `write` are the only methods
/// that touch the file.
pub trait TagSink: Send + Sync {
    /// Container family handled by this sink
    fn format(&self) -> AudioFormat;

    /// Build the complete tag set a file should carry
    fn build_fresh(
        &self,
        record: &MetadataRecord,
        cover: &CoverArt,
        track: &TrackContext,
    ) -> TagSet;

    /// Read the tags a file currently carries
    ///
    /// Returns `Ok(None)` when the file has no tag container at all.
    fn read_existing(&self, path: &Path) -> Result<Option<TagSet>>;

    /// Replace the file's managed tags with `tags`
    fn write(&self, path: &Path, tags: &TagSet) -> Result<()>;

    /// Whether the file's current tags differ from `fresh`
    fn needs_write(&self, path: &Path, fresh: &TagSet) -> Result<bool> {
        let existing = self.read_existing(path)?;
        Ok(gate::needs_write(existing.as_ref(), fresh))
    }

    /// Write `fresh` unless the file already carries it
    fn write_if_different(&self, path: &Path, fresh: &TagSet) -> Result<WriteOutcome> {
        let existing = self.read_existing(path)?;
        if !gate::needs_write(existing.as_ref(), fresh) {
            tracing::debug!("Tags unchanged: {}", path.display());
            return Ok(WriteOutcome::Unchanged);
        }

        match &existing {
            Some(existing) => tracing::debug!(
                "Rewriting {} tags of {}: {:?}",
                self.format(),
                path.display(),
                gate::changed_keys(existing, fresh)
            ),
            None => tracing::debug!("Writing new {} tags to {}", self.format(), path.display()),
        }

        self.write(path, fresh)?;
        Ok(WriteOutcome::Written)
    }
}

/// The sink responsible for a container family
pub fn sink_for(format: AudioFormat) -> Box<dyn TagSink> {
    match format {
        AudioFormat::Flac => Box::new(FlacSink::new()),
        AudioFormat::Mp3 => Box::new(Id3Sink::new()),
        AudioFormat::Mp4 => Box::new(Mp4Sink::new()),
    }
}
