/// Container families the tagger understands
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Audio container family
///
/// The declaration order is the processing order: every FLAC group is tagged
/// before any MP3 group, and every MP3 group before any MP4 group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// FLAC stream with Vorbis comments
    Flac,
    /// MPEG audio with an ID3v2 tag
    Mp3,
    /// MPEG-4 audio with an `ilst` atom
    Mp4,
}

impl AudioFormat {
    /// All formats in processing order
    pub const PRIORITY: [AudioFormat; 3] = [AudioFormat::Flac, AudioFormat::Mp3, AudioFormat::Mp4];

    /// File extensions (lower case) that belong to this format
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            AudioFormat::Flac => &["flac"],
            AudioFormat::Mp3 => &["mp3"],
            AudioFormat::Mp4 => &["m4a"],
        }
    }

    /// Classify a path by its extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::PRIORITY
            .into_iter()
            .find(|format| format.extensions().contains(&ext.as_str()))
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AudioFormat::Flac => "flac",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Mp4 => "mp4",
        };
        f.write_str(name)
    }
}
