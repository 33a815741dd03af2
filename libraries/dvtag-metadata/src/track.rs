/// Per-file context derived from the directory listing
use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::path::Path;

static TRACK_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+[\s._-]*").expect("track prefix pattern is valid"));

/// Where a file sits in the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackContext {
    /// 1-based position within the file's group
    pub position: u32,
    /// Disc number, present only when disc numbering is active
    pub disc: Option<u32>,
    /// Display title derived from the file name
    pub title: String,
}

impl TrackContext {
    /// Create a track context
    pub fn new(position: u32, disc: Option<u32>, title: impl Into<String>) -> Self {
        Self {
            position,
            disc,
            title: title.into(),
        }
    }
}

/// Derive a display title from a file name
///
/// The extension is dropped, then a leading track-number prefix (digits,
/// optionally followed by `.`, `-`, `_` or whitespace) is removed and the
/// result trimmed. Names without such a prefix pass through unchanged, and a
/// name that is nothing but a prefix keeps its stem. Never fails.
///
/// ```
/// use dvtag_metadata::track_title;
///
/// assert_eq!(track_title("03. Opening Theme.mp3"), "Opening Theme");
/// assert_eq!(track_title("Interview.mp3"), "Interview");
/// ```
pub fn track_title(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);

    let stripped = TRACK_PREFIX.replace(stem, "");
    let title = stripped.trim();
    if title.is_empty() {
        stem.trim().to_string()
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_numeric_prefix_and_separator() {
        assert_eq!(track_title("03. Opening Theme.mp3"), "Opening Theme");
        assert_eq!(track_title("01 - Prologue.flac"), "Prologue");
        assert_eq!(track_title("12_Ending.m4a"), "Ending");
        assert_eq!(track_title("7 Free Talk.mp3"), "Free Talk");
    }

    #[test]
    fn leaves_names_without_prefix_alone() {
        assert_eq!(track_title("Interview.mp3"), "Interview");
        assert_eq!(track_title("track2.flac"), "track2");
        assert_eq!(track_title("  Padded  .mp3"), "Padded");
    }

    #[test]
    fn prefix_only_names_keep_their_stem() {
        assert_eq!(track_title("01.mp3"), "01");
        assert_eq!(track_title("02 .flac"), "02");
    }

    #[test]
    fn handles_names_without_extension() {
        assert_eq!(track_title("04 Bonus"), "Bonus");
    }
}
