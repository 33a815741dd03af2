//! File classification: audio files grouped by format and directory

use crate::natural::natural_entry_cmp;
use crate::{OrganizeError, Result};
use dvtag_core::AudioFormat;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Audio files of one format that share a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFileGroup {
    /// Container family of every file in the group
    pub format: AudioFormat,
    /// Directory holding the files
    pub dir: PathBuf,
    /// Files in natural order; never empty
    pub files: Vec<PathBuf>,
}

/// Result of classifying a work folder
#[derive(Debug, Clone, Default)]
pub struct Classification {
    groups: BTreeMap<AudioFormat, Vec<AudioFileGroup>>,
}

impl Classification {
    /// Groups of one format, in walk order (empty if the format is absent)
    pub fn groups(&self, format: AudioFormat) -> &[AudioFileGroup] {
        self.groups.get(&format).map_or(&[], Vec::as_slice)
    }

    /// Every group, formats in processing order
    pub fn iter(&self) -> impl Iterator<Item = &AudioFileGroup> {
        AudioFormat::PRIORITY
            .into_iter()
            .flat_map(move |format| self.groups(format).iter())
    }

    /// Number of audio files across all formats
    pub fn total_files(&self) -> usize {
        self.iter().map(|group| group.files.len()).sum()
    }

    /// Number of groups across all formats
    pub fn group_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Whether no audio file was found
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn push(&mut self, format: AudioFormat, file: PathBuf) {
        let dir = file.parent().map(Path::to_path_buf).unwrap_or_default();
        let groups = self.groups.entry(format).or_default();

        match groups.iter_mut().find(|group| group.dir == dir) {
            Some(group) => group.files.push(file),
            None => groups.push(AudioFileGroup {
                format,
                dir,
                files: vec![file],
            }),
        }
    }
}

/// Files before directories, then natural order by name
fn walk_order(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| natural_entry_cmp(a, b))
}

/// Recursive classifier for a work folder
///
/// Directories are walked depth-first with each directory's files ahead of
/// its subdirectories and siblings in natural order, so the root's own files
/// always form the first group of their format.
#[derive(Debug, Clone, Default)]
pub struct FileClassifier {
    /// Whether to follow symbolic links
    follow_links: bool,
}

impl FileClassifier {
    /// Create a new classifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Classify every recognised audio file under `root`
    pub fn classify(&self, root: &Path) -> Result<Classification> {
        if !root.exists() {
            return Err(OrganizeError::FileNotFound(root.display().to_string()));
        }

        if !root.is_dir() {
            return Err(OrganizeError::InvalidPath(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let mut classification = Classification::default();
        let walker = WalkDir::new(root)
            .follow_links(self.follow_links)
            .sort_by(walk_order);

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            match AudioFormat::from_path(entry.path()) {
                Some(format) => classification.push(format, entry.into_path()),
                None => tracing::debug!("Ignoring {}", entry.path().display()),
            }
        }

        Ok(classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"fake").unwrap();
    }

    fn names(group: &AudioFileGroup) -> Vec<String> {
        group
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn groups_by_format_and_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("track2.flac"));
        touch(&root.join("track10.flac"));
        touch(&root.join("track1.flac"));
        touch(&root.join("MP3/01.mp3"));
        touch(&root.join("MP3/02.MP3"));
        touch(&root.join("notes.txt"));
        touch(&root.join("cover.jpg"));

        let classification = FileClassifier::new().classify(root).unwrap();

        let flac = classification.groups(AudioFormat::Flac);
        assert_eq!(flac.len(), 1);
        assert_eq!(names(&flac[0]), ["track1.flac", "track2.flac", "track10.flac"]);

        let mp3 = classification.groups(AudioFormat::Mp3);
        assert_eq!(mp3.len(), 1);
        assert_eq!(mp3[0].dir, root.join("MP3"));
        assert_eq!(names(&mp3[0]), ["01.mp3", "02.MP3"]);

        assert!(classification.groups(AudioFormat::Mp4).is_empty());
        assert_eq!(classification.total_files(), 5);
        assert_eq!(classification.group_count(), 2);
    }

    #[test]
    fn root_files_come_before_subdirectories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("a disc/01.mp3"));
        touch(&root.join("z bonus.mp3"));
        touch(&root.join("Disc 10/01.mp3"));
        touch(&root.join("Disc 2/01.mp3"));

        let classification = FileClassifier::new().classify(root).unwrap();
        let dirs: Vec<&Path> = classification
            .groups(AudioFormat::Mp3)
            .iter()
            .map(|group| group.dir.as_path())
            .collect();

        assert_eq!(
            dirs,
            [
                root.to_path_buf(),
                root.join("a disc"),
                root.join("Disc 2"),
                root.join("Disc 10")
            ]
        );
    }

    #[test]
    fn iter_follows_format_priority() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("a.m4a"));
        touch(&root.join("b.mp3"));
        touch(&root.join("c.flac"));

        let classification = FileClassifier::new().classify(root).unwrap();
        let formats: Vec<AudioFormat> = classification.iter().map(|g| g.format).collect();
        assert_eq!(formats, AudioFormat::PRIORITY);
    }

    #[test]
    fn empty_tree_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("readme.txt"));

        let classification = FileClassifier::new().classify(temp.path()).unwrap();
        assert!(classification.is_empty());
        assert_eq!(classification.total_files(), 0);
    }

    #[test]
    fn missing_root_is_reported() {
        let result = FileClassifier::new().classify(Path::new("/definitely/does/not/exist"));
        assert!(matches!(result, Err(OrganizeError::FileNotFound(_))));
    }
}
