//! Tagging orchestrator for one work folder

use crate::disc::DiscSequence;
use crate::relocate::{group_is_prefixed, strip_disc_prefix, RelocateOptions, Relocator};
use crate::scanner::FileClassifier;
use crate::{OrganizeError, Result};
use dvtag_artwork::CoverArt;
use dvtag_core::{AudioFormat, MetadataProvider, MetadataRecord, RunEvent, RunObserver, WorkId};
use dvtag_metadata::{sink_for, track_title, TrackContext, WriteOutcome};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for a tagging run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaggerOptions {
    /// Where disc-prefixed files land and whether anything is written
    pub relocate: RelocateOptions,
    /// Whether the classifier follows symbolic links
    pub follow_links: bool,
}

impl TaggerOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Move disc-prefixed files to the work root
    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.relocate.flatten = flatten;
        self
    }

    /// Report every change without writing anything
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.relocate.dry_run = dry_run;
        self
    }

    /// Follow symbolic links while classifying
    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }
}

/// What a run did to a work folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagReport {
    /// Work that was tagged
    pub work_id: WorkId,
    /// Files whose tags were (re)written, at their pre-move paths
    pub written: Vec<PathBuf>,
    /// Files that already carried the expected tags
    pub unchanged: Vec<PathBuf>,
    /// Disc-prefix renames, `(from, to)`
    pub moved: Vec<(PathBuf, PathBuf)>,
    /// Cover file written at the root, if there was none
    pub cover_created: Option<PathBuf>,
    /// Empty directories removed
    pub pruned: Vec<PathBuf>,
    /// Final location of the work folder
    pub folder: PathBuf,
}

impl TagReport {
    fn new(work_id: WorkId, folder: PathBuf) -> Self {
        Self {
            work_id,
            written: Vec::new(),
            unchanged: Vec::new(),
            moved: Vec::new(),
            cover_created: None,
            pruned: Vec::new(),
            folder,
        }
    }

    /// Number of audio files visited
    pub fn files_seen(&self) -> usize {
        self.written.len() + self.unchanged.len()
    }
}

/// Tags, renames, and tidies one work folder at a time
///
/// The provider and observer are injected; the tagger holds no other state,
/// so one instance can run over many folders.
pub struct Tagger<P, O> {
    provider: P,
    observer: O,
    options: TaggerOptions,
}

impl<P: MetadataProvider, O: RunObserver> Tagger<P, O> {
    /// Create a tagger with default options
    pub fn new(provider: P, observer: O) -> Self {
        Self {
            provider,
            observer,
            options: TaggerOptions::default(),
        }
    }

    /// Replace the run options
    pub fn with_options(mut self, options: TaggerOptions) -> Self {
        self.options = options;
        self
    }

    /// Tag every audio file under `root`, then finalize the folder
    ///
    /// The work identifier, the metadata record, and the cover image are all
    /// resolved before the first file is touched; a failure there leaves the
    /// folder exactly as it was. Any later failure aborts the remaining run.
    pub fn tag(&self, root: &Path) -> Result<TagReport> {
        if !root.exists() {
            return Err(OrganizeError::FileNotFound(root.display().to_string()));
        }
        if !root.is_dir() {
            return Err(OrganizeError::InvalidPath(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let root = fs::canonicalize(root)?;
        let folder_name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| OrganizeError::InvalidPath(root.display().to_string()))?;

        let work_id = WorkId::from_folder_name(&folder_name)?;
        let record = self.provider.fetch(&work_id)?;
        self.observer
            .on_event(&RunEvent::MetadataLoaded { record: &record });
        let cover = CoverArt::decode(&record.cover_image)?;

        let classification = FileClassifier::new()
            .follow_links(self.options.follow_links)
            .classify(&root)?;
        if classification.is_empty() {
            tracing::warn!("No audio files found in {}", root.display());
        }

        let relocator = Relocator::new(&root, self.options.relocate);
        let mut discs = DiscSequence::for_total(classification.total_files());
        tracing::debug!(
            "{} audio files in {} groups, disc numbers {}",
            classification.total_files(),
            classification.group_count(),
            if discs.is_active() { "on" } else { "off" }
        );
        let mut report = TagReport::new(work_id, root.clone());

        for format in AudioFormat::PRIORITY {
            let sink = sink_for(format);

            for group in classification.groups(format) {
                let disc = discs.next();
                let prefixed = group_is_prefixed(&group.files, disc);

                for (index, file) in group.files.iter().enumerate() {
                    let position = index as u32 + 1;
                    let name = file
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    let stem = if prefixed {
                        strip_disc_prefix(&name, disc)
                    } else {
                        name.as_str()
                    };
                    let title = track_title(stem);
                    let track = TrackContext::new(position, disc, title);

                    let fresh = sink.build_fresh(&record, &cover, &track);
                    let outcome = if self.options.relocate.dry_run {
                        if sink.needs_write(file, &fresh)? {
                            WriteOutcome::Written
                        } else {
                            WriteOutcome::Unchanged
                        }
                    } else {
                        sink.write_if_different(file, &fresh)?
                    };

                    match outcome {
                        WriteOutcome::Written => {
                            self.observer.on_event(&RunEvent::TrackTagged {
                                path: file,
                                track: position,
                                disc,
                                title: &track.title,
                            });
                            report.written.push(file.clone());
                        }
                        WriteOutcome::Unchanged => {
                            self.observer.on_event(&RunEvent::TrackUnchanged {
                                path: file,
                                track: position,
                                disc,
                            });
                            report.unchanged.push(file.clone());
                        }
                    }

                    if let Some(target) = relocator.rename_with_disc_prefix(file, disc, prefixed)? {
                        self.observer.on_event(&RunEvent::FileMoved {
                            from: file,
                            to: &target,
                        });
                        report.moved.push((file.clone(), target));
                    }
                }
            }
        }

        self.finalize(&relocator, &record, &cover, &mut report)?;
        self.observer.on_event(&RunEvent::Finished {
            work_id: &report.work_id,
        });
        Ok(report)
    }

    fn finalize(
        &self,
        relocator: &Relocator,
        record: &MetadataRecord,
        cover: &CoverArt,
        report: &mut TagReport,
    ) -> Result<()> {
        if let Some(path) = relocator.ensure_cover(cover)? {
            self.observer.on_event(&RunEvent::CoverCreated { path: &path });
            report.cover_created = Some(path);
        }

        for path in relocator.prune_empty_dirs()? {
            self.observer
                .on_event(&RunEvent::DirectoryPruned { path: &path });
            report.pruned.push(path);
        }

        // Last: everything above addresses paths under the original root
        if let Some(folder) = relocator.rename_root(record)? {
            self.observer.on_event(&RunEvent::FolderRenamed {
                from: relocator.root(),
                to: &folder,
            });
            report.folder = folder;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dvtag_core::{DvtagError, NullObserver};
    use std::cell::Cell;
    use tempfile::TempDir;

    struct CountingProvider {
        calls: Cell<usize>,
    }

    impl MetadataProvider for CountingProvider {
        fn fetch(&self, work_id: &WorkId) -> dvtag_core::Result<MetadataRecord> {
            self.calls.set(self.calls.get() + 1);
            Err(DvtagError::WorkNotFound(work_id.clone()))
        }
    }

    #[test]
    fn options_builders() {
        let options = TaggerOptions::new()
            .with_flatten(true)
            .with_dry_run(true)
            .with_follow_links(true);
        assert!(options.relocate.flatten);
        assert!(options.relocate.dry_run);
        assert!(options.follow_links);
    }

    #[test]
    fn folder_without_id_fails_before_fetch() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("no identifier here");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("01.mp3"), b"x").unwrap();

        let provider = CountingProvider { calls: Cell::new(0) };
        let tagger = Tagger::new(&provider, NullObserver);
        let result = tagger.tag(&root);

        assert!(matches!(
            result,
            Err(OrganizeError::Lookup(DvtagError::InvalidWorkId(_)))
        ));
        assert_eq!(provider.calls.get(), 0);
        assert!(root.join("01.mp3").exists());
    }

    #[test]
    fn fetch_failure_leaves_folder_untouched() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("RJ123456");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("01.mp3"), b"x").unwrap();

        let provider = CountingProvider { calls: Cell::new(0) };
        let result = Tagger::new(&provider, NullObserver).tag(&root);

        assert!(matches!(
            result,
            Err(OrganizeError::Lookup(DvtagError::WorkNotFound(_)))
        ));
        assert_eq!(provider.calls.get(), 1);
        assert_eq!(fs::read(root.join("01.mp3")).unwrap(), b"x");
        assert!(!root.join("cover.jpg").exists());
    }

    #[test]
    fn missing_root_is_reported() {
        let provider = CountingProvider { calls: Cell::new(0) };
        let result = Tagger::new(&provider, NullObserver).tag(Path::new("/no/such/RJ123456"));
        assert!(matches!(result, Err(OrganizeError::FileNotFound(_))));
    }
}
