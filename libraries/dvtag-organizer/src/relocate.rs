//! File and folder relocation after tagging

use crate::sanitize::work_folder_name;
use crate::{OrganizeError, Result};
use dvtag_artwork::CoverArt;
use dvtag_core::MetadataRecord;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Cover file names that satisfy the cover requirement
const COVER_NAMES: &[&str] = &["cover.jpg", "cover.png"];

/// Name of the cover file written when none exists
const COVER_FILE: &str = "cover.jpg";

/// Relocation behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelocateOptions {
    /// Move disc-prefixed files to the work root instead of leaving them in place
    pub flatten: bool,
    /// Compute and report every move without touching the filesystem
    pub dry_run: bool,
}

impl RelocateOptions {
    /// Create default options (in place, real run)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether disc-prefixed files move to the work root
    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    /// Set whether the filesystem is left untouched
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Prefix written in front of a file name for disc `disc`
pub fn disc_prefix(disc: u32) -> String {
    format!("{disc}-")
}

/// `name` without its `{disc}-` prefix, if it carries one
pub fn strip_disc_prefix(name: &str, disc: Option<u32>) -> &str {
    disc.and_then(|disc| name.strip_prefix(&disc_prefix(disc)))
        .unwrap_or(name)
}

/// Whether every file of a group already carries the `{disc}-` prefix
///
/// Decided per group: a group named `1-Intro`, `2-Main` on disc 1 is only
/// partly prefixed and gets a fresh prefix on every file.
pub fn group_is_prefixed(files: &[PathBuf], disc: Option<u32>) -> bool {
    let Some(disc) = disc else {
        return false;
    };
    let prefix = disc_prefix(disc);
    !files.is_empty()
        && files.iter().all(|file| {
            file.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&prefix))
        })
}

fn file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| OrganizeError::InvalidPath(path.display().to_string()))
}

/// Moves files, writes the cover, prunes, and renames a work folder
#[derive(Debug, Clone)]
pub struct Relocator {
    root: PathBuf,
    options: RelocateOptions,
}

impl Relocator {
    /// Relocator for the work folder at `root`
    pub fn new(root: impl Into<PathBuf>, options: RelocateOptions) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }

    /// Work folder this relocator operates on
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Rename `file` to `{disc}-{name}`
    ///
    /// A file of a group that already carries its prefix keeps its name
    /// (see [`group_is_prefixed`]). Returns the new path, or `None` when
    /// nothing moves: no disc assigned, or the file already sits where it
    /// belongs.
    pub fn rename_with_disc_prefix(
        &self,
        file: &Path,
        disc: Option<u32>,
        group_prefixed: bool,
    ) -> Result<Option<PathBuf>> {
        let Some(disc) = disc else {
            return Ok(None);
        };

        let name = file_name(file)?;
        let new_name = if group_prefixed {
            name.to_string()
        } else {
            format!("{}{name}", disc_prefix(disc))
        };

        let dir = if self.options.flatten {
            self.root.as_path()
        } else {
            file.parent()
                .ok_or_else(|| OrganizeError::InvalidPath(file.display().to_string()))?
        };

        let target = dir.join(new_name);
        if target == file {
            return Ok(None);
        }
        if target.exists() {
            return Err(OrganizeError::DestinationExists(target.display().to_string()));
        }

        if !self.options.dry_run {
            fs::rename(file, &target)?;
        }
        tracing::debug!("Moved {} -> {}", file.display(), target.display());
        Ok(Some(target))
    }

    /// Write `cover.jpg` at the root unless a cover file already exists
    ///
    /// Returns the path of the created cover.
    pub fn ensure_cover(&self, cover: &CoverArt) -> Result<Option<PathBuf>> {
        if COVER_NAMES.iter().any(|name| self.root.join(name).exists()) {
            return Ok(None);
        }

        let path = self.root.join(COVER_FILE);
        if !self.options.dry_run {
            cover.save_jpeg(&path)?;
        }
        Ok(Some(path))
    }

    /// Remove every subdirectory left without files, deepest first
    ///
    /// The root itself is never removed. Returns the removed directories in
    /// removal order.
    pub fn prune_empty_dirs(&self) -> Result<Vec<PathBuf>> {
        let mut pruned = Vec::new();
        let mut gone: HashSet<PathBuf> = HashSet::new();

        for entry in WalkDir::new(&self.root).min_depth(1).contents_first(true) {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }

            let mut empty = true;
            for child in fs::read_dir(entry.path())? {
                if !gone.contains(&child?.path()) {
                    empty = false;
                    break;
                }
            }
            if !empty {
                continue;
            }

            if !self.options.dry_run {
                fs::remove_dir(entry.path())?;
            }
            gone.insert(entry.path().to_path_buf());
            pruned.push(entry.into_path());
        }

        Ok(pruned)
    }

    /// Rename the root to `[{circle}][{work id}] {title}`
    ///
    /// Returns the new root, or `None` when the name is already correct.
    pub fn rename_root(&self, record: &MetadataRecord) -> Result<Option<PathBuf>> {
        let name = work_folder_name(record);
        let parent = self
            .root
            .parent()
            .ok_or_else(|| OrganizeError::InvalidPath(self.root.display().to_string()))?;

        let target = parent.join(name);
        if target == self.root {
            return Ok(None);
        }
        if target.exists() {
            return Err(OrganizeError::DestinationExists(target.display().to_string()));
        }

        if !self.options.dry_run {
            fs::rename(&self.root, &target)?;
        }
        Ok(Some(target))
    }
}
