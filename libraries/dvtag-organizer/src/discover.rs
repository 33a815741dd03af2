//! Locating work folders below a library root

use crate::natural::natural_entry_cmp;
use crate::{OrganizeError, Result};
use dvtag_core::WorkId;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn carries_work_id(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(WorkId::find_in)
        .is_some()
}

/// Every work folder at or below `root`, in natural order
///
/// A `root` whose own name carries a work identifier is the only result.
/// Otherwise the tree is walked and each directory whose name carries an
/// identifier is returned without descending into it.
pub fn discover_work_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(OrganizeError::FileNotFound(root.display().to_string()));
    }
    if !root.is_dir() {
        return Err(OrganizeError::InvalidPath(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    if carries_work_id(root) {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut found = Vec::new();
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by(natural_entry_cmp)
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if carries_work_id(entry.path()) {
            found.push(entry.into_path());
            walker.skip_current_dir();
        }
    }

    tracing::debug!("Discovered {} work folders under {}", found.len(), root.display());
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn root_with_id_is_the_only_work() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("RJ123456");
        fs::create_dir_all(root.join("RJ654321")).unwrap();

        assert_eq!(discover_work_dirs(&root).unwrap(), vec![root]);
    }

    #[test]
    fn finds_nested_works_in_natural_order() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("circle b/rj10000000 title")).unwrap();
        fs::create_dir_all(root.join("RJ200000/RJ300000")).unwrap();
        fs::create_dir_all(root.join("circle a/[x][RJ100000] y")).unwrap();
        fs::create_dir_all(root.join("misc")).unwrap();
        fs::write(root.join("RJ999999.txt"), b"not a folder").unwrap();

        let found = discover_work_dirs(root).unwrap();
        assert_eq!(
            found,
            vec![
                root.join("circle a/[x][RJ100000] y"),
                root.join("circle b/rj10000000 title"),
                root.join("RJ200000"),
            ]
        );
    }

    #[test]
    fn file_root_is_rejected() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("RJ123456.zip");
        fs::write(&file, b"zip").unwrap();

        assert!(matches!(
            discover_work_dirs(&file),
            Err(OrganizeError::InvalidPath(_))
        ));
    }
}
