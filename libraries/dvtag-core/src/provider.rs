//! Metadata provider backed by JSON record files
//!
//! Records live in one directory, one file per work, named `<WORKID>.json`:
//!
//! ```json
//! {
//!   "title": "Some Work",
//!   "circle": "Some Circle",
//!   "performers": ["A", "B"],
//!   "illustrators": ["C"],
//!   "genres": ["ASMR", "Binaural"],
//!   "release_date": "2021-03-04",
//!   "age_rating": "all_ages",
//!   "download_count": 1234,
//!   "cover": "RJ123456.png"
//! }
//! ```
//!
//! `cover` is resolved relative to the JSON file.

use crate::error::{DvtagError, Result};
use crate::traits::MetadataProvider;
use crate::types::{AgeRating, MetadataRecord, WorkId};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct RecordFile {
    title: String,
    circle: String,
    #[serde(default)]
    performers: Vec<String>,
    #[serde(default)]
    illustrators: Vec<String>,
    #[serde(default)]
    genres: Vec<String>,
    release_date: String,
    age_rating: AgeRating,
    #[serde(default)]
    download_count: u64,
    cover: PathBuf,
}

/// Reads `<dir>/<WORKID>.json` records from disk
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    dir: PathBuf,
}

impl JsonFileProvider {
    /// Create a provider over a directory of record files
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the records are read from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, work_id: &WorkId) -> PathBuf {
        self.dir.join(format!("{}.json", work_id))
    }
}

impl MetadataProvider for JsonFileProvider {
    fn fetch(&self, work_id: &WorkId) -> Result<MetadataRecord> {
        let path = self.record_path(work_id);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(DvtagError::WorkNotFound(work_id.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        let file: RecordFile = serde_json::from_str(&text)?;

        let cover_path = self.dir.join(&file.cover);
        let cover_image = fs::read(&cover_path).map_err(|e| {
            DvtagError::invalid_record(
                work_id.clone(),
                format!("cover {}: {}", cover_path.display(), e),
            )
        })?;

        tracing::debug!("Loaded record {} from {}", work_id, path.display());

        Ok(MetadataRecord {
            work_id: work_id.clone(),
            title: file.title,
            circle: file.circle,
            performers: file.performers,
            illustrators: file.illustrators,
            genres: file.genres,
            release_date: file.release_date,
            age_rating: file.age_rating,
            download_count: file.download_count,
            cover_image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn work_id() -> WorkId {
        WorkId::find_in("RJ123456").unwrap()
    }

    #[test]
    fn missing_record_is_work_not_found() {
        let temp = TempDir::new().unwrap();
        let provider = JsonFileProvider::new(temp.path());

        let err = provider.fetch(&work_id()).unwrap_err();
        assert!(matches!(err, DvtagError::WorkNotFound(id) if id == work_id()));
    }

    #[test]
    fn reads_record_and_cover() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("cover.png"), b"image bytes").unwrap();
        fs::write(
            temp.path().join("RJ123456.json"),
            r#"{
                "title": "Work",
                "circle": "Circle",
                "performers": ["A", "B"],
                "genres": ["G"],
                "release_date": "2020-01-02",
                "age_rating": "r15",
                "download_count": 42,
                "cover": "cover.png"
            }"#,
        )
        .unwrap();

        let record = JsonFileProvider::new(temp.path()).fetch(&work_id()).unwrap();
        assert_eq!(record.title, "Work");
        assert_eq!(record.performers, vec!["A", "B"]);
        assert!(record.illustrators.is_empty());
        assert_eq!(record.age_rating, AgeRating::R15);
        assert_eq!(record.download_count, 42);
        assert_eq!(record.cover_image, b"image bytes");
    }

    #[test]
    fn missing_cover_is_invalid_record() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("RJ123456.json"),
            r#"{"title": "W", "circle": "C", "release_date": "2020", "age_rating": "r18", "cover": "nope.png"}"#,
        )
        .unwrap();

        let err = JsonFileProvider::new(temp.path()).fetch(&work_id()).unwrap_err();
        assert!(matches!(err, DvtagError::InvalidRecord { .. }));
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("RJ123456.json"), "{ not json").unwrap();

        let err = JsonFileProvider::new(temp.path()).fetch(&work_id()).unwrap_err();
        assert!(matches!(err, DvtagError::Serialization(_)));
    }
}
