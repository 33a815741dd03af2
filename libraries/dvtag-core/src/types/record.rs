/// Canonical metadata record for one work
use crate::types::WorkId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Age-restriction classification of a work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeRating {
    /// Suitable for everyone
    AllAges,
    /// Restricted to 15 and over
    R15,
    /// Restricted to adults
    R18,
}

impl AgeRating {
    /// Text written into the age-rating tag field
    pub fn as_tag_value(self) -> &'static str {
        match self {
            AgeRating::AllAges => "All Ages",
            AgeRating::R15 => "R-15",
            AgeRating::R18 => "R-18",
        }
    }
}

impl fmt::Display for AgeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag_value())
    }
}

/// Everything known about a work, as delivered by a `MetadataProvider`
///
/// Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    /// Stable work identifier
    pub work_id: WorkId,
    /// Work (album) title
    pub title: String,
    /// Circle / publisher name
    pub circle: String,
    /// Performers, in credit order
    pub performers: Vec<String>,
    /// Illustrators, in credit order
    pub illustrators: Vec<String>,
    /// Genre strings, in listing order
    pub genres: Vec<String>,
    /// Release date, textual form preserved as received
    pub release_date: String,
    /// Age-restriction classification
    pub age_rating: AgeRating,
    /// Download count
    pub download_count: u64,
    /// Encoded cover-art source image (any format the artwork crate can decode)
    pub cover_image: Vec<u8>,
}

impl MetadataRecord {
    /// Create a record with empty credit lists and no cover image
    pub fn new(work_id: WorkId, title: impl Into<String>, circle: impl Into<String>) -> Self {
        Self {
            work_id,
            title: title.into(),
            circle: circle.into(),
            performers: Vec::new(),
            illustrators: Vec::new(),
            genres: Vec::new(),
            release_date: String::new(),
            age_rating: AgeRating::AllAges,
            download_count: 0,
            cover_image: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_rating_tag_values() {
        assert_eq!(AgeRating::AllAges.as_tag_value(), "All Ages");
        assert_eq!(AgeRating::R15.to_string(), "R-15");
        assert_eq!(AgeRating::R18.to_string(), "R-18");
    }

    #[test]
    fn age_rating_deserializes_snake_case() {
        let rating: AgeRating = serde_json::from_str("\"r18\"").unwrap();
        assert_eq!(rating, AgeRating::R18);
        let rating: AgeRating = serde_json::from_str("\"all_ages\"").unwrap();
        assert_eq!(rating, AgeRating::AllAges);
    }

    #[test]
    fn new_record_has_empty_lists() {
        let id = WorkId::find_in("RJ123456").unwrap();
        let record = MetadataRecord::new(id.clone(), "Title", "Circle");
        assert_eq!(record.work_id, id);
        assert!(record.performers.is_empty());
        assert!(record.cover_image.is_empty());
    }
}
