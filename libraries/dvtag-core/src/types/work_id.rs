/// Work identifier parsed from folder names
use crate::error::{DvtagError, Result};
use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static WORK_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[BRV][JE][0-9]{6}(?:[0-9]{2})?").expect("work id pattern is valid")
});

/// Stable alphanumeric identifier of a work (`RJ123456`, `RJ01234567`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkId(String);

impl WorkId {
    /// Search `name` for the first work identifier, normalised to upper case
    pub fn find_in(name: &str) -> Option<Self> {
        WORK_ID_PATTERN
            .find(name)
            .map(|m| Self(m.as_str().to_ascii_uppercase()))
    }

    /// Parse the identifier out of a work folder name
    ///
    /// # Errors
    /// Returns `DvtagError::InvalidWorkId` when the name carries no identifier
    pub fn from_folder_name(name: &str) -> Result<Self> {
        Self::find_in(name).ok_or_else(|| DvtagError::InvalidWorkId(name.to_string()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_six_digit_id() {
        let id = WorkId::find_in("RJ123456").unwrap();
        assert_eq!(id.as_str(), "RJ123456");
    }

    #[test]
    fn finds_eight_digit_id_inside_decorated_name() {
        let id = WorkId::find_in("[Some Circle][RJ01234567] Title").unwrap();
        assert_eq!(id.as_str(), "RJ01234567");
    }

    #[test]
    fn normalises_case() {
        let id = WorkId::find_in("rj654321 lowercase").unwrap();
        assert_eq!(id.to_string(), "RJ654321");
    }

    #[test]
    fn accepts_other_prefixes() {
        assert_eq!(WorkId::find_in("BJ123456").unwrap().as_str(), "BJ123456");
        assert_eq!(WorkId::find_in("VJ01000000").unwrap().as_str(), "VJ01000000");
        assert_eq!(WorkId::find_in("RE123456").unwrap().as_str(), "RE123456");
    }

    #[test]
    fn rejects_names_without_id() {
        assert!(WorkId::find_in("My Music").is_none());
        assert!(WorkId::find_in("RJ12345").is_none());

        let err = WorkId::from_folder_name("Disc 1").unwrap_err();
        assert!(matches!(err, DvtagError::InvalidWorkId(name) if name == "Disc 1"));
    }
}
