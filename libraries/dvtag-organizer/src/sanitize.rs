//! Folder name construction

use dvtag_core::MetadataRecord;

/// Characters that may not appear in a folder name component
const ILLEGAL_CHARS: &[char] = &['\\', '/', '?', ':', '*', '"', '>', '<', '|'];

/// Strip characters that are illegal in folder names, then trim
///
/// ```
/// use dvtag_organizer::sanitize_name_component;
///
/// assert_eq!(sanitize_name_component(" Circle: \"Name\" "), "Circle Name");
/// ```
pub fn sanitize_name_component(s: &str) -> String {
    s.chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Canonical folder name for a work: `[{circle}][{work id}] {title}`
pub fn work_folder_name(record: &MetadataRecord) -> String {
    format!(
        "[{}][{}] {}",
        sanitize_name_component(&record.circle),
        record.work_id,
        sanitize_name_component(&record.title)
    )
}
