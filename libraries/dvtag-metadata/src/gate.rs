/// Write gate: decides whether a file's tags must be rewritten
use crate::tag_set::TagSet;
use std::collections::BTreeSet;

/// Whether `fresh` differs from what the file already carries
///
/// A file without a tag container always needs a write. Otherwise the two
/// sets are compared field by field and picture by picture; any difference,
/// including fields present on only one side, means a write.
pub fn needs_write(existing: Option<&TagSet>, fresh: &TagSet) -> bool {
    match existing {
        None => true,
        Some(existing) => existing != fresh,
    }
}

/// Keys whose values differ between two tag sets, in key order
///
/// Pictures are reported under the pseudo-key `<pictures>`.
pub fn changed_keys(existing: &TagSet, fresh: &TagSet) -> Vec<String> {
    let keys: BTreeSet<&str> = existing.keys().chain(fresh.keys()).collect();

    let mut changed: Vec<String> = keys
        .into_iter()
        .filter(|key| existing.get(key) != fresh.get(key))
        .map(str::to_string)
        .collect();

    if existing.pictures() != fresh.pictures() {
        changed.push("<pictures>".to_string());
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag_set::EmbeddedPicture;

    fn sample() -> TagSet {
        let mut tags = TagSet::new();
        tags.set("album", "Work");
        tags.set("tracknumber", "1");
        tags.add_picture(EmbeddedPicture::front_cover("image/png", "", vec![9, 9]));
        tags
    }

    #[test]
    fn missing_container_always_needs_write() {
        assert!(needs_write(None, &TagSet::new()));
        assert!(needs_write(None, &sample()));
    }

    #[test]
    fn identical_sets_skip_write() {
        let fresh = sample();
        assert!(!needs_write(Some(&sample()), &fresh));
        assert!(changed_keys(&sample(), &fresh).is_empty());
    }

    #[test]
    fn extra_existing_field_forces_write() {
        let mut existing = sample();
        existing.set("comment", "ripped by someone");
        assert!(needs_write(Some(&existing), &sample()));
        assert_eq!(changed_keys(&existing, &sample()), vec!["comment"]);
    }

    #[test]
    fn changed_value_and_picture_reported() {
        let mut existing = sample();
        existing.set("tracknumber", "2");
        let mut fresh = sample();
        fresh.add_picture(EmbeddedPicture::front_cover("image/png", "", vec![1]));

        assert!(needs_write(Some(&existing), &fresh));
        assert_eq!(
            changed_keys(&existing, &fresh),
            vec!["tracknumber".to_string(), "<pictures>".to_string()]
        );
    }
}
