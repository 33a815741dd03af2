/// Comparable, container-native view of a file's tags
use std::collections::BTreeMap;

/// A picture embedded in a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedPicture {
    /// MIME type, e.g. `image/png`
    pub mime_type: String,
    /// Free-text description (empty when the container has none)
    pub description: String,
    /// Whether the picture is marked as the front cover
    pub front_cover: bool,
    /// Pixel width as recorded by the container (0 when not recorded)
    pub width: u32,
    /// Pixel height as recorded by the container (0 when not recorded)
    pub height: u32,
    /// Bits per pixel as recorded by the container (0 when not recorded)
    pub color_depth: u32,
    /// Encoded image bytes
    pub data: Vec<u8>,
}

impl EmbeddedPicture {
    /// A front-cover picture without recorded geometry
    pub fn front_cover(
        mime_type: impl Into<String>,
        description: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            mime_type: mime_type.into(),
            description: description.into(),
            front_cover: true,
            width: 0,
            height: 0,
            color_depth: 0,
            data,
        }
    }
}

/// Field/value pairs plus pictures, keyed by the container's own field names
///
/// Keys are the native identifiers (`album`, `TALB`, `TXXX:DVTAG_RJID`,
/// `©alb`, `----:com.apple.iTunes:dvtag_rjid`, ...). Field order carries no
/// meaning; the order of values within one field does. Two tag sets are
/// equal only when every field, every value, and every picture matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    fields: BTreeMap<String, Vec<String>>,
    pictures: Vec<EmbeddedPicture>,
}

impl TagSet {
    /// Create an empty tag set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single-valued field, replacing any previous values
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), vec![value.into()]);
    }

    /// Set a multi-valued field; an empty list leaves the field absent
    pub fn set_list(&mut self, key: impl Into<String>, values: &[String]) {
        let key = key.into();
        if values.is_empty() {
            self.fields.remove(&key);
        } else {
            self.fields.insert(key, values.to_vec());
        }
    }

    /// Append one value to a field
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(key.into()).or_default().push(value.into());
    }

    /// Values of a field
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.fields.get(key).map(Vec::as_slice)
    }

    /// First value of a field
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|values| values.first()).map(String::as_str)
    }

    /// Whether a field is present
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// All fields in key order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Field keys in key order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Add a picture
    pub fn add_picture(&mut self, picture: EmbeddedPicture) {
        self.pictures.push(picture);
    }

    /// Embedded pictures, in container order
    pub fn pictures(&self) -> &[EmbeddedPicture] {
        &self.pictures
    }

    /// Number of fields (pictures not included)
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the set has neither fields nor pictures
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.pictures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_and_push_appends() {
        let mut tags = TagSet::new();
        tags.set("album", "First");
        tags.set("album", "Second");
        tags.push("artist", "A");
        tags.push("artist", "B");

        assert_eq!(tags.get("album"), Some(&["Second".to_string()][..]));
        assert_eq!(tags.get("artist").unwrap(), ["A", "B"]);
        assert_eq!(tags.first("artist"), Some("A"));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn empty_list_leaves_field_absent() {
        let mut tags = TagSet::new();
        tags.set_list("artist", &[]);
        assert!(!tags.contains("artist"));
        assert!(tags.is_empty());
    }

    #[test]
    fn equality_ignores_field_order_but_not_value_order() {
        let mut a = TagSet::new();
        a.set("album", "X");
        a.set_list("artist", &["A".to_string(), "B".to_string()]);

        let mut b = TagSet::new();
        b.set_list("artist", &["A".to_string(), "B".to_string()]);
        b.set("album", "X");
        assert_eq!(a, b);

        let mut c = TagSet::new();
        c.set("album", "X");
        c.set_list("artist", &["B".to_string(), "A".to_string()]);
        assert_ne!(a, c);
    }

    #[test]
    fn pictures_take_part_in_equality() {
        let mut a = TagSet::new();
        a.add_picture(EmbeddedPicture::front_cover("image/png", "", vec![1, 2, 3]));
        let mut b = a.clone();
        assert_eq!(a, b);

        b = TagSet::new();
        b.add_picture(EmbeddedPicture::front_cover("image/png", "", vec![1, 2, 4]));
        assert_ne!(a, b);
    }
}
