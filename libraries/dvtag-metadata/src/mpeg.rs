/// MP3 tag sink: ID3v2.4 frames
use crate::error::{MetadataError, Result};
use crate::sink::TagSink;
use crate::tag_set::{EmbeddedPicture, TagSet};
use crate::track::TrackContext;
use dvtag_artwork::{CoverArt, PNG_MIME_TYPE};
use dvtag_core::{AudioFormat, MetadataRecord};
use id3::frame::{Content, ExtendedText, Picture, PictureType};
use id3::{ErrorKind, Tag, TagLike, Version};
use std::path::Path;

const TITLE: &str = "TIT2";
const ALBUM: &str = "TALB";
const TRACK: &str = "TRCK";
const DISC: &str = "TPOS";
const ARTIST: &str = "TPE1";
const ALBUM_ARTIST: &str = "TPE2";
const DATE: &str = "TDRC";
const GENRE: &str = "TCON";

const EXTENDED_PREFIX: &str = "TXXX:";
const RJID: &str = "DVTAG_RJID";
const AGE_RESTRICTION: &str = "DVTAG_AGE_RESTRICTION";
const DL_COUNT: &str = "DVTAG_DL_COUNT";
const ILLUSTRATORS: &str = "DVTAG_ILLUSTRATORS";

const PICTURE_DESCRIPTION: &str = "Front Cover";
const PERFORMER_SEPARATOR: &str = "/";
const VALUE_SEPARATOR: &str = "\0";

fn extended(description: &str) -> String {
    format!("{EXTENDED_PREFIX}{description}")
}

/// Writes a complete ID3v2.4 tag
///
/// Every frame in the tag is managed: rewriting replaces the whole tag.
#[derive(Debug, Default, Clone, Copy)]
pub struct Id3Sink;

impl Id3Sink {
    /// Create an ID3 sink
    pub fn new() -> Self {
        Self
    }
}

fn split_values(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(VALUE_SEPARATOR).map(str::to_string)
}

fn snapshot(tag: &Tag) -> TagSet {
    let mut tags = TagSet::new();

    for frame in tag.frames() {
        match frame.content() {
            Content::Text(text) => {
                for value in split_values(text) {
                    tags.push(frame.id(), value);
                }
            }
            Content::ExtendedText(ExtendedText { description, value }) => {
                let key = extended(description);
                for value in split_values(value) {
                    tags.push(key.as_str(), value);
                }
            }
            Content::Picture(picture) => tags.add_picture(EmbeddedPicture {
                mime_type: picture.mime_type.clone(),
                description: picture.description.clone(),
                front_cover: picture.picture_type == PictureType::CoverFront,
                width: 0,
                height: 0,
                color_depth: 0,
                data: picture.data.clone(),
            }),
            other => tags.push(frame.id(), format!("{other:?}")),
        }
    }

    tags
}

impl TagSink for Id3Sink {
    fn format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    fn build_fresh(
        &self,
        record: &MetadataRecord,
        cover: &CoverArt,
        track: &TrackContext,
    ) -> TagSet {
        let mut tags = TagSet::new();

        tags.set(ALBUM, record.title.as_str());
        tags.set(ALBUM_ARTIST, record.circle.as_str());
        if !record.release_date.is_empty() {
            tags.set(DATE, record.release_date.as_str());
        }
        tags.set_list(GENRE, &record.genres);
        if let Some(disc) = track.disc {
            tags.set(DISC, disc.to_string());
        }
        tags.set(extended(RJID), record.work_id.as_str());
        tags.set(extended(AGE_RESTRICTION), record.age_rating.as_tag_value());
        tags.set(extended(DL_COUNT), record.download_count.to_string());
        tags.set_list(extended(ILLUSTRATORS), &record.illustrators);
        if !record.performers.is_empty() {
            tags.set(ARTIST, record.performers.join(PERFORMER_SEPARATOR));
        }
        tags.set(TITLE, track.title.as_str());
        tags.set(TRACK, track.position.to_string());

        tags.add_picture(EmbeddedPicture::front_cover(
            PNG_MIME_TYPE,
            PICTURE_DESCRIPTION,
            cover.png_bytes().to_vec(),
        ));

        tags
    }

    fn read_existing(&self, path: &Path) -> Result<Option<TagSet>> {
        match Tag::read_from_path(path) {
            Ok(tag) => Ok(Some(snapshot(&tag))),
            Err(err) if matches!(err.kind, ErrorKind::NoTag) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, path: &Path, tags: &TagSet) -> Result<()> {
        let mut tag = Tag::new();

        for (key, values) in tags.fields() {
            let joined = values.join(VALUE_SEPARATOR);
            if let Some(description) = key.strip_prefix(EXTENDED_PREFIX) {
                tag.add_frame(ExtendedText {
                    description: description.to_string(),
                    value: joined,
                });
            } else if key.len() == 4 && key.starts_with('T') {
                tag.set_text(key, joined);
            } else {
                return Err(MetadataError::invalid_field("ID3", key));
            }
        }

        for picture in tags.pictures() {
            tag.add_frame(Picture {
                mime_type: picture.mime_type.clone(),
                picture_type: if picture.front_cover {
                    PictureType::CoverFront
                } else {
                    PictureType::Other
                },
                description: picture.description.clone(),
                data: picture.data.clone(),
            });
        }

        tag.write_to_path(path, Version::Id3v24)?;
        tracing::debug!("Wrote {} ID3 frames to {}", tags.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dvtag_core::WorkId;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn cover() -> CoverArt {
        let mut png = Cursor::new(Vec::new());
        RgbImage::new(2, 2)
            .write_to(&mut png, ImageFormat::Png)
            .unwrap();
        CoverArt::decode(png.get_ref()).unwrap()
    }

    fn record() -> MetadataRecord {
        let mut record =
            MetadataRecord::new(WorkId::find_in("RJ01234567").unwrap(), "Work", "Circle");
        record.performers = vec!["A".to_string(), "B".to_string()];
        record.genres = vec!["ASMR".to_string(), "Binaural".to_string()];
        record.illustrators = vec!["Painter".to_string()];
        record.download_count = 7;
        record
    }

    #[test]
    fn builds_frames() {
        let track = TrackContext::new(2, Some(1), "Second");
        let tags = Id3Sink.build_fresh(&record(), &cover(), &track);

        assert_eq!(tags.first(ALBUM), Some("Work"));
        assert_eq!(tags.first(ARTIST), Some("A/B"));
        assert_eq!(tags.get(GENRE).unwrap(), ["ASMR", "Binaural"]);
        assert_eq!(tags.first(TRACK), Some("2"));
        assert_eq!(tags.first(DISC), Some("1"));
        assert_eq!(tags.first("TXXX:DVTAG_RJID"), Some("RJ01234567"));
        assert_eq!(tags.first("TXXX:DVTAG_AGE_RESTRICTION"), Some("All Ages"));
        assert_eq!(tags.first("TXXX:DVTAG_DL_COUNT"), Some("7"));
        assert_eq!(tags.get("TXXX:DVTAG_ILLUSTRATORS").unwrap(), ["Painter"]);
        assert!(!tags.contains(DATE));

        let picture = &tags.pictures()[0];
        assert_eq!(picture.description, "Front Cover");
        assert_eq!(picture.mime_type, "image/png");
    }

    #[test]
    fn omits_empty_lists_and_disc() {
        let mut record = record();
        record.performers.clear();
        record.genres.clear();
        let tags = Id3Sink.build_fresh(&record, &cover(), &TrackContext::new(1, None, "One"));

        assert!(!tags.contains(ARTIST));
        assert!(!tags.contains(GENRE));
        assert!(!tags.contains(DISC));
    }

    #[test]
    fn snapshot_splits_multi_value_text() {
        let mut tag = Tag::new();
        tag.set_text(GENRE, "ASMR\0Binaural");
        tag.add_frame(ExtendedText {
            description: RJID.to_string(),
            value: "RJ123456".to_string(),
        });

        let tags = snapshot(&tag);
        assert_eq!(tags.get(GENRE).unwrap(), ["ASMR", "Binaural"]);
        assert_eq!(tags.first("TXXX:DVTAG_RJID"), Some("RJ123456"));
    }

    #[test]
    fn rejects_non_text_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.mp3");
        std::fs::write(&path, b"audio").unwrap();

        let mut tags = TagSet::new();
        tags.set("COMM", "nope");
        let result = Id3Sink.write(&path, &tags);
        assert!(matches!(result, Err(MetadataError::InvalidField { .. })));
    }
}
