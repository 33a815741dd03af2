/// FLAC tag sink: Vorbis comments plus PICTURE blocks
use crate::error::Result;
use crate::sink::TagSink;
use crate::tag_set::{EmbeddedPicture, TagSet};
use crate::track::TrackContext;
use dvtag_artwork::{CoverArt, PNG_MIME_TYPE};
use dvtag_core::{AudioFormat, MetadataRecord};
use lofty::config::{ParseOptions, WriteOptions};
use lofty::flac::FlacFile;
use lofty::ogg::{OggPictureStorage, VorbisComments};
use lofty::picture::{MimeType, Picture, PictureInformation, PictureType};
use lofty::prelude::*;
use std::fs::{self, File};
use std::path::Path;

const TITLE: &str = "title";
const ALBUM: &str = "album";
const TRACK_NUMBER: &str = "tracknumber";
const DISC_NUMBER: &str = "discnumber";
const ARTIST: &str = "artist";
const ALBUM_ARTIST: &str = "albumartist";
const DATE: &str = "date";
const RJID: &str = "dvtag_rjid";
const AGE_RESTRICTION: &str = "dvtag_age_restriction";
const DL_COUNT: &str = "dvtag_dl_count";
const ILLUSTRATORS: &str = "dvtag_illustrators";

const FLAC_MAGIC: &[u8] = b"fLaC";
const BLOCK_HEADER_LEN: usize = 4;
const LAST_BLOCK_FLAG: u8 = 0x80;
const BLOCK_TYPE_MASK: u8 = 0x7F;
const BLOCK_TYPE_PADDING: u8 = 1;
const PADDING_LEN: u32 = 1024;

/// Header offset and end offset of the final metadata block
fn last_metadata_block(bytes: &[u8]) -> Option<(usize, usize)> {
    if !bytes.starts_with(FLAC_MAGIC) {
        return None;
    }

    let mut offset = FLAC_MAGIC.len();
    loop {
        let header = bytes.get(offset..offset + BLOCK_HEADER_LEN)?;
        let len = u32::from_be_bytes([0, header[1], header[2], header[3]]) as usize;
        let end = offset + BLOCK_HEADER_LEN + len;
        if header[0] & LAST_BLOCK_FLAG != 0 {
            return (end <= bytes.len()).then_some((offset, end));
        }
        offset = end;
    }
}

/// Make the metadata chain end in a PADDING block
///
/// lofty only splices rewritten comment and picture blocks in correctly
/// ahead of a final PADDING block; without one it overwrites the frames.
fn ensure_trailing_padding(path: &Path) -> Result<()> {
    let mut bytes = fs::read(path)?;
    let Some((last, end)) = last_metadata_block(&bytes) else {
        return Ok(());
    };
    if bytes[last] & BLOCK_TYPE_MASK == BLOCK_TYPE_PADDING {
        return Ok(());
    }

    bytes[last] &= BLOCK_TYPE_MASK;
    let mut padding = vec![LAST_BLOCK_FLAG | BLOCK_TYPE_PADDING];
    padding.extend_from_slice(&PADDING_LEN.to_be_bytes()[1..]);
    padding.resize(BLOCK_HEADER_LEN + PADDING_LEN as usize, 0);
    bytes.splice(end..end, padding);

    fs::write(path, bytes)?;
    tracing::debug!("Added a PADDING block to {}", path.display());
    Ok(())
}

/// Writes Vorbis comments and a front-cover PICTURE block
///
/// The whole comment block is managed: anything not produced by
/// `build_fresh` is dropped on write. The vendor string is kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlacSink;

impl FlacSink {
    /// Create a FLAC sink
    pub fn new() -> Self {
        Self
    }

    fn read_file(path: &Path) -> Result<FlacFile> {
        let mut file = File::open(path)?;
        let flac = FlacFile::read_from(&mut file, ParseOptions::new().read_properties(false))?;
        Ok(flac)
    }
}

fn picture_from_lofty(picture: &Picture, info: &PictureInformation) -> EmbeddedPicture {
    EmbeddedPicture {
        mime_type: picture
            .mime_type()
            .map(|mime| mime.as_str().to_string())
            .unwrap_or_default(),
        description: picture.description().unwrap_or_default().to_string(),
        front_cover: picture.pic_type() == PictureType::CoverFront,
        width: info.width,
        height: info.height,
        color_depth: info.color_depth,
        data: picture.data().to_vec(),
    }
}

impl TagSink for FlacSink {
    fn format(&self) -> AudioFormat {
        AudioFormat::Flac
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
        tags.set_list(ARTIST, &record.performers);
        tags.set(RJID, record.work_id.as_str());
        tags.set(AGE_RESTRICTION, record.age_rating.as_tag_value());
        tags.set(DL_COUNT, record.download_count.to_string());
        tags.set_list(ILLUSTRATORS, &record.illustrators);
        if let Some(disc) = track.disc {
            tags.set(DISC_NUMBER, disc.to_string());
        }
        tags.set(TITLE, track.title.as_str());
        tags.set(TRACK_NUMBER, track.position.to_string());

        tags.add_picture(EmbeddedPicture {
            mime_type: PNG_MIME_TYPE.to_string(),
            description: String::new(),
            front_cover: true,
            width: cover.width(),
            height: cover.height(),
            color_depth: cover.color_depth(),
            data: cover.png_bytes().to_vec(),
        });

        tags
    }

    fn read_existing(&self, path: &Path) -> Result<Option<TagSet>> {
        let flac = Self::read_file(path)?;

        let mut tags = TagSet::new();
        if let Some(comments) = flac.vorbis_comments() {
            for (key, value) in comments.items() {
                tags.push(key.to_ascii_lowercase(), value);
            }
            for (picture, info) in comments.pictures() {
                tags.add_picture(picture_from_lofty(picture, info));
            }
        }
        for (picture, info) in flac.pictures() {
            tags.add_picture(picture_from_lofty(picture, info));
        }

        if tags.is_empty() && flac.vorbis_comments().is_none() {
            return Ok(None);
        }
        Ok(Some(tags))
    }

    fn write(&self, path: &Path, tags: &TagSet) -> Result<()> {
        let existing = Self::read_file(path)?;
        ensure_trailing_padding(path)?;

        let mut comments = VorbisComments::default();
        if let Some(previous) = existing.vorbis_comments() {
            comments.set_vendor(previous.vendor().to_string());
        }

        for (key, values) in tags.fields() {
            for value in values {
                comments.push(key.to_string(), value.clone());
            }
        }

        for picture in tags.pictures() {
            let pic_type = if picture.front_cover {
                PictureType::CoverFront
            } else {
                PictureType::Other
            };
            let lofty_picture = Picture::new_unchecked(
                pic_type,
                Some(MimeType::from_str(&picture.mime_type)),
                Some(picture.description.clone()).filter(|d| !d.is_empty()),
                picture.data.clone(),
            );
            let info = PictureInformation {
                width: picture.width,
                height: picture.height,
                color_depth: picture.color_depth,
                num_colors: 0,
            };
            comments.insert_picture(lofty_picture, Some(info))?;
        }

        comments.save_to_path(path, WriteOptions::default())?;
        tracing::debug!("Wrote {} Vorbis comments to {}", tags.len(), path.display());
        Ok(())
    }
}
