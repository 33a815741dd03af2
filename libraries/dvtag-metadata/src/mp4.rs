/// MP4 tag sink: `ilst` atoms
use crate::error::{MetadataError, Result};
use crate::sink::TagSink;
use crate::tag_set::{EmbeddedPicture, TagSet};
use crate::track::TrackContext;
use dvtag_artwork::{CoverArt, PNG_MIME_TYPE};
use dvtag_core::{AudioFormat, MetadataRecord};
use lofty::config::{ParseOptions, WriteOptions};
use lofty::mp4::{Atom, AtomData, AtomIdent, Ilst, Mp4File};
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::prelude::*;
use std::borrow::Cow;
use std::fs::File;
use std::path::Path;

const ALBUM: [u8; 4] = *b"\xa9alb";
const ALBUM_ARTIST: [u8; 4] = *b"aART";
const DATE: [u8; 4] = *b"\xa9day";
const ARTIST: [u8; 4] = *b"\xa9ART";
const GENRE: [u8; 4] = *b"\xa9gen";
const TRACK: [u8; 4] = *b"trkn";
const DISC: [u8; 4] = *b"disk";
const COVER: [u8; 4] = *b"covr";

const TEXT_ATOMS: [[u8; 4]; 5] = [ALBUM, ALBUM_ARTIST, DATE, ARTIST, GENRE];

const FREEFORM_MEAN: &str = "com.apple.iTunes";
const FREEFORM_PREFIX: &str = "----:";
const RJID: &str = "dvtag_rjid";
const AGE_RESTRICTION: &str = "dvtag_age_restriction";
const DL_COUNT: &str = "dvtag_dl_count";
const ILLUSTRATORS: &str = "dvtag_illustrators";
const FREEFORM_NAMES: [&str; 4] = [RJID, AGE_RESTRICTION, DL_COUNT, ILLUSTRATORS];

const LIST_SEPARATOR: &str = "; ";
const ILLUSTRATOR_SEPARATOR: &str = ", ";

/// Tag set key of a four-character atom (`©` and friends are Latin-1)
fn fourcc_key(fourcc: [u8; 4]) -> String {
    fourcc.iter().map(|&b| char::from(b)).collect()
}

fn freeform_key(name: &str) -> String {
    format!("{FREEFORM_PREFIX}{FREEFORM_MEAN}:{name}")
}

fn freeform_ident(name: &'static str) -> AtomIdent<'static> {
    AtomIdent::Freeform {
        mean: Cow::Borrowed(FREEFORM_MEAN),
        name: Cow::Borrowed(name),
    }
}

/// Parse a tag set key back into an atom identifier
fn ident_for(key: &str) -> Result<AtomIdent<'static>> {
    if let Some(rest) = key.strip_prefix(FREEFORM_PREFIX) {
        let (mean, name) = rest
            .split_once(':')
            .ok_or_else(|| MetadataError::invalid_field("MP4", key))?;
        return Ok(AtomIdent::Freeform {
            mean: Cow::Owned(mean.to_string()),
            name: Cow::Owned(name.to_string()),
        });
    }

    let bytes = key
        .chars()
        .map(|c| u8::try_from(u32::from(c)).ok())
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(|| MetadataError::invalid_field("MP4", key))?;
    let fourcc: [u8; 4] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| MetadataError::invalid_field("MP4", key))?;
    Ok(AtomIdent::Fourcc(fourcc))
}

fn managed_idents() -> Vec<AtomIdent<'static>> {
    TEXT_ATOMS
        .into_iter()
        .chain([TRACK, DISC, COVER])
        .map(AtomIdent::Fourcc)
        .chain(FREEFORM_NAMES.into_iter().map(freeform_ident))
        .collect()
}

/// Parse the leading number of a `n/total` pair
fn pair_number(key: &str, value: &str) -> Result<u32> {
    value
        .split('/')
        .next()
        .and_then(|n| n.trim().parse().ok())
        .ok_or_else(|| MetadataError::invalid_field("MP4", key))
}

fn push_atom_values(tags: &mut TagSet, key: &str, atom: &Atom<'_>) {
    for data in atom.data() {
        match data {
            AtomData::UTF8(text) | AtomData::UTF16(text) => tags.push(key, text.as_str()),
            other => tags.push(key, format!("{other:?}")),
        }
    }
}

/// Writes the managed `ilst` atoms of an MP4 file
///
/// Only the album-level atoms, `trkn`, `disk`, `covr`, and the `dvtag_*`
/// freeform atoms are managed. Everything else in the `ilst` (the track
/// title `©nam` included) is left as the file had it.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mp4Sink;

impl Mp4Sink {
    /// Create an MP4 sink
    pub fn new() -> Self {
        Self
    }

    fn read_ilst(path: &Path) -> Result<Option<Ilst>> {
        let mut file = File::open(path)?;
        let mp4 = Mp4File::read_from(&mut file, ParseOptions::new().read_properties(false))?;
        Ok(mp4.ilst().cloned())
    }
}

impl TagSink for Mp4Sink {
    fn format(&self) -> AudioFormat {
        AudioFormat::Mp4
    }

    fn build_fresh(
        &self,
        record: &MetadataRecord,
        cover: &CoverArt,
        track: &TrackContext,
    ) -> TagSet {
        let mut tags = TagSet::new();

        tags.set(fourcc_key(ALBUM), record.title.as_str());
        tags.set(fourcc_key(TRACK), format!("{}/0", track.position));
        if !record.performers.is_empty() {
            tags.set(fourcc_key(ARTIST), record.performers.join(LIST_SEPARATOR));
        }
        tags.set(fourcc_key(ALBUM_ARTIST), record.circle.as_str());
        if !record.release_date.is_empty() {
            tags.set(fourcc_key(DATE), record.release_date.as_str());
        }
        if !record.genres.is_empty() {
            tags.set(
                fourcc_key(GENRE),
                format!("{};", record.genres.join(LIST_SEPARATOR)),
            );
        }
        tags.set(freeform_key(RJID), record.work_id.as_str());
        tags.set(freeform_key(AGE_RESTRICTION), record.age_rating.as_tag_value());
        tags.set(freeform_key(DL_COUNT), record.download_count.to_string());
        if !record.illustrators.is_empty() {
            tags.set(
                freeform_key(ILLUSTRATORS),
                record.illustrators.join(ILLUSTRATOR_SEPARATOR),
            );
        }
        if let Some(disc) = track.disc {
            tags.set(fourcc_key(DISC), format!("{disc}/0"));
        }

        tags.add_picture(EmbeddedPicture::front_cover(
            PNG_MIME_TYPE,
            "",
            cover.png_bytes().to_vec(),
        ));

        tags
    }

    fn read_existing(&self, path: &Path) -> Result<Option<TagSet>> {
        let Some(ilst) = Self::read_ilst(path)? else {
            return Ok(None);
        };

        let mut tags = TagSet::new();

        for fourcc in TEXT_ATOMS {
            if let Some(atom) = ilst.get(&AtomIdent::Fourcc(fourcc)) {
                push_atom_values(&mut tags, &fourcc_key(fourcc), atom);
            }
        }
        for name in FREEFORM_NAMES {
            if let Some(atom) = ilst.get(&freeform_ident(name)) {
                push_atom_values(&mut tags, &freeform_key(name), atom);
            }
        }

        if let Some(position) = ilst.track() {
            let total = ilst.track_total().unwrap_or(0);
            tags.set(fourcc_key(TRACK), format!("{position}/{total}"));
        }
        if let Some(disc) = ilst.disk() {
            let total = ilst.disk_total().unwrap_or(0);
            tags.set(fourcc_key(DISC), format!("{disc}/{total}"));
        }

        if let Some(covr) = ilst.get(&AtomIdent::Fourcc(COVER)) {
            for data in covr.data() {
                if let AtomData::Picture(picture) = data {
                    // MP4 has no picture types; every covr image counts as the front cover
                    tags.add_picture(EmbeddedPicture::front_cover(
                        picture
                            .mime_type()
                            .map(|mime| mime.as_str().to_string())
                            .unwrap_or_default(),
                        picture.description().unwrap_or_default(),
                        picture.data().to_vec(),
                    ));
                }
            }
        }

        Ok(Some(tags))
    }

    fn write(&self, path: &Path, tags: &TagSet) -> Result<()> {
        let mut ilst = Self::read_ilst(path)?.unwrap_or_default();

        for ident in managed_idents() {
            ilst.remove(&ident).for_each(drop);
        }

        for (key, values) in tags.fields() {
            let ident = ident_for(key)?;
            match ident {
                AtomIdent::Fourcc(TRACK) => {
                    let value = values.first().map_or("", String::as_str);
                    ilst.set_track(pair_number(key, value)?);
                }
                AtomIdent::Fourcc(DISC) => {
                    let value = values.first().map_or("", String::as_str);
                    ilst.set_disk(pair_number(key, value)?);
                }
                ident => {
                    for value in values {
                        ilst.insert(Atom::new(ident.clone(), AtomData::UTF8(value.clone())));
                    }
                }
            }
        }

        for picture in tags.pictures() {
            ilst.insert_picture(Picture::new_unchecked(
                PictureType::CoverFront,
                Some(MimeType::from_str(&picture.mime_type)),
                None,
                picture.data.clone(),
            ));
        }

        ilst.save_to_path(path, WriteOptions::default())?;
        tracing::debug!("Wrote {} ilst atoms to {}", tags.len(), path.display());
        Ok(())
    }
}
