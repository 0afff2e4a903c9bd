//! Embeds album metadata and cover art into downloaded audio.
//!
//! Uses lofty so the same code handles whichever tag format the container
//! prefers (ID3v2 for mp3).

use crate::types::TagError;
use album_model::{Album, Track};
use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::probe::Probe;
use lofty::tag::{Accessor, Tag};
use std::path::Path;
use tracing::debug;

/// Values written into a track's tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackTags {
    pub artist: String,
    pub album: String,
    pub title: String,
}

impl TrackTags {
    pub fn for_track(album: &Album, track: &Track) -> Self {
        Self {
            artist: track.artists_label(),
            album: album.name().to_string(),
            title: track.title_label(),
        }
    }
}

/// Tag a track's audio file with its album's details and front cover.
///
/// Writing the same inputs twice leaves the file with the same tag.
pub fn tag_track(album: &Album, track: &Track) -> Result<(), TagError> {
    let audio = track.file_path.as_deref().ok_or_else(|| TagError::MissingInput {
        track: track.to_string(),
        what: "audio file",
    })?;
    let cover_path = album
        .cover_art_path
        .as_deref()
        .ok_or_else(|| TagError::MissingInput {
            track: track.to_string(),
            what: "cover art",
        })?;
    let cover = std::fs::read(cover_path).map_err(|source| TagError::Cover {
        path: cover_path.to_path_buf(),
        source,
    })?;

    write_tags(audio, &TrackTags::for_track(album, track), cover)
}

/// Write `tags` and a JPEG front cover into the file at `path`
pub fn write_tags(path: &Path, tags: &TrackTags, cover_jpeg: Vec<u8>) -> Result<(), TagError> {
    let lofty_error = |source| TagError::Lofty {
        path: path.to_path_buf(),
        source,
    };

    let mut tagged_file = Probe::open(path)
        .and_then(|probe| probe.read())
        .map_err(lofty_error)?;

    let tag_type = tagged_file.primary_tag_type();
    if tagged_file.tag(tag_type).is_none() {
        debug!(path = %path.display(), ?tag_type, "no tag yet, creating one");
        tagged_file.insert_tag(Tag::new(tag_type));
    }
    let tag = tagged_file
        .tag_mut(tag_type)
        .ok_or_else(|| TagError::NoWritableTag(path.to_path_buf()))?;

    tag.set_artist(tags.artist.clone());
    tag.set_album(tags.album.clone());
    tag.set_title(tags.title.clone());

    tag.remove_picture_type(PictureType::CoverFront);
    tag.push_picture(Picture::new_unchecked(
        PictureType::CoverFront,
        Some(MimeType::Jpeg),
        None,
        cover_jpeg,
    ));

    tagged_file
        .save_to_path(path, WriteOptions::default())
        .map_err(lofty_error)?;
    debug!(path = %path.display(), title = %tags.title, "tags written");
    Ok(())
}
