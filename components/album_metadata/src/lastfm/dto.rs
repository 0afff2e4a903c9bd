//! MusicBrainz and Last.fm Data Transfer Objects
//!
//! These mirror the JSON both services return. Do not use them outside the
//! lastfm module.

use serde::Deserialize;

/// MusicBrainz `GET /ws/2/release?query=...&fmt=json`
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseSearchResponse {
    #[serde(default)]
    pub releases: Vec<Release>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub id: String,
    pub title: String,
}

/// Last.fm `album.getinfo`.
///
/// Errors arrive as `{"error": 6, "message": "..."}` with no `album`.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumInfoResponse {
    pub album: Option<AlbumInfo>,
    pub error: Option<u32>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumInfo {
    pub name: Option<String>,
    pub artist: Option<String>,
    #[serde(default)]
    pub image: Vec<Image>,
    pub tracks: Option<Tracks>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    #[serde(rename = "#text")]
    pub url: String,
    #[serde(default)]
    pub size: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tracks {
    pub track: OneOrMany<Track>,
}

/// Last.fm collapses one-element lists into a bare object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub name: String,
    pub artist: TrackArtist,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}
