use crate::track::{NewTrack, Track, TrackId};
use crate::AlbumError;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    name: String,
    artists: Vec<String>,
    tracklist: Vec<Track>,

    /// Remote artwork, highest resolution the catalog offered
    pub cover_art_link: Option<String>,

    /// Downloaded artwork
    pub cover_art_path: Option<PathBuf>,

    /// Working directory holding this album's downloads
    pub directory_path: Option<PathBuf>,
}

impl Album {
    pub fn new<I, S>(name: impl Into<String>, artists: I) -> Result<Self, AlbumError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let artists: Vec<String> = artists.into_iter().map(Into::into).collect();
        if artists.is_empty() {
            return Err(AlbumError::MissingArtist(format!("album {:?}", name)));
        }

        Ok(Self {
            name,
            artists,
            tracklist: Vec::new(),
            cover_art_link: None,
            cover_art_path: None,
            directory_path: None,
        })
    }

    /// Wrap a lone track in an album named `"<title> - Single"`
    pub fn single(track: NewTrack) -> Self {
        let mut album = Self {
            name: format!("{} - Single", track.title()),
            artists: track.artists().to_vec(),
            tracklist: Vec::with_capacity(1),
            cover_art_link: None,
            cover_art_path: None,
            directory_path: None,
        };
        album.push(track);
        album
    }

    /// Append a track, giving it the next id
    pub fn push(&mut self, track: NewTrack) -> &Track {
        let id = TrackId::from_len(self.tracklist.len());
        self.tracklist.push(track.attach(id));
        &self.tracklist[self.tracklist.len() - 1]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    pub fn tracklist(&self) -> &[Track] {
        &self.tracklist
    }

    pub fn len(&self) -> usize {
        self.tracklist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracklist.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracklist.iter()
    }

    /// `"<name> - <artists>"`; also names the download directory and archive
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.artists.join(", "))
    }

    /// Track at a zero-based position
    pub fn track(&self, index: usize) -> Result<&Track, AlbumError> {
        self.tracklist.get(index).ok_or(AlbumError::OutOfRange {
            index,
            len: self.tracklist.len(),
        })
    }

    pub fn track_mut(&mut self, index: usize) -> Result<&mut Track, AlbumError> {
        let len = self.tracklist.len();
        self.tracklist
            .get_mut(index)
            .ok_or(AlbumError::OutOfRange { index, len })
    }

    /// Track at a zero-based position given as text, e.g. from user input
    pub fn track_by_position(&self, position: &str) -> Result<&Track, AlbumError> {
        let index = position
            .trim()
            .parse::<usize>()
            .map_err(|_| AlbumError::NotAnIndex(position.to_string()))?;
        self.track(index)
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl<'a> IntoIterator for &'a Album {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracklist.iter()
    }
}
