use crate::AlbumError;
use std::fmt;
use std::path::PathBuf;

/// Position of a track within its album, starting at 1.
///
/// Only an [`Album`](crate::Album) hands these out, when a track is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackId(u32);

impl TrackId {
    pub(crate) fn from_len(len: usize) -> Self {
        Self(len as u32 + 1)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A track that has not been appended to an album yet.
///
/// Each value owns its own `features` list; there is no shared default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrack {
    title: String,
    artists: Vec<String>,
    features: Vec<String>,
}

impl NewTrack {
    pub fn new<I, S>(title: impl Into<String>, artists: I) -> Result<Self, AlbumError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let title = title.into();
        let artists: Vec<String> = artists.into_iter().map(Into::into).collect();
        if artists.is_empty() {
            return Err(AlbumError::MissingArtist(format!("track {:?}", title)));
        }

        Ok(Self {
            title,
            artists,
            features: Vec::new(),
        })
    }

    /// Credit guest artists on the track
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    pub(crate) fn attach(self, id: TrackId) -> Track {
        Track {
            id,
            title: self.title,
            artists: self.artists,
            features: self.features,
            download_link: None,
            file_path: None,
        }
    }
}

/// A track owned by an [`Album`](crate::Album).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    id: TrackId,
    title: String,
    artists: Vec<String>,
    features: Vec<String>,

    /// Playable source the audio was resolved to
    pub download_link: Option<String>,

    /// Downloaded audio file
    pub file_path: Option<PathBuf>,
}

impl Track {
    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Query handed to the audio search: title followed by every artist
    pub fn search_term(&self) -> String {
        format!("{} {}", self.title, self.artists.join(" "))
    }

    pub fn artists_label(&self) -> String {
        self.artists.join(", ")
    }

    /// Guest artists worth printing.
    ///
    /// Names already credited as artists, or already spelled out in the
    /// title, are left out.
    pub fn credited_features(&self) -> Vec<&str> {
        let mut credited: Vec<&str> = Vec::new();
        for feature in &self.features {
            if self.artists.contains(feature)
                || self.title.contains(feature.as_str())
                || credited.contains(&feature.as_str())
            {
                continue;
            }
            credited.push(feature);
        }
        credited
    }

    pub fn title_label(&self) -> String {
        let features = self.credited_features();
        if features.is_empty() {
            self.title.clone()
        } else {
            format!("{} ft. {}", self.title, features.join(", "))
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {}",
            self.id,
            self.title_label(),
            self.artists_label()
        )
    }
}
