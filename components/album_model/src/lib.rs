//! Album and track domain model
//!
//! An [`Album`] owns its tracklist. Tracks are appended in source order and
//! receive 1-based [`TrackId`]s at append time, so ids always mirror the
//! position in the tracklist.
//!
//! # Examples
//!
//! ```
//! use album_model::{Album, NewTrack};
//!
//! let mut album = Album::new("Glory Sound Prep", ["Jon Bellion"])?;
//! album.push(NewTrack::new("Conversations with my Wife", ["Jon Bellion"])?);
//! album.push(NewTrack::new("JT", ["Jon Bellion"])?);
//!
//! assert_eq!(album.label(), "Glory Sound Prep - Jon Bellion");
//! assert_eq!(album.track(1)?.to_string(), "2 - JT - Jon Bellion");
//! # Ok::<(), album_model::AlbumError>(())
//! ```

mod album;
mod track;

pub use album::Album;
pub use track::{NewTrack, Track, TrackId};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlbumError {
    #[error("track index {index} out of range for album of {len} tracks")]
    OutOfRange { index: usize, len: usize },

    #[error("track position must be an integer, got {0:?}")]
    NotAnIndex(String),

    #[error("{0} needs at least one artist")]
    MissingArtist(String),
}
