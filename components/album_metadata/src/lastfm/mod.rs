//! MusicBrainz + Last.fm catalog
//!
//! Fallback album source. MusicBrainz finds the release id for a free-text
//! query, then Last.fm's `album.getinfo` supplies the tracklist and cover.
//!
//! API docs:
//! - https://musicbrainz.org/doc/MusicBrainz_API/Search
//! - https://www.last.fm/api/show/album.getInfo

pub mod dto;
mod adapter;
mod client;

pub use client::LastFmClient;
