//! Spotify Web API catalog
//!
//! Primary album source. Uses the client-credentials flow, so no user
//! login is involved.
//!
//! API docs: https://developer.spotify.com/documentation/web-api

pub mod dto;
mod adapter;
mod client;

pub use client::SpotifyClient;
