//! Spotify Web API Data Transfer Objects
//!
//! Only the fields the resolver reads are declared; serde ignores the rest.
//! Do not use these outside the spotify module.

use serde::Deserialize;

/// Client-credentials token response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

/// `GET /v1/search?type=album`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub albums: Option<Paging<SimplifiedAlbum>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimplifiedAlbum {
    pub id: String,
    pub name: String,
}

/// `GET /v1/albums/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumResponse {
    pub id: String,
    pub name: String,
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub images: Vec<Image>,
    pub tracks: Paging<SimplifiedTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimplifiedTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}
