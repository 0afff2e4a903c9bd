//! Spotify DTOs to catalog records

use super::dto;
use crate::catalog::{AlbumHit, Artwork, CatalogAlbum, CatalogTrack};

pub fn to_hits(response: dto::SearchResponse) -> Vec<AlbumHit> {
    response
        .albums
        .map(|paging| paging.items)
        .unwrap_or_default()
        .into_iter()
        .map(|album| AlbumHit {
            id: album.id,
            name: album.name,
        })
        .collect()
}

pub fn to_catalog_album(response: dto::AlbumResponse) -> CatalogAlbum {
    CatalogAlbum {
        id: response.id,
        name: response.name,
        artists: names(response.artists),
        artwork: response
            .images
            .into_iter()
            .map(|image| Artwork {
                url: image.url,
                width: image.width,
                height: image.height,
            })
            .collect(),
        tracks: response
            .tracks
            .items
            .into_iter()
            .map(|track| CatalogTrack {
                name: track.name,
                artists: names(track.artists),
            })
            .collect(),
    }
}

fn names(artists: Vec<dto::ArtistRef>) -> Vec<String> {
    artists.into_iter().map(|artist| artist.name).collect()
}
