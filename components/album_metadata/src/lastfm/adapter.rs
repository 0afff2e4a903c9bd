//! MusicBrainz / Last.fm DTOs to catalog records

use super::dto;
use crate::catalog::{ReleaseAlbum, ReleaseHit, ReleaseTrack};

pub fn to_hits(response: dto::ReleaseSearchResponse) -> Vec<ReleaseHit> {
    response
        .releases
        .into_iter()
        .map(|release| ReleaseHit {
            id: release.id,
            title: release.title,
        })
        .collect()
}

/// `None` when the album lacks its name or artist
pub fn to_release_album(album: dto::AlbumInfo) -> Option<ReleaseAlbum> {
    let (Some(name), Some(artist)) = (album.name, album.artist) else {
        return None;
    };
    let cover_url = largest_image(&album.image);
    let tracks = album
        .tracks
        .map(|tracks| tracks.track.into_vec())
        .unwrap_or_default()
        .into_iter()
        .map(|track| ReleaseTrack {
            name: track.name,
            artist: track.artist.name,
        })
        .collect();

    Some(ReleaseAlbum {
        name,
        artist,
        cover_url,
        tracks,
    })
}

/// Last.fm only labels its images, smallest to largest
fn size_rank(size: &str) -> u8 {
    match size {
        "small" => 1,
        "medium" => 2,
        "large" => 3,
        "extralarge" => 4,
        "mega" => 5,
        _ => 0,
    }
}

fn largest_image(images: &[dto::Image]) -> Option<String> {
    images
        .iter()
        .filter(|image| !image.url.is_empty())
        .max_by_key(|image| size_rank(&image.size))
        .map(|image| image.url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str, size: &str) -> dto::Image {
        dto::Image {
            url: url.to_string(),
            size: size.to_string(),
        }
    }

    #[test]
    fn largest_non_empty_image_wins() {
        let images = vec![
            image("https://s", "small"),
            image("https://xl", "extralarge"),
            image("", "mega"),
            image("https://m", "medium"),
        ];

        assert_eq!(largest_image(&images).as_deref(), Some("https://xl"));
    }

    #[test]
    fn album_without_artist_is_dropped() {
        let album = dto::AlbumInfo {
            name: Some("Glory Sound Prep".to_string()),
            artist: None,
            image: vec![image("https://xl", "extralarge")],
            tracks: None,
        };

        assert_eq!(to_release_album(album), None);
    }

    #[test]
    fn no_images_means_no_cover() {
        assert_eq!(largest_image(&[image("", "large")]), None);
    }
}
