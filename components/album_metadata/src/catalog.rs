//! Catalog seams and the records they hand to the resolver.
//!
//! Service DTOs never leave their own module; clients convert them into
//! these types first.

use crate::CatalogError;
use async_trait::async_trait;

/// One album search result from the primary catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumHit {
    pub id: String,
    pub name: String,
}

/// Cover image offered by a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Artwork {
    pub fn area(&self) -> u64 {
        u64::from(self.width.unwrap_or(0)) * u64::from(self.height.unwrap_or(0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTrack {
    pub name: String,
    /// Primary artist first, followed by everyone else credited
    pub artists: Vec<String>,
}

/// Full album detail from the primary catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogAlbum {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub artwork: Vec<Artwork>,
    pub tracks: Vec<CatalogTrack>,
}

impl CatalogAlbum {
    /// Highest resolution artwork, first one wins on ties
    pub fn best_artwork(&self) -> Option<&Artwork> {
        self.artwork
            .iter()
            .rev()
            .max_by_key(|artwork| artwork.area())
    }
}

/// One release search result from the fallback catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseHit {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTrack {
    pub name: String,
    pub artist: String,
}

/// Album detail from the fallback catalog, keyed by release id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAlbum {
    pub name: String,
    pub artist: String,
    pub cover_url: Option<String>,
    pub tracks: Vec<ReleaseTrack>,
}

/// Primary catalog: album search plus album detail by id
#[async_trait]
pub trait AlbumCatalog: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search_albums(&self, query: &str) -> Result<Vec<AlbumHit>, CatalogError>;

    async fn album(&self, id: &str) -> Result<CatalogAlbum, CatalogError>;
}

/// Fallback catalog: release search plus album detail by release id
#[async_trait]
pub trait ReleaseCatalog: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search_releases(&self, query: &str) -> Result<Vec<ReleaseHit>, CatalogError>;

    /// `None` when the detail service has no usable album for the release
    async fn album_for_release(
        &self,
        release_id: &str,
    ) -> Result<Option<ReleaseAlbum>, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artwork(url: &str, size: u32) -> Artwork {
        Artwork {
            url: url.to_string(),
            width: Some(size),
            height: Some(size),
        }
    }

    #[test]
    fn best_artwork_is_largest() {
        let album = CatalogAlbum {
            id: "x".to_string(),
            name: "X".to_string(),
            artists: vec!["A".to_string()],
            artwork: vec![artwork("mid", 300), artwork("big", 640), artwork("small", 64)],
            tracks: Vec::new(),
        };

        assert_eq!(album.best_artwork().map(|a| a.url.as_str()), Some("big"));
    }

    #[test]
    fn best_artwork_prefers_first_on_tie() {
        let album = CatalogAlbum {
            id: "x".to_string(),
            name: "X".to_string(),
            artists: vec!["A".to_string()],
            artwork: vec![
                Artwork {
                    url: "first".to_string(),
                    width: None,
                    height: None,
                },
                Artwork {
                    url: "second".to_string(),
                    width: None,
                    height: None,
                },
            ],
            tracks: Vec::new(),
        };

        assert_eq!(album.best_artwork().map(|a| a.url.as_str()), Some("first"));
    }
}
