use crate::catalog::{AlbumCatalog, CatalogAlbum, ReleaseAlbum, ReleaseCatalog};
use crate::error::ResolveError;
use album_model::{Album, NewTrack};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Primary-then-fallback album lookup
pub struct MetadataResolver {
    primary: Arc<dyn AlbumCatalog>,
    fallback: Arc<dyn ReleaseCatalog>,
}

impl MetadataResolver {
    pub fn new(primary: Arc<dyn AlbumCatalog>, fallback: Arc<dyn ReleaseCatalog>) -> Self {
        Self { primary, fallback }
    }

    /// Resolve a query into an album with its tracklist in catalog order.
    ///
    /// `Ok(None)` means neither catalog knew the query. A transport or
    /// parse failure from the primary catalog is returned as is; the
    /// fallback is only for "no match".
    pub async fn resolve(&self, query: &str) -> Result<Option<Album>, ResolveError> {
        if let Some(album) = self.resolve_primary(query).await? {
            return Ok(Some(album));
        }

        warn!(query, catalog = self.primary.name(), "no match, trying fallback");
        self.resolve_fallback(query).await
    }

    async fn resolve_primary(&self, query: &str) -> Result<Option<Album>, ResolveError> {
        let catalog = self.primary.name();
        info!(query, catalog, "searching albums");

        let hits = self
            .primary
            .search_albums(query)
            .await
            .map_err(|source| ResolveError::Catalog { catalog, source })?;

        let Some(hit) = hits.into_iter().next() else {
            return Ok(None);
        };
        debug!(id = %hit.id, name = %hit.name, "using first album hit");

        let detail = self
            .primary
            .album(&hit.id)
            .await
            .map_err(|source| ResolveError::Catalog { catalog, source })?;

        let album = album_from_catalog(detail)
            .map_err(|source| ResolveError::InvalidRecord { catalog, source })?;
        info!(album = %album.label(), tracks = album.len(), catalog, "album resolved");
        Ok(Some(album))
    }

    async fn resolve_fallback(&self, query: &str) -> Result<Option<Album>, ResolveError> {
        let catalog = self.fallback.name();
        info!(query, catalog, "searching releases");

        let hits = self
            .fallback
            .search_releases(query)
            .await
            .map_err(|source| ResolveError::Catalog { catalog, source })?;

        let Some(hit) = hits.into_iter().next() else {
            warn!(query, catalog, "no release matches");
            return Ok(None);
        };
        debug!(id = %hit.id, title = %hit.title, "using first release hit");

        let Some(detail) = self
            .fallback
            .album_for_release(&hit.id)
            .await
            .map_err(|source| ResolveError::Catalog { catalog, source })?
        else {
            warn!(release = %hit.id, catalog, "release has no album detail");
            return Ok(None);
        };

        let album = album_from_release(detail)
            .map_err(|source| ResolveError::InvalidRecord { catalog, source })?;
        info!(album = %album.label(), tracks = album.len(), catalog, "album resolved");
        Ok(Some(album))
    }
}

fn album_from_catalog(detail: CatalogAlbum) -> Result<Album, album_model::AlbumError> {
    let cover_art_link = detail.best_artwork().map(|artwork| artwork.url.clone());

    let mut album = Album::new(detail.name, detail.artists)?;
    album.cover_art_link = cover_art_link;

    for track in detail.tracks {
        let artists = match track.artists.first() {
            Some(primary) => vec![primary.clone()],
            None => album.artists().to_vec(),
        };
        album.push(NewTrack::new(track.name, artists)?.with_features(track.artists));
    }

    Ok(album)
}

fn album_from_release(detail: ReleaseAlbum) -> Result<Album, album_model::AlbumError> {
    let mut album = Album::new(detail.name, [detail.artist])?;
    album.cover_art_link = detail.cover_url;

    for track in detail.tracks {
        album.push(NewTrack::new(track.name, [track.artist])?);
    }

    Ok(album)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AlbumHit, Artwork, CatalogTrack, ReleaseHit, ReleaseTrack};
    use crate::CatalogError;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct PrimaryStub {
        album: Option<CatalogAlbum>,
        fail: bool,
    }

    #[async_trait]
    impl AlbumCatalog for PrimaryStub {
        fn name(&self) -> &'static str {
            "primary"
        }

        async fn search_albums(&self, _query: &str) -> Result<Vec<AlbumHit>, CatalogError> {
            if self.fail {
                return Err(CatalogError::Network("connection refused".to_string()));
            }
            Ok(self
                .album
                .iter()
                .map(|album| AlbumHit {
                    id: album.id.clone(),
                    name: album.name.clone(),
                })
                .collect())
        }

        async fn album(&self, id: &str) -> Result<CatalogAlbum, CatalogError> {
            self.album
                .clone()
                .filter(|album| album.id == id)
                .ok_or(CatalogError::Status {
                    service: "primary",
                    status: 404,
                })
        }
    }

    #[derive(Default)]
    struct FallbackStub {
        album: Option<ReleaseAlbum>,
        no_releases: bool,
        fail: bool,
        searches: AtomicUsize,
    }

    #[async_trait]
    impl ReleaseCatalog for FallbackStub {
        fn name(&self) -> &'static str {
            "fallback"
        }

        async fn search_releases(&self, _query: &str) -> Result<Vec<ReleaseHit>, CatalogError> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CatalogError::Network("connection reset".to_string()));
            }
            if self.no_releases {
                return Ok(Vec::new());
            }
            Ok(vec![ReleaseHit {
                id: "mbid-1".to_string(),
                title: "Whatever".to_string(),
            }])
        }

        async fn album_for_release(
            &self,
            _release_id: &str,
        ) -> Result<Option<ReleaseAlbum>, CatalogError> {
            Ok(self.album.clone())
        }
    }

    fn glory_sound_prep() -> CatalogAlbum {
        let titles = [
            "Conversations with my Wife",
            "JT",
            "Stupid Deep",
            "Let Me Down Easy",
            "Blu",
            "Adult Swim",
            "Mah's Joint",
            "Cautionary Tales",
            "Couples Retreat",
            "Tell Me How",
        ];
        CatalogAlbum {
            id: "gsp".to_string(),
            name: "Glory Sound Prep".to_string(),
            artists: vec!["Jon Bellion".to_string()],
            artwork: vec![
                Artwork {
                    url: "https://img/640".to_string(),
                    width: Some(640),
                    height: Some(640),
                },
                Artwork {
                    url: "https://img/64".to_string(),
                    width: Some(64),
                    height: Some(64),
                },
            ],
            tracks: titles
                .iter()
                .map(|title| CatalogTrack {
                    name: title.to_string(),
                    artists: vec!["Jon Bellion".to_string()],
                })
                .collect(),
        }
    }

    fn resolver(primary: PrimaryStub, fallback: Arc<FallbackStub>) -> MetadataResolver {
        MetadataResolver::new(Arc::new(primary), fallback)
    }

    #[tokio::test]
    async fn primary_hit_keeps_catalog_order() {
        let fallback = Arc::new(FallbackStub::default());
        let resolver = resolver(
            PrimaryStub {
                album: Some(glory_sound_prep()),
                fail: false,
            },
            fallback.clone(),
        );

        let album = resolver.resolve("Glory Sound Prep").await.unwrap().unwrap();

        assert_eq!(album.len(), 10);
        assert_eq!(album.track(0).unwrap().id().value(), 1);
        assert_eq!(album.track(0).unwrap().title(), "Conversations with my Wife");
        assert_eq!(album.track(9).unwrap().title(), "Tell Me How");
        assert_eq!(album.cover_art_link.as_deref(), Some("https://img/640"));
        assert_eq!(fallback.searches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn primary_track_credits_become_features() {
        let mut detail = glory_sound_prep();
        detail.tracks = vec![CatalogTrack {
            name: "Stupid Deep".to_string(),
            artists: vec!["Jon Bellion".to_string(), "Blake Mills".to_string()],
        }];
        let resolver = resolver(
            PrimaryStub {
                album: Some(detail),
                fail: false,
            },
            Arc::new(FallbackStub::default()),
        );

        let album = resolver.resolve("q").await.unwrap().unwrap();
        let track = album.track(0).unwrap();

        assert_eq!(track.artists(), ["Jon Bellion".to_string()]);
        assert_eq!(track.title_label(), "Stupid Deep ft. Blake Mills");
    }

    #[tokio::test]
    async fn falls_back_when_primary_has_no_match() {
        let fallback = Arc::new(FallbackStub {
            album: Some(ReleaseAlbum {
                name: "Glory Sound Prep".to_string(),
                artist: "Jon Bellion".to_string(),
                cover_url: Some("https://lastfm/cover.png".to_string()),
                tracks: vec![
                    ReleaseTrack {
                        name: "Conversations with my Wife".to_string(),
                        artist: "Jon Bellion".to_string(),
                    },
                    ReleaseTrack {
                        name: "JT".to_string(),
                        artist: "Jon Bellion".to_string(),
                    },
                ],
            }),
            ..Default::default()
        });
        let resolver = resolver(
            PrimaryStub {
                album: None,
                fail: false,
            },
            fallback.clone(),
        );

        let album = resolver.resolve("Glory Sound Prep").await.unwrap().unwrap();

        assert_eq!(fallback.searches.load(Ordering::SeqCst), 1);
        assert_eq!(album.label(), "Glory Sound Prep - Jon Bellion");
        assert_eq!(album.track(1).unwrap().id().value(), 2);
        assert_eq!(album.cover_art_link.as_deref(), Some("https://lastfm/cover.png"));
    }

    #[tokio::test]
    async fn release_without_detail_is_not_found() {
        let fallback = Arc::new(FallbackStub::default());
        let resolver = resolver(
            PrimaryStub {
                album: None,
                fail: false,
            },
            fallback.clone(),
        );

        assert_matches!(resolver.resolve("nothing at all").await, Ok(None));
        assert_eq!(fallback.searches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fallback_without_releases_is_not_found() {
        let fallback = Arc::new(FallbackStub {
            album: Some(ReleaseAlbum {
                name: "Unreachable".to_string(),
                artist: "Nobody".to_string(),
                cover_url: None,
                tracks: Vec::new(),
            }),
            no_releases: true,
            ..Default::default()
        });
        let resolver = resolver(
            PrimaryStub {
                album: None,
                fail: false,
            },
            fallback.clone(),
        );

        assert_matches!(resolver.resolve("nothing at all").await, Ok(None));
        assert_eq!(fallback.searches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fallback_transport_failure_is_not_masked() {
        let fallback = Arc::new(FallbackStub {
            fail: true,
            ..Default::default()
        });
        let resolver = resolver(
            PrimaryStub {
                album: None,
                fail: false,
            },
            fallback,
        );

        assert_matches!(
            resolver.resolve("Glory Sound Prep").await,
            Err(ResolveError::Catalog {
                catalog: "fallback",
                source: CatalogError::Network(_)
            })
        );
    }

    #[tokio::test]
    async fn primary_transport_failure_is_not_masked() {
        let fallback = Arc::new(FallbackStub::default());
        let resolver = resolver(
            PrimaryStub {
                album: None,
                fail: true,
            },
            fallback.clone(),
        );

        let result = resolver.resolve("Glory Sound Prep").await;

        assert_matches!(
            result,
            Err(ResolveError::Catalog {
                catalog: "primary",
                source: CatalogError::Network(_)
            })
        );
        assert_eq!(fallback.searches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn primary_album_without_artist_is_invalid() {
        let mut detail = glory_sound_prep();
        detail.artists.clear();
        let resolver = resolver(
            PrimaryStub {
                album: Some(detail),
                fail: false,
            },
            Arc::new(FallbackStub::default()),
        );

        assert_matches!(
            resolver.resolve("q").await,
            Err(ResolveError::InvalidRecord { .. })
        );
    }
}
