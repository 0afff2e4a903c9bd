use super::{adapter, dto};
use crate::catalog::{ReleaseAlbum, ReleaseCatalog, ReleaseHit};
use crate::{CatalogError, USER_AGENT};
use async_trait::async_trait;
use tracing::debug;

const SERVICE: &str = "lastfm";

/// Last.fm error codes for a bad or suspended API key
const AUTH_ERRORS: [u32; 3] = [10, 14, 26];

/// Release search on MusicBrainz, album detail on Last.fm
pub struct LastFmClient {
    http_client: reqwest::Client,
    musicbrainz_url: String,
    lastfm_url: String,
    api_key: String,
}

impl LastFmClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, CatalogError> {
        Self::with_base_urls(
            api_key,
            "https://musicbrainz.org/ws/2",
            "https://ws.audioscrobbler.com/2.0/",
        )
    }

    /// Point the client at other endpoints, e.g. a local test server
    pub fn with_base_urls(
        api_key: impl Into<String>,
        musicbrainz_url: impl Into<String>,
        lastfm_url: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(CatalogError::network)?;

        Ok(Self {
            http_client,
            musicbrainz_url: musicbrainz_url.into(),
            lastfm_url: lastfm_url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl ReleaseCatalog for LastFmClient {
    fn name(&self) -> &'static str {
        "musicbrainz+lastfm"
    }

    async fn search_releases(&self, query: &str) -> Result<Vec<ReleaseHit>, CatalogError> {
        let url = format!("{}/release", self.musicbrainz_url);
        debug!(url, query, "musicbrainz release search");

        let response = self
            .http_client
            .get(&url)
            .query(&[("query", query), ("fmt", "json"), ("limit", "5")])
            .send()
            .await
            .map_err(CatalogError::network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                service: "musicbrainz",
                status: status.as_u16(),
            });
        }

        let body = response
            .json::<dto::ReleaseSearchResponse>()
            .await
            .map_err(|e| CatalogError::parse("musicbrainz", e))?;
        Ok(adapter::to_hits(body))
    }

    async fn album_for_release(
        &self,
        release_id: &str,
    ) -> Result<Option<ReleaseAlbum>, CatalogError> {
        debug!(release_id, "lastfm album.getinfo");

        let response = self
            .http_client
            .get(&self.lastfm_url)
            .query(&[
                ("method", "album.getinfo"),
                ("api_key", self.api_key.as_str()),
                ("format", "json"),
                ("mbid", release_id),
            ])
            .send()
            .await
            .map_err(CatalogError::network)?;

        let status = response.status();
        let body = response.text().await.map_err(CatalogError::network)?;

        let info: dto::AlbumInfoResponse = match serde_json::from_str(&body) {
            Ok(info) => info,
            Err(_) if !status.is_success() => {
                return Err(CatalogError::Status {
                    service: SERVICE,
                    status: status.as_u16(),
                })
            }
            Err(e) => return Err(CatalogError::parse(SERVICE, e)),
        };

        if let Some(code) = info.error {
            if AUTH_ERRORS.contains(&code) {
                return Err(CatalogError::Auth {
                    service: SERVICE,
                    reason: info.message.unwrap_or_else(|| format!("error {}", code)),
                });
            }
            debug!(code, message = ?info.message, "lastfm has no album for release");
        }

        let album = info.album.and_then(adapter::to_release_album);
        if album.is_none() {
            debug!(release_id, "lastfm album is missing its name or artist");
        }
        Ok(album)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn fake_services() -> Router {
        Router::new()
            .route(
                "/ws/2/release",
                get(|| async {
                    Json(json!({"count": 1, "releases": [{"id": "mbid-gsp", "title": "Glory Sound Prep", "score": 100}]}))
                }),
            )
            .route(
                "/2.0/",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    match (params.get("api_key").map(String::as_str), params.get("mbid").map(String::as_str)) {
                        (Some("bad"), _) => Json(json!({"error": 10, "message": "Invalid API key"})),
                        (_, Some("mbid-partial")) => Json(json!({"album": {
                            "name": "Glory Sound Prep",
                            "tracks": {"track": []}
                        }})),
                        (_, Some("mbid-gsp")) => Json(json!({"album": {
                            "name": "Glory Sound Prep",
                            "artist": "Jon Bellion",
                            "image": [
                                {"#text": "https://lastfm/s.png", "size": "small"},
                                {"#text": "https://lastfm/xl.png", "size": "extralarge"}
                            ],
                            "tracks": {"track": [
                                {"name": "Conversations with my Wife", "artist": {"name": "Jon Bellion"}},
                                {"name": "JT", "artist": {"name": "Jon Bellion"}}
                            ]}
                        }})),
                        _ => Json(json!({"error": 6, "message": "Album not found"})),
                    }
                }),
            )
    }

    fn client(base: &str, key: &str) -> LastFmClient {
        LastFmClient::with_base_urls(key, format!("{}/ws/2", base), format!("{}/2.0/", base))
            .unwrap()
    }

    #[tokio::test]
    async fn search_then_album_detail() {
        let base = serve(fake_services()).await;
        let client = client(&base, "key");

        let hits = client.search_releases("Glory Sound Prep").await.unwrap();
        assert_eq!(hits[0].id, "mbid-gsp");

        let album = client.album_for_release("mbid-gsp").await.unwrap().unwrap();
        assert_eq!(album.name, "Glory Sound Prep");
        assert_eq!(album.tracks.len(), 2);
        assert_eq!(album.cover_url.as_deref(), Some("https://lastfm/xl.png"));
    }

    #[tokio::test]
    async fn unknown_release_is_not_found() {
        let base = serve(fake_services()).await;

        assert_matches!(client(&base, "key").album_for_release("nope").await, Ok(None));
    }

    #[tokio::test]
    async fn album_missing_artist_is_not_found() {
        let base = serve(fake_services()).await;

        assert_matches!(
            client(&base, "key").album_for_release("mbid-partial").await,
            Ok(None)
        );
    }

    #[tokio::test]
    async fn invalid_key_is_auth_error() {
        let base = serve(fake_services()).await;

        assert_matches!(
            client(&base, "bad").album_for_release("mbid-gsp").await,
            Err(CatalogError::Auth { .. })
        );
    }
}
