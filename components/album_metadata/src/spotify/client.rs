use super::{adapter, dto};
use crate::catalog::{AlbumCatalog, AlbumHit, CatalogAlbum};
use crate::{CatalogError, USER_AGENT};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

const SERVICE: &str = "spotify";

/// Refresh the token this long before Spotify says it expires
const TOKEN_SLACK: Duration = Duration::from_secs(30);

struct AccessToken {
    value: String,
    expires_at: Instant,
}

/// Spotify Web API client
pub struct SpotifyClient {
    http_client: reqwest::Client,
    api_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<AccessToken>>,
}

impl SpotifyClient {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        Self::with_base_urls(
            client_id,
            client_secret,
            "https://api.spotify.com/v1",
            "https://accounts.spotify.com/api/token",
        )
    }

    /// Point the client at other endpoints, e.g. a local test server
    pub fn with_base_urls(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        api_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(CatalogError::network)?;

        Ok(Self {
            http_client,
            api_url: api_url.into(),
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token: Mutex::new(None),
        })
    }

    /// Current bearer token, requesting a new one when needed
    async fn bearer(&self) -> Result<String, CatalogError> {
        let mut token = self.token.lock().await;
        if let Some(current) = token.as_ref() {
            if Instant::now() < current.expires_at {
                return Ok(current.value.clone());
            }
        }

        debug!("requesting spotify access token");
        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(CatalogError::network)?;

        let status = response.status();
        if !status.is_success() {
            let reason = match response.json::<dto::ErrorResponse>().await {
                Ok(error) => error.error_description.unwrap_or(error.error),
                Err(_) => format!("HTTP {}", status),
            };
            return Err(CatalogError::Auth {
                service: SERVICE,
                reason,
            });
        }

        let issued = response
            .json::<dto::TokenResponse>()
            .await
            .map_err(|e| CatalogError::parse(SERVICE, e))?;

        let lifetime = Duration::from_secs(issued.expires_in).saturating_sub(TOKEN_SLACK);
        *token = Some(AccessToken {
            value: issued.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        Ok(issued.access_token)
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let bearer = self.bearer().await?;
        debug!(url, "spotify request");

        let response = self
            .http_client
            .get(url)
            .bearer_auth(bearer)
            .query(query)
            .send()
            .await
            .map_err(CatalogError::network)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            *self.token.lock().await = None;
            return Err(CatalogError::Auth {
                service: SERVICE,
                reason: "access token rejected".to_string(),
            });
        }
        if !status.is_success() {
            return Err(CatalogError::Status {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::parse(SERVICE, e))
    }
}

#[async_trait]
impl AlbumCatalog for SpotifyClient {
    fn name(&self) -> &'static str {
        SERVICE
    }

    async fn search_albums(&self, query: &str) -> Result<Vec<AlbumHit>, CatalogError> {
        let url = format!("{}/search", self.api_url);
        let q = format!("album: {}", query);
        let response: dto::SearchResponse = self
            .get(&url, &[("q", q.as_str()), ("type", "album")])
            .await?;
        Ok(adapter::to_hits(response))
    }

    async fn album(&self, id: &str) -> Result<CatalogAlbum, CatalogError> {
        let url = format!("{}/albums/{}", self.api_url, id);
        let response: dto::AlbumResponse = self.get(&url, &[]).await?;
        Ok(adapter::to_catalog_album(response))
    }
}
