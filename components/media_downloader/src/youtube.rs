//! YouTube Data API search
//!
//! Finds watch pages for a track. Requires an API key with the YouTube
//! Data API v3 enabled.
//!
//! API docs: https://developers.google.com/youtube/v3/docs/search/list

use crate::types::{AudioSearch, DownloadError};
use crate::USER_AGENT;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Results requested per search
const MAX_RESULTS: &str = "3";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

pub struct YouTubeSearch {
    http_client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl YouTubeSearch {
    pub fn new(api_key: impl Into<String>) -> Result<Self, DownloadError> {
        Self::with_base_url(api_key, "https://www.googleapis.com/youtube/v3")
    }

    /// Point the client at another endpoint, e.g. a local test server
    pub fn with_base_url(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Result<Self, DownloadError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DownloadError::SearchFailed(e.to_string()))?;

        Ok(Self {
            http_client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }
}

fn watch_url(video_id: &str) -> Result<Url, DownloadError> {
    let mut url = Url::parse("https://youtube.com/watch")
        .map_err(|e| DownloadError::InvalidUrl(e.to_string()))?;
    url.query_pairs_mut().append_pair("v", video_id);
    Ok(url)
}

#[async_trait]
impl AudioSearch for YouTubeSearch {
    async fn search(&self, term: &str) -> Result<Vec<Url>, DownloadError> {
        let q = format!("{} audio", term);
        debug!(query = %q, "youtube search");

        let response = self
            .http_client
            .get(format!("{}/search", self.api_url))
            .query(&[
                ("q", q.as_str()),
                ("part", "snippet"),
                ("maxResults", MAX_RESULTS),
                ("type", "video"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DownloadError::SearchFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::SearchFailed(format!(
                "youtube returned HTTP {}",
                status
            )));
        }

        let body = response
            .json::<SearchResponse>()
            .await
            .map_err(|e| DownloadError::SearchFailed(e.to_string()))?;

        body.items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .map(|id| watch_url(&id))
            .collect()
    }
}
