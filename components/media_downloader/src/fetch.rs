use crate::layout::StorageLayout;
use crate::types::FetchError;
use crate::utils::{discard_partial, extension_for_content_type, sanitize_component, stem_from_url};
use crate::USER_AGENT;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

/// Used when the server sends no content type we recognise
const FALLBACK_EXTENSION: &str = "bin";

enum Transfer {
    Complete,
    Cancelled,
    Interrupted(String),
    WriteFailed(std::io::Error),
}

/// Streams a URL into a file under an album's download directory
pub struct MediaFetcher {
    http_client: reqwest::Client,
    layout: StorageLayout,
    show_progress: bool,
}

impl MediaFetcher {
    pub fn new(layout: StorageLayout) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            layout,
            show_progress: false,
        })
    }

    /// Draw a progress bar on stderr while transferring
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }

    /// Download `url` to `<downloads>/<album_label>/<stem>.<ext>`.
    ///
    /// The extension comes from the response's content type. Without a
    /// `file_stem` the last URL segment names the file.
    ///
    /// Returns `Ok(None)` when the transfer was cancelled or broke off
    /// mid-body. The partial file is gone by then, and so is the album
    /// directory if nothing else was in it.
    pub async fn fetch(
        &self,
        url: &str,
        album_label: &str,
        file_stem: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Option<PathBuf>, FetchError> {
        let url = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;

        debug!(url = %url, "requesting");
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(None),
            response = self.http_client.get(url.clone()).send() => response,
        };
        let response = response.map_err(|e| FetchError::SourceNotFound {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let extension = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(extension_for_content_type)
            .unwrap_or(FALLBACK_EXTENSION);
        let stem = match file_stem {
            Some(stem) => sanitize_component(stem),
            None => stem_from_url(&url),
        };

        let album_dir = self.layout.album_dir(album_label);
        tokio::fs::create_dir_all(&album_dir)
            .await
            .map_err(|e| FetchError::io(&album_dir, e))?;
        let path = album_dir.join(format!("{}.{}", stem, extension));

        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(|e| FetchError::io(&path, e))?;

        let progress = progress_bar(response.content_length(), self.show_progress);
        progress.set_message(stem.clone());

        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;
        let transfer = loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                next = stream.next() => Some(next),
            };
            let Some(next) = next else {
                break Transfer::Cancelled;
            };

            match next {
                Some(Ok(chunk)) => {
                    if let Err(e) = file.write_all(&chunk).await {
                        break Transfer::WriteFailed(e);
                    }
                    written += chunk.len() as u64;
                    progress.set_position(written);
                }
                Some(Err(e)) => break Transfer::Interrupted(e.to_string()),
                None => break Transfer::Complete,
            }
        };

        let transfer = match transfer {
            Transfer::Complete => match file.flush().await {
                Ok(()) => Transfer::Complete,
                Err(e) => Transfer::WriteFailed(e),
            },
            other => other,
        };
        drop(file);
        match transfer {
            Transfer::Complete => progress.finish(),
            _ => progress.finish_and_clear(),
        }

        match transfer {
            Transfer::Complete => {
                info!(path = %path.display(), bytes = written, "file downloaded");
                Ok(Some(path))
            }
            Transfer::Cancelled => {
                warn!(url = %url, bytes = written, "download stopped, removing file");
                discard_partial(&path, &album_dir)
                    .await
                    .map_err(|e| FetchError::io(&path, e))?;
                Ok(None)
            }
            Transfer::Interrupted(reason) => {
                warn!(url = %url, bytes = written, reason = %reason, "transfer interrupted, removing file");
                discard_partial(&path, &album_dir)
                    .await
                    .map_err(|e| FetchError::io(&path, e))?;
                Ok(None)
            }
            Transfer::WriteFailed(e) => {
                if let Err(cleanup) = discard_partial(&path, &album_dir).await {
                    warn!(path = %path.display(), error = %cleanup, "could not remove partial file");
                }
                Err(FetchError::io(&path, e))
            }
        }
    }
}

/// Byte bar when the size is known, spinner otherwise. Hidden unless
/// `visible`; indicatif also stays silent when stderr is not a terminal.
fn progress_bar(total: Option<u64>, visible: bool) -> ProgressBar {
    let (progress, template) = match total {
        Some(len) => (
            ProgressBar::new(len),
            "{msg} [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
        ),
        None => (ProgressBar::new_spinner(), "{spinner} {msg} {bytes} ({bytes_per_sec})"),
    };
    if !visible {
        progress.set_draw_target(ProgressDrawTarget::hidden());
    } else if let Ok(style) = ProgressStyle::with_template(template) {
        progress.set_style(style.progress_chars("=> "));
    }
    progress
}
