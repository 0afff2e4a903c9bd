use crate::types::{AudioSearch, DownloadError, Downloader};
use crate::utils::{discard_outputs, sanitize_component};
use album_model::Track;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use url::Url;

/// Finds a source for a track and turns it into a 320 kbps mp3
pub struct AudioAcquirer {
    search: Arc<dyn AudioSearch>,
    downloader: Arc<dyn Downloader>,
}

impl AudioAcquirer {
    /// Fails when the downloader's external tools are missing
    pub async fn new(
        search: Arc<dyn AudioSearch>,
        downloader: Arc<dyn Downloader>,
    ) -> Result<Self, DownloadError> {
        downloader.check_available().await?;
        Ok(Self { search, downloader })
    }

    /// First search hit for the track, if any
    pub async fn resolve_source(&self, track: &Track) -> Result<Option<Url>, DownloadError> {
        let candidates = self.search.search(&track.search_term()).await?;
        Ok(candidates.into_iter().next())
    }

    /// Download a track into `album_dir` as `<display name>.mp3`.
    ///
    /// Records the source link and the resulting file on the track. `Ok(None)`
    /// means the search found nothing or the download was cancelled.
    /// Anything an earlier run left under the track's name is removed first.
    pub async fn acquire(
        &self,
        album_dir: &Path,
        track: &mut Track,
        cancel: &CancellationToken,
    ) -> Result<Option<PathBuf>, DownloadError> {
        let stem = sanitize_component(&track.to_string());
        discard_outputs(album_dir, &stem).await?;

        let Some(source) = self.resolve_source(track).await? else {
            warn!(track = %track, "no audio source found, skipping");
            return Ok(None);
        };
        track.download_link = Some(source.to_string());

        let path = self
            .downloader
            .download_audio(&source, album_dir, &stem, cancel)
            .await?;

        if let Some(path) = &path {
            info!(track = %track, path = %path.display(), "audio acquired");
        }
        track.file_path = path.clone();
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ytdlp::stub::DownloaderStub;
    use album_model::{Album, NewTrack};
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct SearchStub(Vec<&'static str>);

    #[async_trait]
    impl AudioSearch for SearchStub {
        async fn search(&self, _term: &str) -> Result<Vec<Url>, DownloadError> {
            Ok(self.0.iter().map(|u| Url::parse(u).unwrap()).collect())
        }
    }

    struct MissingTool;

    #[async_trait]
    impl Downloader for MissingTool {
        async fn check_available(&self) -> Result<(), DownloadError> {
            Err(DownloadError::DependencyNotFound("yt-dlp"))
        }

        async fn download_audio(
            &self,
            _url: &Url,
            _output_dir: &Path,
            _file_stem: &str,
            _cancel: &CancellationToken,
        ) -> Result<Option<PathBuf>, DownloadError> {
            unreachable!("never constructed")
        }
    }

    fn album() -> Album {
        let mut album = Album::new("Glory Sound Prep", ["Jon Bellion"]).unwrap();
        album.push(NewTrack::new("JT", ["Jon Bellion"]).unwrap());
        album
    }

    #[tokio::test]
    async fn first_hit_is_downloaded_under_display_name() {
        let dir = TempDir::new().unwrap();
        let acquirer = AudioAcquirer::new(
            Arc::new(SearchStub(vec![
                "https://youtube.com/watch?v=first",
                "https://youtube.com/watch?v=second",
            ])),
            Arc::new(DownloaderStub),
        )
        .await
        .unwrap();
        let mut album = album();
        let track = album.track_mut(0).unwrap();

        let path = acquirer
            .acquire(dir.path(), track, &CancellationToken::new())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(path, dir.path().join("1 - JT - Jon Bellion.mp3"));
        assert_eq!(track.file_path.as_deref(), Some(path.as_path()));
        assert_eq!(
            track.download_link.as_deref(),
            Some("https://youtube.com/watch?v=first")
        );
    }

    #[tokio::test]
    async fn no_search_results_skips_track() {
        let dir = TempDir::new().unwrap();
        let acquirer = AudioAcquirer::new(Arc::new(SearchStub(vec![])), Arc::new(DownloaderStub))
            .await
            .unwrap();
        let mut album = album();
        let track = album.track_mut(0).unwrap();

        let result = acquirer
            .acquire(dir.path(), track, &CancellationToken::new())
            .await;

        assert_matches!(result, Ok(None));
        assert!(track.file_path.is_none());
        assert!(track.download_link.is_none());
    }

    #[tokio::test]
    async fn leftover_output_is_removed_before_acquiring() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("1 - JT - Jon Bellion.mp3"), b"stale").unwrap();
        std::fs::write(dir.path().join("1 - JT - Jon Bellion.webm.part"), b"stale").unwrap();
        std::fs::write(dir.path().join("cover.jpg"), b"jpeg").unwrap();
        let acquirer = AudioAcquirer::new(Arc::new(SearchStub(vec![])), Arc::new(DownloaderStub))
            .await
            .unwrap();
        let mut album = album();

        let result = acquirer
            .acquire(dir.path(), album.track_mut(0).unwrap(), &CancellationToken::new())
            .await;

        assert_matches!(result, Ok(None));
        assert!(!dir.path().join("1 - JT - Jon Bellion.mp3").exists());
        assert!(!dir.path().join("1 - JT - Jon Bellion.webm.part").exists());
        assert!(dir.path().join("cover.jpg").exists());
    }

    #[tokio::test]
    async fn missing_downloader_fails_construction() {
        let result = AudioAcquirer::new(Arc::new(SearchStub(vec![])), Arc::new(MissingTool)).await;

        assert_matches!(result.err(), Some(DownloadError::DependencyNotFound("yt-dlp")));
    }
}
