// components/media_downloader/src/ytdlp.rs
use crate::types::{DownloadError, Downloader, AUDIO_EXTENSION};
use crate::utils::discard_outputs;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

/// Constant bitrate every track is transcoded to
pub const AUDIO_QUALITY: &str = "320K";

pub struct YtDlp;

impl YtDlp {
    fn command(url: &Url, output_dir: &Path, file_stem: &str) -> Result<Command, DownloadError> {
        let template = output_dir.join(format!("{}.%(ext)s", file_stem));
        let template = template.to_str().ok_or_else(|| {
            DownloadError::DownloadFailed("Invalid output path".to_string())
        })?;

        let mut command = Command::new("yt-dlp");
        command
            .arg("-x")
            .arg("--audio-format").arg(AUDIO_EXTENSION)
            .arg("--audio-quality").arg(AUDIO_QUALITY)
            .arg("--format").arg("bestaudio")
            .arg("--no-playlist")
            .arg("--quiet")
            .arg("-o").arg(template)
            .arg(url.as_str())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        Ok(command)
    }
}

#[async_trait]
impl Downloader for YtDlp {
    async fn check_available(&self) -> Result<(), DownloadError> {
        which::which("yt-dlp")
            .map(|_| ())
            .map_err(|_| DownloadError::DependencyNotFound("yt-dlp"))
    }

    async fn download_audio(
        &self,
        url: &Url,
        output_dir: &Path,
        file_stem: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<PathBuf>, DownloadError> {
        tokio::fs::create_dir_all(output_dir).await?;
        let mut command = Self::command(url, output_dir, file_stem)?;
        debug!(url = %url, dir = %output_dir.display(), file_stem, "running yt-dlp");

        // Dropping the output future kills the child
        let output = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            output = command.output() => Some(output?),
        };

        let Some(output) = output else {
            warn!(url = %url, "download stopped, removing partial output");
            discard_outputs(output_dir, file_stem).await?;
            return Ok(None);
        };

        if !output.status.success() {
            discard_outputs(output_dir, file_stem).await?;
            return Err(DownloadError::DownloadFailed(format!(
                "yt-dlp exited with status {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let path = output_dir.join(format!("{}.{}", file_stem, AUDIO_EXTENSION));
        if !tokio::fs::try_exists(&path).await? {
            return Err(DownloadError::FormatError(format!(
                "yt-dlp did not produce {}",
                path.display()
            )));
        }
        Ok(Some(path))
    }
}

#[cfg(test)]
pub mod stub {
    use super::*;

    /// Writes a placeholder file instead of running yt-dlp
    pub struct DownloaderStub;

    #[async_trait]
    impl Downloader for DownloaderStub {
        async fn check_available(&self) -> Result<(), DownloadError> {
            Ok(())
        }

        async fn download_audio(
            &self,
            _url: &Url,
            output_dir: &Path,
            file_stem: &str,
            _cancel: &CancellationToken,
        ) -> Result<Option<PathBuf>, DownloadError> {
            tokio::fs::create_dir_all(output_dir).await?;
            let path = output_dir.join(format!("{}.{}", file_stem, AUDIO_EXTENSION));
            tokio::fs::write(&path, b"audio").await?;
            Ok(Some(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_requests_320k_mp3() {
        let url = Url::parse("https://youtube.com/watch?v=abc").unwrap();
        let command = YtDlp::command(&url, Path::new("/tmp/album"), "1 - JT - Jon Bellion").unwrap();

        let args: Vec<String> = command
            .as_std()
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        assert_eq!(command.as_std().get_program(), "yt-dlp");
        assert!(args.windows(2).any(|w| w == ["--audio-format", "mp3"]));
        assert!(args.windows(2).any(|w| w == ["--audio-quality", "320K"]));
        assert!(args.windows(2).any(|w| w == ["--format", "bestaudio"]));
        assert!(args
            .windows(2)
            .any(|w| w == ["-o", "/tmp/album/1 - JT - Jon Bellion.%(ext)s"]));
        assert_eq!(args.last().map(String::as_str), Some("https://youtube.com/watch?v=abc"));
    }
}
