// components/media_downloader/src/types.rs
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Container every acquired track ends up in
pub const AUDIO_EXTENSION: &str = "mp3";

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Required dependency not found: {0}")]
    DependencyNotFound(&'static str),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Audio search failed: {0}")]
    SearchFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Format conversion failed: {0}")]
    FormatError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Source not found: {url} ({reason})")]
    SourceNotFound { url: String, reason: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("IO error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl FetchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum TagError {
    #[error("track {track} has no {what} to tag")]
    MissingInput { track: String, what: &'static str },

    #[error("failed to read cover art {path}")]
    Cover {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to tag {path}")]
    Lofty {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("{0} has no writable tag")]
    NoWritableTag(PathBuf),
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("album {0} has no working directory")]
    NoDirectory(String),

    #[error("no .{extension} files in {dir}")]
    NothingToArchive { dir: PathBuf, extension: &'static str },

    #[error("io error during {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl ArchiveError {
    pub(crate) fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        ArchiveError::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Finds candidate stream pages for a track
#[async_trait::async_trait]
pub trait AudioSearch: Send + Sync {
    /// Candidates, best match first
    async fn search(&self, term: &str) -> Result<Vec<Url>, DownloadError>;
}

/// Pulls audio off a stream page and transcodes it
#[async_trait::async_trait]
pub trait Downloader: Send + Sync {
    /// Check if the downloader is available and has all required dependencies
    async fn check_available(&self) -> Result<(), DownloadError>;

    /// Extract the best audio stream of `url` into
    /// `<output_dir>/<file_stem>.mp3` at 320 kbps.
    ///
    /// Returns `Ok(None)` when cancelled; partial output is removed first.
    async fn download_audio(
        &self,
        url: &Url,
        output_dir: &Path,
        file_stem: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<PathBuf>, DownloadError>;
}
