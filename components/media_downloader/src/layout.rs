use crate::utils::sanitize_component;
use std::path::{Path, PathBuf};

/// On-disk layout under the app root:
///
/// ```text
/// <root>/downloads/<album label>/   cover art and audio while in flight
/// <root>/archives/<album label>.zip finished albums
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    downloads: PathBuf,
    archives: PathBuf,
}

impl StorageLayout {
    pub fn new(app_root: impl AsRef<Path>) -> Self {
        let root = app_root.as_ref();
        Self {
            downloads: root.join("downloads"),
            archives: root.join("archives"),
        }
    }

    pub fn downloads_dir(&self) -> &Path {
        &self.downloads
    }

    pub fn archives_dir(&self) -> &Path {
        &self.archives
    }

    /// Working directory for one album
    pub fn album_dir(&self, album_label: &str) -> PathBuf {
        self.downloads.join(sanitize_component(album_label))
    }

    pub fn archive_path(&self, album_label: &str) -> PathBuf {
        self.archives
            .join(format!("{}.zip", sanitize_component(album_label)))
    }

    /// Create both roots if they do not exist yet
    pub async fn ensure_roots(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.downloads).await?;
        tokio::fs::create_dir_all(&self.archives).await
    }
}
