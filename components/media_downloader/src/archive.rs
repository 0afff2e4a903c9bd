use crate::layout::StorageLayout;
use crate::types::{ArchiveError, AUDIO_EXTENSION};
use album_model::Album;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Packs an album's finished audio into `<archives>/<album label>.zip`
#[derive(Debug, Clone)]
pub struct Archiver {
    layout: StorageLayout,
}

impl Archiver {
    pub fn new(layout: StorageLayout) -> Self {
        Self { layout }
    }

    /// Archive every finished track of `album`, then delete the loose files.
    ///
    /// Nothing is deleted unless the archive was written completely.
    pub fn archive(&self, album: &Album) -> Result<PathBuf, ArchiveError> {
        let label = album.label();
        let album_dir = album
            .directory_path
            .as_deref()
            .ok_or_else(|| ArchiveError::NoDirectory(label.clone()))?;

        archive_directory(album_dir, &self.layout.archive_path(&label))
    }
}

/// Zip the audio files directly inside `album_dir` into `archive_path`.
///
/// Entries are named by file name only. Other files in the directory are
/// left alone.
pub fn archive_directory(album_dir: &Path, archive_path: &Path) -> Result<PathBuf, ArchiveError> {
    let sources = audio_files(album_dir)?;
    if sources.is_empty() {
        return Err(ArchiveError::NothingToArchive {
            dir: album_dir.to_path_buf(),
            extension: AUDIO_EXTENSION,
        });
    }

    let archive_dir = archive_path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(archive_dir)
        .map_err(|e| ArchiveError::io(format!("creating {}", archive_dir.display()), e))?;

    // Written beside the destination and moved into place once complete
    let mut partial = NamedTempFile::new_in(archive_dir)
        .map_err(|e| ArchiveError::io("creating temporary archive", e))?;
    {
        let mut writer = ZipWriter::new(partial.as_file_mut());
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, path) in &sources {
            debug!(entry = %name, "adding to archive");
            writer.start_file(name.as_str(), options)?;
            let mut source = File::open(path)
                .map_err(|e| ArchiveError::io(format!("reading {}", path.display()), e))?;
            std::io::copy(&mut source, &mut writer)
                .map_err(|e| ArchiveError::io(format!("compressing {}", path.display()), e))?;
        }
        writer.finish()?;
    }

    partial
        .persist(archive_path)
        .map_err(|e| ArchiveError::io(format!("writing {}", archive_path.display()), e.error))?;

    for (_, path) in &sources {
        std::fs::remove_file(path)
            .map_err(|e| ArchiveError::io(format!("removing {}", path.display()), e))?;
    }

    info!(archive = %archive_path.display(), entries = sources.len(), "album archived");
    Ok(archive_path.to_path_buf())
}

/// `(entry name, path)` for each audio file in `dir`, sorted by name
fn audio_files(dir: &Path) -> Result<Vec<(String, PathBuf)>, ArchiveError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| ArchiveError::io(format!("listing {}", dir.display()), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ArchiveError::io(format!("listing {}", dir.display()), e))?;
        let path = entry.path();
        let is_audio = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(AUDIO_EXTENSION));
        if !is_audio || !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        files.push((name, path));
    }

    files.sort();
    Ok(files)
}
