// components/media_downloader/src/utils.rs
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;
use url::Url;

/// Sanitize a name so it can be used as a single path component
pub fn sanitize_component(name: &str) -> String {
    let options = sanitize_filename::Options {
        truncate: true,
        windows: true,
        replacement: "_",
    };
    let sanitized = sanitize_filename::sanitize_with_options(name, options);
    if sanitized.is_empty() {
        "_".to_string()
    } else {
        sanitized
    }
}

/// File extension for a `Content-Type` header value
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    match mime.as_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        "audio/mpeg" | "audio/mp3" => Some("mp3"),
        "audio/mp4" | "audio/x-m4a" => Some("m4a"),
        "audio/ogg" => Some("ogg"),
        "audio/flac" | "audio/x-flac" => Some("flac"),
        "audio/wav" | "audio/x-wav" | "audio/wave" => Some("wav"),
        "audio/webm" | "video/webm" => Some("webm"),
        _ => None,
    }
}

/// Stem of the last path segment of `url`, without any extension it claims
pub fn stem_from_url(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");
    let stem = Path::new(segment)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("");

    if stem.is_empty() {
        "download".to_string()
    } else {
        sanitize_component(stem)
    }
}

/// Remove a partially written file, and its directory if that left it empty
pub async fn discard_partial(file: &Path, dir: &Path) -> std::io::Result<()> {
    match tokio::fs::remove_file(file).await {
        Ok(()) => debug!(path = %file.display(), "removed partial file"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    remove_dir_if_empty(dir).await
}

/// Remove every `<stem>.*` file in `dir`, then `dir` itself if nothing is left
pub async fn discard_outputs(dir: &Path, stem: &str) -> std::io::Result<()> {
    let prefix = format!("{}.", stem);
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    while let Some(entry) = entries.next_entry().await? {
        if entry.file_name().to_string_lossy().starts_with(&prefix) {
            discard_partial(&entry.path(), dir).await?;
        }
    }
    remove_dir_if_empty(dir).await
}

async fn remove_dir_if_empty(dir: &Path) -> std::io::Result<()> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    if entries.next_entry().await?.is_none() {
        tokio::fs::remove_dir(dir).await?;
        debug!(path = %dir.display(), "removed empty album directory");
    }
    Ok(())
}
