// components/media_downloader/src/lib.rs
//! Everything that touches media for an album: fetching files, finding and
//! transcoding audio, tagging it and packing the result.

mod acquisition;
mod archive;
mod fetch;
mod layout;
mod tagging;
mod types;
mod utils;
mod youtube;
mod ytdlp;

pub use acquisition::AudioAcquirer;
pub use archive::{archive_directory, Archiver};
pub use fetch::MediaFetcher;
pub use layout::StorageLayout;
pub use tagging::{tag_track, write_tags, TrackTags};
pub use types::{
    ArchiveError, AudioSearch, DownloadError, Downloader, FetchError, TagError, AUDIO_EXTENSION,
};
pub use utils::sanitize_component;
pub use youtube::YouTubeSearch;
pub use ytdlp::{YtDlp, AUDIO_QUALITY};

pub(crate) const USER_AGENT: &str = concat!("album-fetch/", env!("CARGO_PKG_VERSION"));
