//! Album metadata resolution
//!
//! Turns a free-text query into a populated [`album_model::Album`]. The
//! primary catalog is asked first; the fallback is only consulted when the
//! primary has no match.

mod catalog;
mod error;
pub mod lastfm;
mod resolver;
pub mod spotify;

pub use catalog::{
    AlbumCatalog, AlbumHit, Artwork, CatalogAlbum, CatalogTrack, ReleaseAlbum, ReleaseCatalog,
    ReleaseHit, ReleaseTrack,
};
pub use error::{CatalogError, ResolveError};
pub use resolver::MetadataResolver;

/// User agent sent to every catalog; MusicBrainz rejects anonymous clients
pub(crate) const USER_AGENT: &str = concat!(
    "album-fetch/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/your-org/album-fetch)"
);
