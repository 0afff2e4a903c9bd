// bases/download_cli/src/config.rs
use crate::args::Args;
use media_downloader::StorageLayout;
use std::path::PathBuf;

/// Keys for the external catalogs and search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub lastfm_api_key: String,
    pub google_api_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Free-text album query, words joined by single spaces
    pub query: String,
    pub root: PathBuf,
    pub credentials: Credentials,
    pub verbose: bool,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        let query = args
            .query
            .iter()
            .flat_map(|part| part.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            query,
            root: args.root,
            credentials: Credentials {
                spotify_client_id: args.spotify_client_id,
                spotify_client_secret: args.spotify_client_secret,
                lastfm_api_key: args.lastfm_api_key,
                google_api_key: args.google_api_key,
            },
            verbose: args.verbose,
        }
    }

    pub fn layout(&self) -> StorageLayout {
        StorageLayout::new(&self.root)
    }

    /// Default log filter when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "download_cli=debug,media_downloader=debug,album_metadata=debug"
        } else {
            "download_cli=info,media_downloader=info,album_metadata=info"
        }
    }
}
