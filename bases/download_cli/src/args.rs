// bases/download_cli/src/args.rs
use clap::Parser;
use std::path::PathBuf;

/// Fetch a whole album as tagged mp3s, packed into one zip
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Album to look up, e.g. "Glory Sound Prep"
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Directory holding the downloads/ and archives/ folders
    #[arg(short, long, env = "ALBUM_FETCH_ROOT", default_value = ".")]
    pub root: PathBuf,

    #[arg(long, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
    pub spotify_client_id: String,

    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    pub spotify_client_secret: String,

    #[arg(long, env = "LASTFM_API_KEY", hide_env_values = true)]
    pub lastfm_api_key: String,

    /// YouTube Data API key used to find audio sources
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub google_api_key: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
