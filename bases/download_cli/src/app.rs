// bases/download_cli/src/app.rs
use crate::config::Config;
use crate::output::OutputHandler;
use crate::pipeline::{Pipeline, PipelineOutcome};
use album_metadata::lastfm::LastFmClient;
use album_metadata::spotify::SpotifyClient;
use album_metadata::MetadataResolver;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use media_downloader::{Archiver, AudioAcquirer, MediaFetcher, YouTubeSearch, YtDlp};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct App {
    config: Config,
    output: OutputHandler,
}

impl App {
    pub fn new(config: Config) -> Self {
        let output = OutputHandler::new(config.verbose);
        Self { config, output }
    }

    /// Wire the real catalogs, search and downloader into a pipeline
    async fn pipeline(&self) -> Result<Pipeline> {
        let credentials = &self.config.credentials;
        let layout = self.config.layout();
        layout
            .ensure_roots()
            .await
            .wrap_err_with(|| format!("preparing {}", self.config.root.display()))?;

        let spotify = SpotifyClient::new(
            credentials.spotify_client_id.clone(),
            credentials.spotify_client_secret.clone(),
        )?;
        let lastfm = LastFmClient::new(credentials.lastfm_api_key.clone())?;
        let resolver = MetadataResolver::new(Arc::new(spotify), Arc::new(lastfm));

        let search = YouTubeSearch::new(credentials.google_api_key.clone())?;
        let acquirer = AudioAcquirer::new(Arc::new(search), Arc::new(YtDlp))
            .await
            .wrap_err("audio downloader unavailable")?;

        Ok(Pipeline::new(
            resolver,
            MediaFetcher::new(layout.clone())?.with_progress(!self.config.verbose),
            acquirer,
            Archiver::new(layout),
        ))
    }

    pub async fn run(&self, cancel: CancellationToken) -> Result<PipelineOutcome> {
        let pipeline = self.pipeline().await?;

        self.output.print_start(&self.config.query);
        let outcome = pipeline.run(&self.config.query, &cancel).await?;
        self.output.print_outcome(&outcome);

        Ok(outcome)
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        self.output.print_error(error);
    }
}
