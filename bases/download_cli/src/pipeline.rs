// bases/download_cli/src/pipeline.rs
//! Album pipeline: resolve, fetch cover art, acquire and tag each track,
//! archive.
//!
//! Tracks are processed one at a time in tracklist order. A track that
//! cannot be acquired or tagged is reported and left out of the archive;
//! only album-level failures abort the run.

use album_metadata::{MetadataResolver, ResolveError};
use album_model::Album;
use media_downloader::{
    tag_track, ArchiveError, Archiver, AudioAcquirer, DownloadError, FetchError, MediaFetcher,
};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, warn, Instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolving,
    FetchingArt,
    ResolvingSource,
    Downloading,
    Tagging,
    Archiving,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Resolving => "resolving",
            Stage::FetchingArt => "fetching art",
            Stage::ResolvingSource => "resolving source",
            Stage::Downloading => "downloading",
            Stage::Tagging => "tagging",
            Stage::Archiving => "archiving",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Album-level failures; any of these aborts the album
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("album resolution failed")]
    Resolve(#[from] ResolveError),

    #[error("album {0} has no cover art")]
    NoCoverArt(String),

    #[error("cover art download failed")]
    CoverArt(#[source] FetchError),

    #[error("cancelled while {0}")]
    Cancelled(Stage),

    #[error("archiving failed")]
    Archive(#[from] ArchiveError),

    #[error("{0} task did not complete")]
    Task(Stage, #[source] JoinError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    Archived,
    Skipped { reason: String },
    Failed { stage: Stage, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackReport {
    pub id: u32,
    pub name: String,
    pub outcome: TrackOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumReport {
    pub label: String,
    pub archive: PathBuf,
    pub tracks: Vec<TrackReport>,
}

impl AlbumReport {
    pub fn archived(&self) -> usize {
        self.tracks
            .iter()
            .filter(|track| track.outcome == TrackOutcome::Archived)
            .count()
    }
}

#[derive(Debug)]
pub enum PipelineOutcome {
    NoMatch { query: String },
    Completed(AlbumReport),
}

pub struct Pipeline {
    resolver: MetadataResolver,
    fetcher: MediaFetcher,
    acquirer: AudioAcquirer,
    archiver: Archiver,
}

impl Pipeline {
    pub fn new(
        resolver: MetadataResolver,
        fetcher: MediaFetcher,
        acquirer: AudioAcquirer,
        archiver: Archiver,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            acquirer,
            archiver,
        }
    }

    pub async fn run(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<PipelineOutcome, PipelineError> {
        let span = info_span!("album", query);
        async {
            let result = self.run_album(query, cancel).await;
            if let Err(e) = &result {
                error!(error = %e, "album aborted");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run_album(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<PipelineOutcome, PipelineError> {
        info!(stage = %Stage::Resolving);
        let Some(mut album) = self.resolver.resolve(query).await? else {
            warn!("no album matches");
            return Ok(PipelineOutcome::NoMatch {
                query: query.to_string(),
            });
        };
        let label = album.label();
        let album_dir = self.fetcher.layout().album_dir(&label);
        album.directory_path = Some(album_dir.clone());

        info!(stage = %Stage::FetchingArt, album = %label);
        let link = album
            .cover_art_link
            .clone()
            .ok_or_else(|| PipelineError::NoCoverArt(label.clone()))?;
        let cover = self
            .fetcher
            .fetch(&link, &label, Some(&label), cancel)
            .await
            .map_err(PipelineError::CoverArt)?
            .ok_or(PipelineError::Cancelled(Stage::FetchingArt))?;
        album.cover_art_path = Some(cover);

        let mut outcomes = Vec::with_capacity(album.len());
        for index in 0..album.len() {
            if cancel.is_cancelled() {
                return Err(PipelineError::Cancelled(Stage::Downloading));
            }
            let outcome = self.process_track(&mut album, index, &album_dir, cancel).await;
            if cancel.is_cancelled() {
                return Err(PipelineError::Cancelled(Stage::Downloading));
            }
            outcomes.push(outcome);
        }

        info!(stage = %Stage::Archiving, album = %label);
        let archiver = self.archiver.clone();
        let packed = album.clone();
        let archive = tokio::task::spawn_blocking(move || archiver.archive(&packed))
            .await
            .map_err(|e| PipelineError::Task(Stage::Archiving, e))??;

        let tracks = album
            .iter()
            .zip(outcomes)
            .map(|(track, outcome)| TrackReport {
                id: track.id().value(),
                name: track.to_string(),
                outcome: outcome.err().unwrap_or(TrackOutcome::Archived),
            })
            .collect();
        info!(stage = %Stage::Done, archive = %archive.display());

        Ok(PipelineOutcome::Completed(AlbumReport {
            label,
            archive,
            tracks,
        }))
    }

    /// Acquire then tag one track. `Err` carries why it will be missing
    /// from the archive.
    async fn process_track(
        &self,
        album: &mut Album,
        index: usize,
        album_dir: &Path,
        cancel: &CancellationToken,
    ) -> Result<(), TrackOutcome> {
        let track = album.track_mut(index).map_err(|e| TrackOutcome::Failed {
            stage: Stage::ResolvingSource,
            error: e.to_string(),
        })?;
        info!(stage = %Stage::ResolvingSource, track = %track);

        match self.acquirer.acquire(album_dir, track, cancel).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                let reason = if cancel.is_cancelled() {
                    "cancelled"
                } else {
                    "no audio source found"
                };
                return Err(TrackOutcome::Skipped {
                    reason: reason.to_string(),
                });
            }
            Err(e) => {
                let stage = match e {
                    DownloadError::SearchFailed(_) => Stage::ResolvingSource,
                    _ => Stage::Downloading,
                };
                warn!(track = %track, %stage, error = %e, "track skipped");
                return Err(TrackOutcome::Failed {
                    stage,
                    error: e.to_string(),
                });
            }
        }

        let album: &Album = album;
        let track = &album.tracklist()[index];
        info!(stage = %Stage::Tagging, track = %track);

        // lofty reads and rewrites the whole file
        let snapshot = album.clone();
        let tagged = tokio::task::spawn_blocking(move || {
            tag_track(&snapshot, &snapshot.tracklist()[index]).map_err(|e| e.to_string())
        })
        .await
        .unwrap_or_else(|e| Err(e.to_string()));

        if let Err(e) = tagged {
            warn!(track = %track, error = %e, "tagging failed, dropping file");
            if let Some(path) = &track.file_path {
                if let Err(remove) = tokio::fs::remove_file(path).await {
                    warn!(path = %path.display(), error = %remove, "could not remove untagged file");
                }
            }
            return Err(TrackOutcome::Failed {
                stage: Stage::Tagging,
                error: e,
            });
        }

        Ok(())
    }
}
