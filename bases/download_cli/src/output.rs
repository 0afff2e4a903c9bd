// bases/download_cli/src/output.rs
use crate::pipeline::{AlbumReport, PipelineOutcome, TrackOutcome};

pub struct OutputHandler {
    verbose: bool,
}

impl OutputHandler {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn print_start(&self, query: &str) {
        println!("Looking up album: {}", query);
    }

    pub fn print_outcome(&self, outcome: &PipelineOutcome) {
        match outcome {
            PipelineOutcome::NoMatch { query } => {
                println!("No album found for \"{}\"", query);
            }
            PipelineOutcome::Completed(report) => self.print_report(report),
        }
    }

    fn print_report(&self, report: &AlbumReport) {
        println!("Album: {}", report.label);
        for track in &report.tracks {
            match &track.outcome {
                TrackOutcome::Archived => {
                    if self.verbose {
                        println!("  ok      {}", track.name);
                    }
                }
                TrackOutcome::Skipped { reason } => {
                    println!("  skipped {} ({})", track.name, reason);
                }
                TrackOutcome::Failed { stage, error } => {
                    println!("  failed  {} while {}: {}", track.name, stage, error);
                }
            }
        }
        println!(
            "Archived {} of {} tracks to {}",
            report.archived(),
            report.tracks.len(),
            report.archive.display()
        );
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        eprintln!("Error: {}", error);

        if self.verbose {
            eprintln!("\nError details:");
            error.chain().skip(1).for_each(|cause| {
                eprintln!("  caused by: {}", cause);
            });
        }
    }
}
