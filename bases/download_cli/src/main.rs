// bases/download_cli/src/main.rs
mod app;
mod args;
mod config;
mod output;
mod pipeline;

use app::App;
use args::Args;
use clap::Parser;
use color_eyre::Result;
use config::Config;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::from_args(Args::parse());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .init();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, stopping after cleanup");
            on_interrupt.cancel();
        }
    });

    let app = App::new(config);
    if let Err(error) = app.run(cancel).await {
        app.print_error(&error);
        std::process::exit(1);
    }
    Ok(())
}
