mod filenames;
mod inputs;
mod options;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use options::Options;
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    let opts = Options::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cancel = CancellationToken::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            tracing::warn!("received SIGINT, cancelling at the next stage boundary");
            watcher.cancel();
        }
    });

    if let Err(err) = pipeline::run(&opts, &cancel).await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }

    Ok(())
}
