use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgAction, Parser};
use color_eyre::eyre::Context;
use tokio_util::sync::CancellationToken;
use tracing::info;

use reelgate_config::Settings;
use reelgate_service::Movies;
use reelgate_store::PgReviewStore;
use reelgate_tmdb::TmdbClient;

mod logging;
mod rpc;

#[derive(Parser)]
#[command(name = "reelgate")]
#[command(about = "Reelgate - movie catalog and user review RPC service")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the configured bind address
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let mut settings =
        Settings::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(bind) = cli.bind {
        settings.server.bind_addr = bind;
    }

    let pool = reelgate_store::connect(&settings.database)
        .await
        .context("failed to connect to the review store")?;
    info!("connected to the review store");

    let catalog = Arc::new(TmdbClient::new(&settings.tmdb));
    let reviews = Arc::new(PgReviewStore::new(pool));
    let movies = Arc::new(Movies::new(catalog, reviews));

    let shutdown = CancellationToken::new();
    let router = rpc::create_router(rpc::AppState {
        movies,
        shutdown: shutdown.clone(),
    });

    let listener = tokio::net::TcpListener::bind(&settings.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.server.bind_addr))?;
    info!("listening on {}", settings.server.bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("server error")?;

    Ok(())
}

/// Wait for ctrl-c, then cancel every in-flight request context so
/// collaborator calls release their pool slots promptly.
async fn shutdown_signal(shutdown: CancellationToken) {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
    shutdown.cancel();
}
