//! wordgrid-server - puzzle store and HTTP API for the word grid game
//!
//! Startup: load configuration, open the database, import puzzle files,
//! then serve the API and static site until interrupted.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wordgrid_common::config::Config;
use wordgrid_common::db::init_database;
use wordgrid_common::import::import_puzzle_dir;
use wordgrid_server::{build_router, AppState};

/// Command-line arguments for wordgrid-server
#[derive(Parser, Debug)]
#[command(name = "wordgrid-server")]
#[command(about = "Puzzle store and HTTP API for the word grid game")]
#[command(version)]
struct Args {
    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long, env = "WORDGRID_DATABASE")]
    database: Option<PathBuf>,

    /// Directory of puzzle JSON files to import at startup
    #[arg(long)]
    puzzles: Option<PathBuf>,

    /// Skip the startup puzzle import
    #[arg(long)]
    no_import: bool,

    /// Directory of static site files
    #[arg(long)]
    site: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "WORDGRID_PORT")]
    port: Option<u16>,
}

impl Args {
    /// Command-line values win over the config file
    fn apply(self, mut config: Config) -> Config {
        if let Some(database) = self.database {
            config.database_path = database;
        }
        if let Some(puzzles) = self.puzzles {
            config.puzzle_dir = Some(puzzles);
        }
        if self.no_import {
            config.puzzle_dir = None;
        }
        if let Some(site) = self.site {
            config.site_dir = site;
        }
        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "wordgrid_server=info,wordgrid_common=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting wordgrid-server v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    let config = args.apply(config);

    info!("Database path: {}", config.database_path.display());
    let pool = init_database(&config.database_path)
        .await
        .context("Failed to open database")?;
    info!("✓ Database ready");

    match &config.puzzle_dir {
        Some(dir) => match import_puzzle_dir(&pool, dir).await {
            Ok(report) => info!(
                "Puzzle import: {} imported, {} skipped, {} failed",
                report.imported,
                report.skipped,
                report.failed.len()
            ),
            Err(e) => warn!("Puzzle import failed, serving existing puzzles: {}", e),
        },
        None => info!("Puzzle import disabled"),
    }

    let site_dir = config.site_dir.is_dir().then_some(config.site_dir.as_path());
    if site_dir.is_none() {
        warn!(
            "Site directory {} not found, serving API only",
            config.site_dir.display()
        );
    }

    let state = AppState::new(pool.clone(), config.rotation_boundary);
    let app = build_router(state, site_dir);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("wordgrid-server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
