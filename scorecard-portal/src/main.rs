//! scorecard-portal - Reproducibility scorecard web portal
//!
//! Loads the scorecard CSV once at startup and serves filterable paper
//! cards and summary metrics over HTTP.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use scorecard_common::config::{CliOverrides, PortalConfig, TomlConfig};
use scorecard_common::loader::{self, LoadOptions};
use scorecard_portal::{build_router, AppState, UiSettings};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for scorecard-portal
#[derive(Parser, Debug)]
#[command(name = "scorecard-portal")]
#[command(about = "Reproducibility scorecard web portal")]
#[command(version)]
struct Args {
    /// Scorecard CSV to load [default: data/scorecard_summary.csv]
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// Port to listen on [default: 8501]
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind [default: 127.0.0.1]
    #[arg(short, long)]
    bind: Option<String>,

    /// TOML config file [default: <config dir>/scorecard-portal/config.toml]
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config file is read before tracing starts so its log_level can apply;
    // problems are reported once the subscriber is up
    let toml_result = TomlConfig::discover(args.config.as_deref());
    let toml = match &toml_result {
        Ok(Some((_, cfg))) => cfg.clone(),
        _ => TomlConfig::default(),
    };

    let cli = CliOverrides {
        data_file: args.data_file,
        bind: args.bind,
        port: args.port,
    };
    let config = PortalConfig::resolve(&cli, &toml);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", config.log_level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting scorecard-portal v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match toml_result {
        Ok(Some((path, _))) => info!("Config file: {}", path.display()),
        Ok(None) => info!("No config file found, using defaults"),
        Err(e) => warn!("Ignoring config file: {}", e),
    }

    info!("Data file: {}", config.data_file.display());
    let options = LoadOptions {
        paper_link_base: config.paper_link_base.clone(),
    };
    let result = loader::load_csv(&config.data_file, &options);
    let state = AppState::from_load_result(result, &config.data_file, UiSettings::from(&config));
    if let Some(e) = &state.load_error {
        warn!("Serving empty portal: {}", e);
    }

    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("scorecard-portal listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
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
