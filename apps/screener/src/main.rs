mod cli;
mod config;
mod errors;
mod llm_client;
mod routes;
mod screening;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::screening::Screener;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on missing required env vars)
    let mut config = Config::from_env()?;
    apply_overrides(&mut config, &cli);

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting resume screener v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client; the key goes in here and nowhere else
    let llm = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_base_url.clone(),
        config.request_timeout(),
    )
    .context("Failed to build HTTP client")?;
    info!("LLM client initialized (model: {})", llm.model());

    let policy = config.poll_policy();
    info!(
        "Poll policy: every {}ms, at most {} checks",
        policy.interval.as_millis(),
        policy.max_attempts
    );
    let screener =
        Screener::new(Arc::new(llm), policy).with_remote_cleanup(config.delete_remote_files);

    match &cli.command {
        Command::Serve { .. } => serve(screener, config.port).await,
        Command::Screen(args) => cli::run_screen(&screener, args).await,
        Command::Analyze(args) => cli::run_analyze(&screener, args).await,
    }
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.gemini_model = model.clone();
    }
    if let Some(ms) = cli.poll_interval_ms {
        config.poll_interval_ms = ms;
    }
    if let Some(max) = cli.max_polls {
        config.poll_max_attempts = max;
    }
    if let Command::Serve { port: Some(port) } = &cli.command {
        config.port = *port;
    }
}

async fn serve(screener: Screener, port: u16) -> Result<()> {
    let state = AppState { screener };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
