//! Server entrypoint for switchboard
//!
//! This is the main binary that wires together all layers using
//! dependency injection and serves the HTTP API.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use switchboard_api::{AppState, build_router};
use switchboard_application::{AgentDirectory, ProcessQueryUseCase};
use switchboard_infrastructure::{ConfigLoader, JsonAgentStore, JsonlRunStore, OpenRouterGateway};
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// CLI arguments for the switchboard server
#[derive(Parser, Debug)]
#[command(name = "switchboard")]
#[command(author, version, about = "Multi-agent query orchestrator over OpenRouter")]
#[command(long_about = r#"
Switchboard routes each query to a specialized agent, has that agent draft
an answer, and loops the draft through a reviewer until it is approved or
the iteration limit is reached.

Configuration is merged from (lowest to highest priority):
1. Built-in defaults
2. ./switchboard.toml     Project-level config
3. --config <path>        Explicit config file
4. Environment            SWITCHBOARD_* (plus OPENROUTER_API_KEY / MODEL_NAME)
5. --host / --port flags

Example:
  switchboard
  switchboard --port 9000 -vv
  OPENROUTER_API_KEY=sk-or-... switchboard --config deploy/switchboard.toml
"#)]
struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Bind address (overrides [server] host)
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Bind port (overrides [server] port)
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the effective configuration and exit
    #[arg(long)]
    show_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config =
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if cli.show_config {
        let mut shown = config;
        if shown.llm.api_key.is_some() {
            shown.llm.api_key = Some("<redacted>".to_string());
        }
        print!("{}", toml::to_string_pretty(&shown)?);
        return Ok(());
    }

    info!("Starting switchboard");
    for issue in config.validate() {
        warn!("Config: {issue}");
    }

    // === Dependency Injection ===
    let registry = Arc::new(
        JsonAgentStore::open(&config.registry.path).context("Failed to open agent registry")?,
    );
    let gateway = Arc::new(
        OpenRouterGateway::new(&config.llm).context("Failed to build the OpenRouter client")?,
    );
    let history =
        Arc::new(JsonlRunStore::new(&config.history.path).context("Failed to open run history")?);

    let shutdown = CancellationToken::new();
    let pipeline = ProcessQueryUseCase::new(
        gateway,
        registry.clone(),
        config.pipeline.to_pipeline_config(),
    )
    .with_cancellation_token(shutdown.clone());
    let directory = AgentDirectory::new(registry);

    let state = AppState::new(Arc::new(pipeline), Arc::new(directory), history);
    let router = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Resolves when the process is asked to stop (Ctrl+C or SIGTERM).
///
/// The cancellation token is cancelled first so in-flight pipeline runs
/// abort before the listener stops draining.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }

    shutdown.cancel();
}
