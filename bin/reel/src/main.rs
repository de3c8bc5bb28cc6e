//! Reel - video catalogue GraphQL server.
//!
//! Serves the catalogue over GraphQL with Relay global ids and cursor
//! connections. Every flag has an environment fallback and a `.env` file
//! is read when present.
//!
//! ```bash
//! reel                                   # sample catalogue on :3000
//! PORT=4000 METRICS_PORT=9090 reel       # custom port, Prometheus on :9090
//! reel --empty --no-playground           # empty catalogue, no GraphiQL
//! ```

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, info, info_span, warn};
use tracing_subscriber::{EnvFilter, fmt};

use reel_core::metrics::init_metrics;
use reel_core::ports::VideoRepository;
use reel_graphql::{ServerConfig, bind, build_schema, serve_with_shutdown};
use reel_store::MemoryVideoStore;

/// How long the server may take to drain after a shutdown request.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[derive(Parser, Debug)]
#[command(name = "reel", version, about = "Reel - video catalogue GraphQL server")]
struct Cli {
    /// Interface the GraphQL server binds to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// GraphQL server port.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Serve Prometheus metrics on this port.
    #[arg(long, env = "METRICS_PORT")]
    metrics_port: Option<u16>,

    /// Emit logs as JSON lines.
    #[arg(long, env = "JSON_LOGS")]
    json_logs: bool,

    /// Default log filter when RUST_LOG is unset.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Do not serve GraphiQL.
    #[arg(long, env = "NO_PLAYGROUND")]
    no_playground: bool,

    /// Start with an empty catalogue instead of the sample videos.
    #[arg(long, env = "EMPTY_CATALOGUE")]
    empty: bool,
}

impl Cli {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            enable_playground: !self.no_playground,
        }
    }

    fn store(&self) -> MemoryVideoStore {
        if self.empty {
            MemoryVideoStore::new()
        } else {
            MemoryVideoStore::with_samples()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json_logs);

    info!(version = env!("CARGO_PKG_VERSION"), "🎬 Starting Reel");

    let metrics_addr = cli.metrics_port.and_then(install_metrics_exporter);

    let videos: Arc<dyn VideoRepository> = Arc::new(cli.store());
    let seeded = videos
        .list_videos()
        .await
        .context("Failed to read video catalogue")?
        .len();
    debug!(videos = seeded, "Catalogue ready");

    // A node type registered twice is a wiring bug; refuse to start.
    let schema = build_schema(videos).context("Failed to register node types")?;

    let config = cli.server_config();
    let listener = bind(&config)
        .await
        .with_context(|| format!("Failed to bind GraphQL listener on {}", config.addr()))?;

    let (stop_tx, mut stop_rx) = watch::channel(false);
    let server = tokio::spawn(
        async move {
            let stopped = async move {
                let _ = stop_rx.wait_for(|stop| *stop).await;
            };
            serve_with_shutdown(schema, listener, config.enable_playground, stopped).await
        }
        .instrument(info_span!("graphql")),
    );

    info!(port = cli.port, playground = !cli.no_playground, "✅ Reel ready");
    match metrics_addr {
        Some(addr) => info!("   📊 Metrics:  http://{}/metrics", addr),
        None => info!("   📊 Metrics:  disabled"),
    }

    supervise(server, stop_tx, wait_for_signal()).await?;

    info!("🛑 Stopped");
    Ok(())
}

/// Run until the server exits on its own or `signal` fires.
///
/// A server that stops without being asked is an error. After a signal the
/// server gets [`SHUTDOWN_GRACE`] to drain.
async fn supervise<F>(
    mut server: JoinHandle<std::io::Result<()>>,
    stop_tx: watch::Sender<bool>,
    signal: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    tokio::select! {
        exited = &mut server => {
            exited.context("GraphQL server task panicked")?
                .context("GraphQL server failed")?;
            anyhow::bail!("GraphQL server stopped unexpectedly");
        }
        _ = signal => {}
    }

    info!("🛑 Shutting down...");
    let _ = stop_tx.send(true);
    match tokio::time::timeout(SHUTDOWN_GRACE, server).await {
        Ok(Ok(Ok(()))) => debug!("GraphQL server stopped"),
        Ok(Ok(Err(e))) => error!(error = %e, "❌ GraphQL server failed while draining"),
        Ok(Err(e)) => error!(error = %e, "❌ GraphQL server task panicked"),
        Err(_) => warn!(grace_secs = SHUTDOWN_GRACE.as_secs(), "⚠️  Server did not stop in time"),
    }
    Ok(())
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = fmt().with_env_filter(filter);

    if json {
        builder.json().with_current_span(true).init();
    } else {
        builder.with_target(false).compact().init();
    }
}

/// Start the Prometheus exporter.
///
/// Metrics are optional: on failure a warning is logged and `None` returned.
fn install_metrics_exporter(port: u16) -> Option<SocketAddr> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            init_metrics();
            Some(addr)
        }
        Err(e) => {
            warn!(error = %e, %addr, "⚠️  Metrics exporter unavailable, continuing without it");
            None
        }
    }
}

/// Resolve on Ctrl+C or, on unix, SIGTERM.
async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => debug!("Received Ctrl+C"),
        _ = terminate => debug!("Received SIGTERM"),
    }
}
