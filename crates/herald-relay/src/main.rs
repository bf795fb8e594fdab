//! Herald relay daemon.
//!
//! Wires the coordination core together from configuration: dictionary
//! store, speaker pool, relay, and the operational HTTP listener, with
//! structured logging and graceful shutdown on SIGTERM/SIGINT. Platform
//! deployments swap the [`NullDriver`] and [`LogSink`] for real gateway
//! adapters.

use std::sync::Arc;

use herald_dict::{DictStore, Dictionary, MemoryStore, SqliteStore};
use herald_pool::{NullDriver, Speaker, SpeakerPool};
use herald_relay::outbound::LogSink;
use herald_relay::{config, http, Relay};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("HERALD_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

#[tokio::main]
async fn main() {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("herald.toml"));

    // Load configuration
    let config = config::load_config(selected_config_path)
        .expect("failed to load configuration; the relay cannot start without valid config");

    // Initialize tracing
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    // Open the dictionary store and load entries
    let store: Arc<dyn DictStore> = match &config.dictionary.path {
        Some(path) => Arc::new(
            SqliteStore::open(path)
                .expect("failed to open dictionary store; check dictionary.path in config"),
        ),
        None => {
            tracing::info!("no dictionary path configured, entries will not survive restarts");
            Arc::new(MemoryStore)
        }
    };
    let dictionary = Arc::new(
        Dictionary::load(store)
            .await
            .expect("failed to load dictionary entries"),
    );
    tracing::info!(entries = dictionary.len().await, "dictionary ready");

    // Build the speaker pool in configured order
    let speakers = config
        .speakers
        .iter()
        .map(|speaker| {
            Arc::new(Speaker::new(
                speaker.id.as_str(),
                speaker.display_name(),
                Arc::new(NullDriver),
            ))
        })
        .collect();
    let pool = Arc::new(SpeakerPool::new(speakers));
    tracing::info!(
        speakers = pool.len(),
        prefix = %config.relay.command_prefix,
        "speaker pool ready"
    );

    let relay = Arc::new(Relay::new(
        dictionary,
        pool,
        Arc::new(LogSink),
        config.relay.command_prefix.as_str(),
    ));

    // Serve the operational endpoints
    let app = http::router(relay);
    let addr = config.http.addr;

    tracing::info!(%addr, "starting herald relay");

    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind to address; is another process using this port?");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("herald relay shut down");
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
