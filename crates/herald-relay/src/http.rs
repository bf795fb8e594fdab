//! Operational HTTP surface.
//!
//! Two read-only endpoints for monitoring and deploy checks:
//! - `GET /health`: liveness plus the crate version
//! - `GET /status`: every speaker with its live session, and the
//!   dictionary entry count

use std::sync::Arc;

use axum::{routing::get, Extension, Json, Router};
use herald_pool::SpeakerSnapshot;
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::Relay;

/// Health check handler.
///
/// Returns `200 OK` with status and version. Used by monitoring and CI to
/// verify the relay is running.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Response body for `GET /status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Every pool member with its live session, if any.
    pub speakers: Vec<SpeakerSnapshot>,
    /// Current dictionary size.
    pub dictionary_entries: usize,
}

/// Status handler: a point-in-time snapshot of the pool and dictionary.
async fn status(Extension(relay): Extension<Arc<Relay>>) -> Json<StatusResponse> {
    let snapshot = relay.pool().snapshot().await;
    let dictionary_entries = relay.dictionary().len().await;
    Json(StatusResponse {
        speakers: snapshot.speakers,
        dictionary_entries,
    })
}

/// Builds the operational router.
pub fn router(relay: Arc<Relay>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(relay))
}
