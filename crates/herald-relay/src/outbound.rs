//! Outbound chat delivery.
//!
//! The relay never talks to a chat platform directly; every reply goes
//! through a [`ChatSink`]. Delivery is fire-and-forget from the relay's
//! point of view: a sink that fails should log and drop, since there is no
//! channel left to report the failure to.

use async_trait::async_trait;
use herald_types::Reply;

/// Where replies go.
#[async_trait]
pub trait ChatSink: Send + Sync {
    /// Delivers one reply to a text channel.
    async fn send(&self, channel_id: &str, reply: Reply);
}

/// A sink that writes replies to the log instead of a chat surface. Lets
/// the daemon run end-to-end without a gateway adapter.
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl ChatSink for LogSink {
    async fn send(&self, channel_id: &str, reply: Reply) {
        match reply {
            Reply::Text { body } => {
                tracing::info!(channel_id, body = %body, "outbound reply");
            }
            Reply::Card { title, description } => {
                tracing::info!(
                    channel_id,
                    title = %title,
                    description = %description,
                    "outbound card"
                );
            }
        }
    }
}
