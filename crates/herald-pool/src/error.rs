use thiserror::Error;

use crate::driver::DriverError;

/// Errors from registry queries and session lifecycle operations.
///
/// Variant messages are written to be shown to users as-is; the dispatcher
/// forwards them without rewording.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The text channel is already part of a live session.
    #[error("text channel is already registered to a speaker")]
    TextChannelBound(String),
    /// The voice channel is already part of a live session.
    #[error("voice channel is already registered to a speaker")]
    VoiceChannelBound(String),
    /// Every speaker that can reach the guild is busy.
    #[error("no available speaker")]
    NoSpeakerAvailable,
    /// The platform rejected or failed the connect; no session was created.
    #[error("connection failed: {0}")]
    ConnectFailed(#[source] DriverError),
    /// The platform rejected or failed the disconnect; the session is kept.
    #[error("disconnect failed: {0}")]
    DisconnectFailed(#[source] DriverError),
    /// No live session involves the given channel.
    #[error("this channel is not bound to any speaker")]
    NotTracked(String),
    /// Speaking rate outside the accepted range.
    #[error("speaking rate must be at least 0.25 and below 4.0 (got {0})")]
    InvalidRate(f32),
}
