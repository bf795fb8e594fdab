//! The platform adapter seam.
//!
//! One [`SpeakerDriver`] backs one speaker identity. Binding state lives in
//! the pool, not in the driver: a driver only touches the platform (join or
//! leave voice, adjust playback, queue utterances) and answers whether its
//! identity can operate in a guild at all.

use async_trait::async_trait;
use herald_types::RelayMessage;
use thiserror::Error;

/// Errors surfaced by a platform driver.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The platform gateway rejected or failed the operation.
    #[error("platform error: {0}")]
    Platform(String),
    /// The driver has no live gateway connection.
    #[error("driver offline")]
    Offline,
}

/// Per-speaker platform adapter.
#[async_trait]
pub trait SpeakerDriver: Send + Sync {
    /// Whether this speaker identity is visible and usable in the guild.
    fn is_accessible(&self, guild_id: &str) -> bool;

    /// Joins the voice channel on the platform. The text channel is passed
    /// through so adapters can subscribe to it if their platform requires
    /// an explicit pairing.
    async fn connect(
        &self,
        guild_id: &str,
        text_channel_id: &str,
        voice_channel_id: &str,
    ) -> Result<(), DriverError>;

    /// Leaves the guild's voice channel.
    async fn disconnect(&self, guild_id: &str) -> Result<(), DriverError>;

    /// Adjusts playback rate for the guild's active session. Platform
    /// playback has no failure to report here; bad rates never reach the
    /// driver.
    fn set_speaking_rate(&self, guild_id: &str, rate: f32);

    /// Queues an utterance on the speaker's playback queue.
    fn enqueue(&self, message: RelayMessage);
}

/// A driver that talks to no platform: always accessible, every operation
/// succeeds, traffic goes to the log. Lets the daemon run end-to-end
/// without a gateway adapter.
#[derive(Debug, Default)]
pub struct NullDriver;

#[async_trait]
impl SpeakerDriver for NullDriver {
    fn is_accessible(&self, _guild_id: &str) -> bool {
        true
    }

    async fn connect(
        &self,
        guild_id: &str,
        text_channel_id: &str,
        voice_channel_id: &str,
    ) -> Result<(), DriverError> {
        tracing::debug!(guild_id, text_channel_id, voice_channel_id, "null driver connect");
        Ok(())
    }

    async fn disconnect(&self, guild_id: &str) -> Result<(), DriverError> {
        tracing::debug!(guild_id, "null driver disconnect");
        Ok(())
    }

    fn set_speaking_rate(&self, guild_id: &str, rate: f32) {
        tracing::debug!(guild_id, rate, "null driver rate change");
    }

    fn enqueue(&self, message: RelayMessage) {
        tracing::debug!(
            guild_id = %message.guild_id,
            voice_channel_id = %message.voice_channel_id,
            text = %message.text,
            "null driver enqueue"
        );
    }
}
