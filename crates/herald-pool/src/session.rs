//! Live session state.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Speaking rate of a fresh session.
pub const DEFAULT_SPEECH_RATE: f32 = 1.0;

/// An active binding of one text channel, one voice channel, and one guild
/// to one speaker.
///
/// Sessions live in their owning speaker's slot and are destroyed on
/// disconnect. The speaking rate is mutable while the session is live and
/// does not survive it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    /// Unique id, for logs and the operational surface.
    pub id: Uuid,
    /// Guild the session lives in.
    pub guild_id: String,
    /// Text channel whose messages are relayed.
    pub text_channel_id: String,
    /// Voice channel the speaker talks into.
    pub voice_channel_id: String,
    /// Current speaking rate.
    pub speech_rate: f32,
    /// When the binding was created.
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(guild_id: &str, text_channel_id: &str, voice_channel_id: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            guild_id: guild_id.to_string(),
            text_channel_id: text_channel_id.to_string(),
            voice_channel_id: voice_channel_id.to_string(),
            speech_rate: DEFAULT_SPEECH_RATE,
            started_at: Utc::now(),
        }
    }

    /// True when `channel_id` is either side of the binding.
    pub fn involves(&self, channel_id: &str) -> bool {
        self.text_channel_id == channel_id || self.voice_channel_id == channel_id
    }
}
