//! Shared boundary types for the herald relay.
//!
//! This crate defines the messages that cross the seams between the
//! coordination core and its external collaborators: inbound chat and
//! voice-presence events from a platform gateway adapter, outbound chat
//! replies, and the relay payload handed to a speaker's playback queue.
//!
//! No crate in the workspace depends on anything *except* `herald-types`
//! for cross-cutting type definitions, which keeps the dependency graph
//! acyclic.

use serde::{Deserialize, Serialize};

mod chat;
mod presence;

pub use chat::{Author, ChatMessage, Reply};
pub use presence::{ChannelOccupancy, Occupant, VoicePresenceUpdate};

/// Text bound for a speaker's playback queue.
///
/// Built once per relayed chat message, after normalization, and discarded
/// when the speaker has consumed it. Carries enough addressing for a driver
/// to route the utterance without consulting the registry again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayMessage {
    /// Guild the session lives in.
    pub guild_id: String,
    /// Voice channel the text should be spoken into.
    pub voice_channel_id: String,
    /// Normalized, speakable text. Never empty; callers drop empty output
    /// before constructing a `RelayMessage`.
    pub text: String,
}
