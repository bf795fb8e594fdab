//! Voice-presence change events.
//!
//! Gateway adapters emit a [`VoicePresenceUpdate`] whenever a user joins,
//! leaves, or moves between voice channels. Occupancy snapshots reflect the
//! state *after* the change, which is what the auto-teardown check needs.

use serde::{Deserialize, Serialize};

/// A single member of a voice channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    /// Platform user id.
    pub user_id: String,
    /// True when the member is a bot account (speakers count as bots).
    pub is_bot: bool,
}

/// Occupancy of one voice channel after a presence change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelOccupancy {
    /// The voice channel id.
    pub channel_id: String,
    /// Members still present in the channel.
    pub members: Vec<Occupant>,
}

impl ChannelOccupancy {
    /// True when no members remain at all.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of non-bot members still present.
    pub fn human_count(&self) -> usize {
        self.members.iter().filter(|m| !m.is_bot).count()
    }
}

/// A user's voice-presence transition.
///
/// `old_channel` is `None` when the user was not in voice before the event
/// (a fresh join); `new_channel_id` is `None` when they disconnected
/// entirely. A move between channels populates both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoicePresenceUpdate {
    /// Guild the transition happened in.
    pub guild_id: String,
    /// The user who moved.
    pub user_id: String,
    /// The channel the user left, with its remaining occupancy.
    pub old_channel: Option<ChannelOccupancy>,
    /// The channel the user joined, if any.
    pub new_channel_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_count_ignores_bots() {
        let occupancy = ChannelOccupancy {
            channel_id: "v1".to_string(),
            members: vec![
                Occupant {
                    user_id: "u1".to_string(),
                    is_bot: false,
                },
                Occupant {
                    user_id: "b1".to_string(),
                    is_bot: true,
                },
            ],
        };
        assert_eq!(occupancy.human_count(), 1);
        assert!(!occupancy.is_empty());
    }

    #[test]
    fn presence_round_trip() {
        let update = VoicePresenceUpdate {
            guild_id: "g1".to_string(),
            user_id: "u1".to_string(),
            old_channel: Some(ChannelOccupancy {
                channel_id: "v1".to_string(),
                members: vec![],
            }),
            new_channel_id: None,
        };
        let json = serde_json::to_string(&update).unwrap();
        let back: VoicePresenceUpdate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, update);
    }
}
