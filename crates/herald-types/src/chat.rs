//! Inbound chat messages and outbound replies.
//!
//! A gateway adapter converts platform events into [`ChatMessage`] values
//! before handing them to the relay. Mention markup (user/role/channel
//! references) is resolved to display text by the adapter, so `content`
//! arrives already human-readable.

use serde::{Deserialize, Serialize};

/// The author of an inbound chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Stable platform user id.
    pub id: String,
    /// Display name at the time the message was sent.
    pub name: String,
    /// True when the author is a bot account.
    pub is_bot: bool,
    /// True for platform-generated system messages (joins, pins, boosts).
    pub is_system: bool,
}

/// An inbound chat message as delivered by a gateway adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Guild the message was sent in.
    pub guild_id: String,
    /// Text channel the message was sent to.
    pub channel_id: String,
    /// Message body with mention markup already resolved to display text.
    pub content: String,
    /// Who sent it.
    pub author: Author,
    /// The sender's current voice channel, if they are connected to one.
    /// Consulted by the connect command to pick the target channel.
    pub voice_channel_id: Option<String>,
}

/// An outbound chat reply.
///
/// Everything the relay says back to a text channel is one of these two
/// shapes. Cards are used for multi-line surfaces (help, status, dictionary
/// listings); plain text for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// A single-line text response.
    Text {
        /// The response body.
        body: String,
    },
    /// A titled card with a multi-line description.
    Card {
        /// Card heading.
        title: String,
        /// Card body; lines separated by `\n`.
        description: String,
    },
}

impl Reply {
    /// Convenience constructor for a plain text reply.
    pub fn text(body: impl Into<String>) -> Self {
        Self::Text { body: body.into() }
    }

    /// Convenience constructor for a card reply.
    pub fn card(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Card {
            title: title.into(),
            description: description.into(),
        }
    }
}
