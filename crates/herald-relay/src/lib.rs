//! Command dispatch and event intake for the herald relay.
//!
//! This crate is the outermost layer of the coordination core: it takes the
//! events a gateway adapter feeds in ([`ChatMessage`], [`VoicePresenceUpdate`])
//! and turns them into dictionary mutations, pool lifecycle calls, relayed
//! utterances, and chat replies. Prefixed messages go through the command
//! grammar in [`command`]; everything else takes the passive relay path.
//!
//! It also carries the deployment surface: TOML configuration ([`config`]),
//! the operational HTTP endpoints ([`http`]), and the daemon binary.
//!
//! [`ChatMessage`]: herald_types::ChatMessage
//! [`VoicePresenceUpdate`]: herald_types::VoicePresenceUpdate

pub mod command;
pub mod config;
mod dispatch;
mod events;
pub mod http;
pub mod outbound;

use std::sync::Arc;

use herald_dict::Dictionary;
use herald_pool::SpeakerPool;

use crate::outbound::ChatSink;

/// The wired-up relay: dictionary, speaker pool, outbound sink, and the
/// command prefix.
///
/// All collaborators are explicit handles passed at construction; there is
/// no ambient state. One `Relay` serves every guild the process sees.
pub struct Relay {
    dictionary: Arc<Dictionary>,
    pool: Arc<SpeakerPool>,
    sink: Arc<dyn ChatSink>,
    prefix: String,
}

impl Relay {
    pub fn new(
        dictionary: Arc<Dictionary>,
        pool: Arc<SpeakerPool>,
        sink: Arc<dyn ChatSink>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            dictionary,
            pool,
            sink,
            prefix: prefix.into(),
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn pool(&self) -> &SpeakerPool {
        &self.pool
    }

    /// The prefix that marks a message as a command.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}
