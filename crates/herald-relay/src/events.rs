//! Event intake.
//!
//! Each inbound event is one unit of work: chat messages are filtered,
//! parsed, and either dispatched as commands or relayed to the bound
//! speaker; voice-presence updates feed the pool's auto-teardown. Both
//! handlers absorb every failure; nothing here returns an error to the
//! gateway adapter.

use herald_types::{ChatMessage, RelayMessage, Reply, VoicePresenceUpdate};
use tracing::{debug, warn};

use crate::command::{parse, Parsed};
use crate::Relay;

impl Relay {
    /// Handles one inbound chat message.
    ///
    /// Bot-authored, system, and empty messages are dropped before either
    /// path. Prefixed messages run the command grammar and always produce
    /// exactly one reply unless the command word is unknown; unprefixed
    /// messages relay to the bound speaker, if any.
    pub async fn handle_message(&self, msg: &ChatMessage) {
        if msg.author.is_bot || msg.author.is_system || msg.content.is_empty() {
            return;
        }

        match parse(&msg.content, &self.prefix) {
            Some(Parsed::Command(command)) => {
                debug!(
                    channel_id = %msg.channel_id,
                    author = %msg.author.id,
                    ?command,
                    "dispatching command"
                );
                let reply = self.dispatch(msg, command).await;
                self.sink.send(&msg.channel_id, reply).await;
            }
            Some(Parsed::Invalid(err)) => {
                self.sink
                    .send(&msg.channel_id, Reply::text(format!("error: {err}")))
                    .await;
            }
            // Unrecognized command word: say nothing, matching the original.
            Some(Parsed::Unknown) => {}
            None => self.relay_to_speaker(msg).await,
        }
    }

    /// The passive relay path: normalize the message and enqueue it on the
    /// speaker bound to this text channel. Untracked channels and empty
    /// normalized output are dropped silently.
    async fn relay_to_speaker(&self, msg: &ChatMessage) {
        let Some(speaker) = self.pool.find_tracking(&msg.channel_id).await else {
            return;
        };
        // Only the text side of a binding relays; a channel tracked as the
        // voice side has no playback target here.
        let Some(voice_channel_id) = speaker.voice_channel_for(&msg.channel_id).await else {
            return;
        };

        let text = herald_normalize::normalize(&msg.content, &self.dictionary).await;
        if text.is_empty() {
            debug!(channel_id = %msg.channel_id, "normalized to nothing, dropped");
            return;
        }

        debug!(
            speaker = speaker.id(),
            channel_id = %msg.channel_id,
            voice_channel_id = %voice_channel_id,
            "relaying message"
        );
        speaker.enqueue(RelayMessage {
            guild_id: msg.guild_id.clone(),
            voice_channel_id,
            text,
        });
    }

    /// Handles one voice-presence update.
    ///
    /// Successful auto-teardown stays silent in chat. A failed platform
    /// disconnect is reported to the session's bound text channel so the
    /// users there know the speaker may still be in voice.
    pub async fn handle_presence(&self, update: &VoicePresenceUpdate) {
        let Some(teardown) = self.pool.handle_presence(update).await else {
            return;
        };
        if let Some(err) = teardown.error {
            warn!(
                speaker = %teardown.speaker_id,
                text_channel_id = %teardown.session.text_channel_id,
                error = %err,
                "notifying channel of failed auto-teardown"
            );
            self.sink
                .send(
                    &teardown.session.text_channel_id,
                    Reply::text(format!(
                        "error: automatic disconnect failed; try {}dc",
                        self.prefix
                    )),
                )
                .await;
        }
    }
}
