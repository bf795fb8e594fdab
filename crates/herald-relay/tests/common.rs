//! Shared doubles and builders for the relay integration tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use herald_dict::Dictionary;
use herald_pool::{DriverError, Speaker, SpeakerDriver, SpeakerPool};
use herald_relay::outbound::ChatSink;
use herald_relay::Relay;
use herald_types::{
    Author, ChannelOccupancy, ChatMessage, Occupant, RelayMessage, Reply, VoicePresenceUpdate,
};

/// Captures every reply the relay sends.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<(String, Reply)>>,
}

#[async_trait]
impl ChatSink for RecordingSink {
    async fn send(&self, channel_id: &str, reply: Reply) {
        self.sent
            .lock()
            .unwrap()
            .push((channel_id.to_string(), reply));
    }
}

impl RecordingSink {
    pub fn sent(&self) -> Vec<(String, Reply)> {
        self.sent.lock().unwrap().clone()
    }

    /// The single reply recorded so far, panicking when there are zero or
    /// several.
    pub fn only_reply(&self) -> (String, Reply) {
        let sent = self.sent();
        assert_eq!(sent.len(), 1, "expected exactly one reply, got {sent:?}");
        sent.into_iter().next().unwrap()
    }

    /// Body of the single recorded text reply.
    pub fn only_text(&self) -> String {
        match self.only_reply() {
            (_, Reply::Text { body }) => body,
            (_, other) => panic!("expected a text reply, got {other:?}"),
        }
    }

    /// Title and description of the single recorded card reply.
    pub fn only_card(&self) -> (String, String) {
        match self.only_reply() {
            (_, Reply::Card { title, description }) => (title, description),
            (_, other) => panic!("expected a card reply, got {other:?}"),
        }
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

/// Driver double recording platform calls, with toggleable failures.
#[derive(Default)]
pub struct RecordingDriver {
    pub fail_connect: AtomicBool,
    pub fail_disconnect: AtomicBool,
    pub connects: AtomicUsize,
    pub disconnects: AtomicUsize,
    queued: Mutex<Vec<RelayMessage>>,
}

impl RecordingDriver {
    pub fn queued(&self) -> Vec<RelayMessage> {
        self.queued.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeakerDriver for RecordingDriver {
    fn is_accessible(&self, _guild_id: &str) -> bool {
        true
    }

    async fn connect(
        &self,
        _guild_id: &str,
        _text_channel_id: &str,
        _voice_channel_id: &str,
    ) -> Result<(), DriverError> {
        if self.fail_connect.load(Ordering::SeqCst) {
            return Err(DriverError::Platform("join refused".to_string()));
        }
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self, _guild_id: &str) -> Result<(), DriverError> {
        if self.fail_disconnect.load(Ordering::SeqCst) {
            return Err(DriverError::Platform("leave refused".to_string()));
        }
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn set_speaking_rate(&self, _guild_id: &str, _rate: f32) {}

    fn enqueue(&self, message: RelayMessage) {
        self.queued.lock().unwrap().push(message);
    }
}

/// A relay wired to recording doubles.
pub struct Harness {
    pub relay: Arc<Relay>,
    pub sink: Arc<RecordingSink>,
    pub drivers: Vec<Arc<RecordingDriver>>,
    pub dictionary: Arc<Dictionary>,
    pub pool: Arc<SpeakerPool>,
}

/// Builds a relay with `speaker_count` speakers, an ephemeral dictionary,
/// and the default `^` prefix.
pub fn harness(speaker_count: usize) -> Harness {
    let drivers: Vec<Arc<RecordingDriver>> = (0..speaker_count)
        .map(|_| Arc::new(RecordingDriver::default()))
        .collect();
    let speakers = drivers
        .iter()
        .enumerate()
        .map(|(idx, driver)| {
            let id = format!("speaker-{}", idx + 1);
            Arc::new(Speaker::new(
                id.clone(),
                id,
                driver.clone() as Arc<dyn SpeakerDriver>,
            ))
        })
        .collect();

    let dictionary = Arc::new(Dictionary::ephemeral());
    let pool = Arc::new(SpeakerPool::new(speakers));
    let sink = Arc::new(RecordingSink::default());
    let relay = Arc::new(Relay::new(
        dictionary.clone(),
        pool.clone(),
        sink.clone(),
        "^",
    ));

    Harness {
        relay,
        sink,
        drivers,
        dictionary,
        pool,
    }
}

/// A human-authored message from text channel `channel`, with the sender
/// currently in voice channel `voice` (when given).
pub fn user_message(channel: &str, content: &str, voice: Option<&str>) -> ChatMessage {
    ChatMessage {
        guild_id: "g1".to_string(),
        channel_id: channel.to_string(),
        content: content.to_string(),
        author: Author {
            id: "u1".to_string(),
            name: "mira".to_string(),
            is_bot: false,
            is_system: false,
        },
        voice_channel_id: voice.map(str::to_string),
    }
}

/// A presence update where `channel` retains only one bot member.
pub fn bots_only_update(channel: &str) -> VoicePresenceUpdate {
    VoicePresenceUpdate {
        guild_id: "g1".to_string(),
        user_id: "u1".to_string(),
        old_channel: Some(ChannelOccupancy {
            channel_id: channel.to_string(),
            members: vec![Occupant {
                user_id: "bot1".to_string(),
                is_bot: true,
            }],
        }),
        new_channel_id: None,
    }
}
