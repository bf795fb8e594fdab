//! Speaker registry: per-speaker binding state and pool-wide queries.
//!
//! The pool is the single authority for which channels are bound to which
//! speaker. Every query here reads the speaker slots; drivers are only
//! consulted for guild accessibility. Mutations live in the lifecycle
//! module and serialize behind the pool's operations lock.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use crate::driver::SpeakerDriver;
use crate::session::Session;

/// One pool member: a stable identity, its platform driver, and a slot
/// holding at most one live session.
pub struct Speaker {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) driver: Arc<dyn SpeakerDriver>,
    pub(crate) slot: RwLock<Option<Session>>,
}

impl Speaker {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        driver: Arc<dyn SpeakerDriver>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            driver,
            slot: RwLock::new(None),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when the live session involves `channel_id` as either its text
    /// or its voice side.
    pub async fn is_tracked(&self, channel_id: &str) -> bool {
        self.slot
            .read()
            .await
            .as_ref()
            .map_or(false, |session| session.involves(channel_id))
    }

    /// True when the speaker is idle and its driver can reach the guild.
    /// Capacity is one session per speaker, regardless of guild.
    pub async fn is_connectable(&self, guild_id: &str) -> bool {
        self.slot.read().await.is_none() && self.driver.is_accessible(guild_id)
    }

    /// Platform-level visibility in the guild; broader than connectable and
    /// used for status reporting.
    pub fn is_accessible(&self, guild_id: &str) -> bool {
        self.driver.is_accessible(guild_id)
    }

    /// The bound voice channel when `text_channel_id` is the live session's
    /// text side.
    pub async fn voice_channel_for(&self, text_channel_id: &str) -> Option<String> {
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|session| session.text_channel_id == text_channel_id)
            .map(|session| session.voice_channel_id.clone())
    }

    /// Clone of the live session, if any.
    pub async fn session(&self) -> Option<Session> {
        self.slot.read().await.clone()
    }

    /// Hands an utterance to the driver's playback queue.
    pub fn enqueue(&self, message: herald_types::RelayMessage) {
        self.driver.enqueue(message);
    }
}

/// Availability of one speaker in a guild, for status reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerAvailability {
    pub id: String,
    pub name: String,
    /// True when idle, false when busy with a session.
    pub available: bool,
}

/// One speaker's entry in a pool snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SpeakerSnapshot {
    pub id: String,
    pub name: String,
    pub session: Option<Session>,
}

/// Point-in-time view of the whole pool, for the operational surface.
#[derive(Debug, Clone, Serialize)]
pub struct PoolSnapshot {
    pub speakers: Vec<SpeakerSnapshot>,
}

/// The fixed pool of speakers plus the lifecycle lock.
///
/// Iteration order is configuration order, which makes selection
/// deterministic (first fit wins).
pub struct SpeakerPool {
    pub(crate) speakers: Vec<Arc<Speaker>>,
    /// Serializes lifecycle check-then-act sequences; see the lifecycle
    /// module.
    pub(crate) ops: Mutex<()>,
}

impl SpeakerPool {
    pub fn new(speakers: Vec<Arc<Speaker>>) -> Self {
        Self {
            speakers,
            ops: Mutex::new(()),
        }
    }

    pub fn speakers(&self) -> &[Arc<Speaker>] {
        &self.speakers
    }

    pub fn len(&self) -> usize {
        self.speakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }

    /// The speaker whose live session involves `channel_id`, if any. The
    /// exclusivity invariant guarantees at most one match.
    pub async fn find_tracking(&self, channel_id: &str) -> Option<Arc<Speaker>> {
        for speaker in &self.speakers {
            if speaker.is_tracked(channel_id).await {
                return Some(speaker.clone());
            }
        }
        None
    }

    /// First idle speaker able to reach the guild, in configuration order.
    pub async fn first_connectable(&self, guild_id: &str) -> Option<Arc<Speaker>> {
        for speaker in &self.speakers {
            if speaker.is_connectable(guild_id).await {
                return Some(speaker.clone());
            }
        }
        None
    }

    /// Speakers accessible in the guild, labeled available or busy.
    pub async fn availability(&self, guild_id: &str) -> Vec<SpeakerAvailability> {
        let mut lines = Vec::new();
        for speaker in &self.speakers {
            if !speaker.is_accessible(guild_id) {
                continue;
            }
            lines.push(SpeakerAvailability {
                id: speaker.id.clone(),
                name: speaker.name.clone(),
                available: speaker.session().await.is_none(),
            });
        }
        lines
    }

    /// Point-in-time view of every speaker and its session.
    pub async fn snapshot(&self) -> PoolSnapshot {
        let mut speakers = Vec::with_capacity(self.speakers.len());
        for speaker in &self.speakers {
            speakers.push(SpeakerSnapshot {
                id: speaker.id.clone(),
                name: speaker.name.clone(),
                session: speaker.session().await,
            });
        }
        PoolSnapshot { speakers }
    }
}
