//! Session lifecycle: connect, disconnect, rate changes, auto-teardown.
//!
//! Every mutation runs inside the pool-wide operations lock, held across
//! the platform call, so the global exclusivity checks and the slot write
//! are atomic with respect to concurrent lifecycle requests: a second
//! connect for the same channel cannot interleave between check and
//! mutation. Read queries and the relay path never take this lock.

use herald_types::VoicePresenceUpdate;
use tracing::{info, warn};

use crate::driver::DriverError;
use crate::error::PoolError;
use crate::registry::{Speaker, SpeakerPool};
use crate::session::Session;

/// Lowest accepted speaking rate (inclusive).
pub const MIN_SPEECH_RATE: f32 = 0.25;
/// Upper speaking rate bound (exclusive).
pub const MAX_SPEECH_RATE: f32 = 4.0;

/// A connect request: the invoking text channel and the sender's current
/// voice channel.
#[derive(Debug, Clone)]
pub struct BindRequest {
    pub guild_id: String,
    pub text_channel_id: String,
    pub voice_channel_id: String,
}

/// Outcome of an auto-teardown attempt.
#[derive(Debug)]
pub struct Teardown {
    /// The session that was destroyed, or that survived a failed attempt.
    pub session: Session,
    /// Speaker that owns it.
    pub speaker_id: String,
    /// Present when the platform disconnect failed; the session stays live
    /// in that case.
    pub error: Option<DriverError>,
}

/// Platform disconnect followed by the slot clear. The slot survives a
/// driver failure so the registry keeps matching the platform state.
async fn release(speaker: &Speaker) -> Result<Option<Session>, DriverError> {
    let session = match speaker.session().await {
        Some(session) => session,
        None => return Ok(None),
    };
    speaker.driver.disconnect(&session.guild_id).await?;
    *speaker.slot.write().await = None;
    Ok(Some(session))
}

impl SpeakerPool {
    /// Binds a speaker to the request's channels and returns the created
    /// session.
    ///
    /// Selection order: reject when any speaker already tracks the text
    /// channel, then when any tracks the voice channel, then take the
    /// first connectable speaker in configuration order. The platform
    /// connect happens before the slot write, so a connect failure leaves
    /// the registry untouched.
    pub async fn connect(&self, request: &BindRequest) -> Result<Session, PoolError> {
        let _guard = self.ops.lock().await;

        if self.find_tracking(&request.text_channel_id).await.is_some() {
            return Err(PoolError::TextChannelBound(
                request.text_channel_id.clone(),
            ));
        }
        if self.find_tracking(&request.voice_channel_id).await.is_some() {
            return Err(PoolError::VoiceChannelBound(
                request.voice_channel_id.clone(),
            ));
        }
        let speaker = self
            .first_connectable(&request.guild_id)
            .await
            .ok_or(PoolError::NoSpeakerAvailable)?;

        speaker
            .driver
            .connect(
                &request.guild_id,
                &request.text_channel_id,
                &request.voice_channel_id,
            )
            .await
            .map_err(PoolError::ConnectFailed)?;

        let session = Session::new(
            &request.guild_id,
            &request.text_channel_id,
            &request.voice_channel_id,
        );
        *speaker.slot.write().await = Some(session.clone());
        info!(
            speaker = speaker.id(),
            guild_id = %request.guild_id,
            text_channel_id = %request.text_channel_id,
            voice_channel_id = %request.voice_channel_id,
            "session connected"
        );
        Ok(session)
    }

    /// Tears down the session that involves `channel_id` and returns it.
    ///
    /// A driver failure keeps the session live: the speaker is still in
    /// that voice channel as far as the platform is concerned.
    pub async fn disconnect(&self, channel_id: &str) -> Result<Session, PoolError> {
        let _guard = self.ops.lock().await;
        let speaker = self
            .find_tracking(channel_id)
            .await
            .ok_or_else(|| PoolError::NotTracked(channel_id.to_string()))?;
        match release(&speaker).await {
            Ok(Some(session)) => {
                info!(
                    speaker = speaker.id(),
                    guild_id = %session.guild_id,
                    "session disconnected"
                );
                Ok(session)
            }
            Ok(None) => Err(PoolError::NotTracked(channel_id.to_string())),
            Err(err) => Err(PoolError::DisconnectFailed(err)),
        }
    }

    /// Updates the live session's speaking rate and forwards it to the
    /// driver.
    ///
    /// The rate must be finite, at least [`MIN_SPEECH_RATE`], and strictly
    /// below [`MAX_SPEECH_RATE`].
    pub async fn set_speaking_rate(&self, channel_id: &str, rate: f32) -> Result<(), PoolError> {
        if !rate.is_finite() || rate < MIN_SPEECH_RATE || rate >= MAX_SPEECH_RATE {
            return Err(PoolError::InvalidRate(rate));
        }
        let _guard = self.ops.lock().await;
        let speaker = self
            .find_tracking(channel_id)
            .await
            .ok_or_else(|| PoolError::NotTracked(channel_id.to_string()))?;
        let guild_id = {
            let mut slot = speaker.slot.write().await;
            match slot.as_mut() {
                Some(session) => {
                    session.speech_rate = rate;
                    session.guild_id.clone()
                }
                None => return Err(PoolError::NotTracked(channel_id.to_string())),
            }
        };
        speaker.driver.set_speaking_rate(&guild_id, rate);
        info!(speaker = speaker.id(), rate, "speaking rate updated");
        Ok(())
    }

    /// Reacts to a voice-presence change.
    ///
    /// When the channel a user left is tracked and its remaining members
    /// are all bots, without being fully empty, the owning session is torn
    /// down. A fully empty channel is the speaker's own departure arriving
    /// as an event; nothing to do then. Movement that touches no tracked
    /// channel is ignored.
    pub async fn handle_presence(&self, update: &VoicePresenceUpdate) -> Option<Teardown> {
        let old = update.old_channel.as_ref()?;
        if old.is_empty() || old.human_count() > 0 {
            return None;
        }

        let _guard = self.ops.lock().await;
        let speaker = self.find_tracking(&old.channel_id).await?;
        match release(&speaker).await {
            Ok(Some(session)) => {
                info!(
                    speaker = speaker.id(),
                    voice_channel_id = %old.channel_id,
                    user_id = %update.user_id,
                    "auto-teardown: last human left"
                );
                Some(Teardown {
                    session,
                    speaker_id: speaker.id().to_string(),
                    error: None,
                })
            }
            Ok(None) => None,
            Err(err) => {
                warn!(
                    speaker = speaker.id(),
                    voice_channel_id = %old.channel_id,
                    error = %err,
                    "auto-teardown disconnect failed"
                );
                let session = speaker.session().await?;
                Some(Teardown {
                    session,
                    speaker_id: speaker.id().to_string(),
                    error: Some(err),
                })
            }
        }
    }
}
