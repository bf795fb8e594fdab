//! Per-command handlers.
//!
//! Every command produces exactly one [`Reply`]; pool and dictionary errors
//! are converted to user-visible text here and never propagate past the
//! dispatch boundary. Error replies lead with `error:` so they read the
//! same regardless of which layer produced them.

use herald_pool::BindRequest;
use herald_types::{ChatMessage, Reply};

use crate::command::Command;
use crate::Relay;

/// Formats any layer's error as a reply body.
fn error_reply(err: impl std::fmt::Display) -> Reply {
    Reply::text(format!("error: {err}"))
}

impl Relay {
    /// Runs one parsed command against the invoking message's channel and
    /// guild.
    pub(crate) async fn dispatch(&self, msg: &ChatMessage, command: Command) -> Reply {
        match command {
            Command::Connect => self.connect(msg).await,
            Command::Disconnect => self.disconnect(msg).await,
            Command::DictAdd { word, reading } => self.dict_add(&word, &reading).await,
            Command::DictRemove { word } => self.dict_remove(&word).await,
            Command::DictList { page } => self.dict_list(page).await,
            Command::Status => self.status(msg).await,
            Command::SetSpeed { rate } => self.set_speed(msg, rate).await,
            Command::Help => self.help(),
        }
    }

    /// `con`: bind the invoking text channel and the sender's current voice
    /// channel to the first available speaker.
    async fn connect(&self, msg: &ChatMessage) -> Reply {
        let Some(voice_channel_id) = msg.voice_channel_id.clone() else {
            return Reply::text("error: join a voice channel first");
        };
        let request = BindRequest {
            guild_id: msg.guild_id.clone(),
            text_channel_id: msg.channel_id.clone(),
            voice_channel_id,
        };
        match self.pool.connect(&request).await {
            Ok(_) => Reply::text("now reading this channel aloud"),
            Err(err) => error_reply(err),
        }
    }

    /// `dc`: tear down the session bound to the invoking text channel.
    async fn disconnect(&self, msg: &ChatMessage) -> Reply {
        match self.pool.disconnect(&msg.channel_id).await {
            Ok(_) => Reply::text("disconnected"),
            Err(err) => error_reply(err),
        }
    }

    async fn dict_add(&self, word: &str, reading: &str) -> Reply {
        match self.dictionary.define(word, reading).await {
            Ok(()) => Reply::text(format!("from now on, {word} reads as {reading}")),
            Err(err) => error_reply(err),
        }
    }

    async fn dict_remove(&self, word: &str) -> Reply {
        match self.dictionary.remove(word).await {
            Ok(true) => Reply::text(format!("removed {word} from the dictionary")),
            Ok(false) => Reply::text("error: no such word in the dictionary"),
            Err(err) => error_reply(err),
        }
    }

    async fn dict_list(&self, page: usize) -> Reply {
        match self.dictionary.page(page).await {
            Ok(listing) => {
                let description = listing
                    .entries
                    .iter()
                    .map(|(index, entry)| format!("{index}: {} => {}", entry.word, entry.reading))
                    .collect::<Vec<_>>()
                    .join("\n");
                Reply::card(format!("Dictionary, page {}", listing.page), description)
            }
            Err(err) => error_reply(err),
        }
    }

    /// `status`: one line per speaker accessible in this guild.
    async fn status(&self, msg: &ChatMessage) -> Reply {
        let lines = self.pool.availability(&msg.guild_id).await;
        if lines.is_empty() {
            return Reply::text("error: no speakers are usable in this guild");
        }
        let description = lines
            .iter()
            .map(|speaker| {
                let state = if speaker.available { "available" } else { "busy" };
                format!("{} -> {}", speaker.name, state)
            })
            .collect::<Vec<_>>()
            .join("\n");
        Reply::card("Speaker status", description)
    }

    async fn set_speed(&self, msg: &ChatMessage, rate: f32) -> Reply {
        match self.pool.set_speaking_rate(&msg.channel_id, rate).await {
            Ok(()) => Reply::text(format!("speaking rate set to {rate}")),
            Err(err) => error_reply(err),
        }
    }

    fn help(&self) -> Reply {
        let p = &self.prefix;
        Reply::card(
            "Help",
            format!(
                "Commands:\n\
                 - {p}con : start reading this channel aloud\n\
                 - {p}dc : stop and leave the voice channel\n\
                 - {p}status : list speakers and their availability\n\
                 - {p}dict add <word> <reading> : add a pronunciation\n\
                 - {p}dict remove <word> : remove a pronunciation\n\
                 - {p}dict list [page] : list pronunciations, 20 per page\n\
                 - {p}setting speed <value> : change the speaking rate\n\
                 - {p}help : show this help"
            ),
        )
    }
}
