//! The restricted command grammar.
//!
//! Commands are whitespace-split tokens from messages carrying the
//! configured prefix. The parser only validates shape (arity, integer and
//! float syntax); semantic checks such as rate bounds or page ranges belong
//! to the pool and the dictionary. Trailing tokens beyond a command's arity
//! are ignored.

use thiserror::Error;

/// A successfully parsed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Bind the invoking text channel and the sender's voice channel to a
    /// speaker.
    Connect,
    /// Tear down the session bound to the invoking text channel.
    Disconnect,
    /// Upsert a pronunciation.
    DictAdd { word: String, reading: String },
    /// Remove a pronunciation.
    DictRemove { word: String },
    /// Show one page of the dictionary.
    DictList { page: usize },
    /// List speakers and their availability.
    Status,
    /// Change the live session's speaking rate.
    SetSpeed { rate: f32 },
    /// Show the command surface.
    Help,
}

/// Shape errors the parser reports. Messages are user-visible as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Required arguments are missing.
    #[error("malformed command syntax")]
    Malformed,
    /// `dict` or `setting` with a subcommand the grammar does not know.
    #[error("invalid subcommand; see help")]
    UnknownSubcommand,
    /// `dict list` with a page argument that is not a positive integer.
    #[error("page must be a positive integer")]
    InvalidPage,
    /// `setting speed` with a value that does not parse as a number.
    #[error("speaking rate must be a number (at least 0.25, below 4.0)")]
    InvalidRate,
}

/// What the parser made of a prefixed message.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Command(Command),
    /// A recognized command with a bad shape; the error is replied to the
    /// channel.
    Invalid(ParseError),
    /// An unrecognized top-level word. Stays silent, matching the original
    /// relay's behavior.
    Unknown,
}

/// Parses `content` against `prefix`.
///
/// Returns `None` for messages without the prefix; those take the passive
/// relay path instead.
pub fn parse(content: &str, prefix: &str) -> Option<Parsed> {
    let rest = content.strip_prefix(prefix)?;
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let Some(&head) = tokens.first() else {
        // A bare prefix names no command.
        return Some(Parsed::Unknown);
    };

    let parsed = match head {
        "con" => Parsed::Command(Command::Connect),
        "dc" => Parsed::Command(Command::Disconnect),
        "dict" => parse_dict(&tokens[1..]),
        "status" => Parsed::Command(Command::Status),
        "setting" => parse_setting(&tokens[1..]),
        "help" => Parsed::Command(Command::Help),
        _ => Parsed::Unknown,
    };
    Some(parsed)
}

fn parse_dict(rest: &[&str]) -> Parsed {
    match rest.first().copied() {
        None => Parsed::Invalid(ParseError::Malformed),
        Some("add") => match (rest.get(1), rest.get(2)) {
            (Some(word), Some(reading)) => Parsed::Command(Command::DictAdd {
                word: (*word).to_string(),
                reading: (*reading).to_string(),
            }),
            _ => Parsed::Invalid(ParseError::Malformed),
        },
        Some("remove") => match rest.get(1) {
            Some(word) => Parsed::Command(Command::DictRemove {
                word: (*word).to_string(),
            }),
            None => Parsed::Invalid(ParseError::Malformed),
        },
        Some("list") => match rest.get(1) {
            None => Parsed::Command(Command::DictList { page: 1 }),
            Some(raw) => match raw.parse::<usize>() {
                Ok(page) if page >= 1 => Parsed::Command(Command::DictList { page }),
                _ => Parsed::Invalid(ParseError::InvalidPage),
            },
        },
        Some(_) => Parsed::Invalid(ParseError::UnknownSubcommand),
    }
}

fn parse_setting(rest: &[&str]) -> Parsed {
    match rest.first().copied() {
        None => Parsed::Invalid(ParseError::Malformed),
        // A missing or non-numeric value both read as "not a number"; range
        // checks happen in the pool.
        Some("speed") => match rest.get(1).and_then(|raw| raw.parse::<f32>().ok()) {
            Some(rate) => Parsed::Command(Command::SetSpeed { rate }),
            None => Parsed::Invalid(ParseError::InvalidRate),
        },
        Some(_) => Parsed::Invalid(ParseError::UnknownSubcommand),
    }
}
