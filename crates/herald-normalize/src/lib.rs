//! Message-to-speech normalization pipeline.
//!
//! Converts raw chat text into something a speaker can read aloud. The
//! filters run in a fixed order, each over the output of the previous one:
//! code spans, spoilers, and URLs are deleted outright, custom emoji tokens
//! collapse to their bare name, and the pronunciation dictionary is applied
//! last. Every stage is total; the result may be empty, and callers must
//! drop empty output instead of forwarding an empty utterance.
//!
//! Mention markup (user/role/channel references) never reaches this crate:
//! gateway adapters resolve it to display text before handing messages in.

use herald_dict::Dictionary;
use once_cell::sync::Lazy;
use regex::Regex;

// Pre-compiled filter patterns. Span patterns use (?s) so a span can wrap
// across lines; unpaired delimiters are left alone.
static DOUBLE_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)``.*?``").unwrap());
static INLINE_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)`.*?`").unwrap());
static SPOILER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\|\|.*?\|\|").unwrap());
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:https?|ftp)://\S+").unwrap());
// <:name:id> for static emoji, <a:name:id> for animated; keep only the name.
static EMOJI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<a?:([A-Za-z0-9_\-]+):\d+>").unwrap());

/// Applies the deletion and collapse filters, in order:
///
/// 1. paired double-backtick spans, then paired single-backtick spans, then
///    any stray backticks (span content is deleted, not spoken)
/// 2. paired `||spoiler||` spans
/// 3. `http`/`https`/`ftp` URLs
/// 4. custom emoji tokens, collapsed to their bare name
///
/// The output is trimmed of surrounding whitespace and may be empty.
pub fn scrub(text: &str) -> String {
    let mut text = text.to_string();
    text = DOUBLE_CODE_RE.replace_all(&text, "").to_string();
    text = INLINE_CODE_RE.replace_all(&text, "").to_string();
    text = text.replace('`', "");
    text = SPOILER_RE.replace_all(&text, "").to_string();
    text = URL_RE.replace_all(&text, "").to_string();
    text = EMOJI_RE.replace_all(&text, "$1").to_string();
    text.trim().to_string()
}

/// Full pipeline: [`scrub`], then dictionary substitution, then a final
/// trim. Dictionary entries apply in insertion order over the scrubbed
/// text (see [`herald_dict::Lexicon::substitute`] for the re-matching
/// caveat).
pub async fn normalize(text: &str, dictionary: &Dictionary) -> String {
    let scrubbed = scrub(text);
    dictionary.substitute(&scrubbed).await.trim().to_string()
}
