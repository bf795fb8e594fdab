//! The in-memory pronunciation mapping.
//!
//! A [`Lexicon`] is an insertion-ordered list of word/reading pairs.
//! Ordering matters twice: listings page through entries in insertion
//! order, and [`Lexicon::substitute`] applies replacements in insertion
//! order, each over the output of the previous one.

use serde::{Deserialize, Serialize};

use crate::error::DictError;

/// Entries shown per listing page.
pub const PAGE_SIZE: usize = 20;

/// A single word/reading pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    /// Surface form matched literally in message text.
    pub word: String,
    /// Replacement text spoken in its place.
    pub reading: String,
}

/// One window of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictPage {
    /// The 1-based page number that was requested.
    pub page: usize,
    /// Highest page with a valid window start; never below 1.
    pub max_page: usize,
    /// Total entry count at the time of the query.
    pub total: usize,
    /// Entries in this window, each with its global zero-based index.
    pub entries: Vec<(usize, DictEntry)>,
}

/// Insertion-ordered word/reading mapping.
///
/// Words are unique; redefining a word replaces its reading in place and
/// keeps its original position. One lexicon serves every guild in the
/// process (documented limitation of the design).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexicon {
    entries: Vec<DictEntry>,
}

impl Lexicon {
    /// An empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a lexicon from already-ordered entries. The caller guarantees
    /// word uniqueness (the store schema enforces it).
    pub fn from_entries(entries: Vec<DictEntry>) -> Self {
        Self { entries }
    }

    /// Upserts a reading. Returns `true` when the word was new, `false`
    /// when an existing entry was updated in place.
    pub fn define(&mut self, word: &str, reading: &str) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.word == word) {
            entry.reading = reading.to_string();
            false
        } else {
            self.entries.push(DictEntry {
                word: word.to_string(),
                reading: reading.to_string(),
            });
            true
        }
    }

    /// Removes a word. Returns `true` when it was present; removing an
    /// absent word is not an error.
    pub fn remove(&mut self, word: &str) -> bool {
        match self.entries.iter().position(|e| e.word == word) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Full snapshot in insertion order.
    pub fn entries(&self) -> &[DictEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the window for a 1-based `page` of [`PAGE_SIZE`] entries.
    ///
    /// A window *start* equal to the entry count is still valid (it yields
    /// an empty page); only a start strictly beyond the count is rejected.
    pub fn page(&self, page: usize) -> Result<DictPage, DictError> {
        if page == 0 {
            return Err(DictError::InvalidPage);
        }
        let total = self.entries.len();
        let max_page = ((total + PAGE_SIZE - 1) / PAGE_SIZE).max(1);
        // The page number is user input; saturate rather than overflow.
        let start = (page - 1).saturating_mul(PAGE_SIZE);
        if start > total {
            return Err(DictError::PageOutOfRange {
                page,
                max_page,
                total,
            });
        }
        let entries = self
            .entries
            .iter()
            .enumerate()
            .skip(start)
            .take(PAGE_SIZE)
            .map(|(idx, entry)| (idx, entry.clone()))
            .collect();
        Ok(DictPage {
            page,
            max_page,
            total,
            entries,
        })
    }

    /// Applies every entry, in insertion order, as a literal find/replace.
    ///
    /// Each replacement operates on the output of the previous one, so a
    /// reading produced by an earlier entry can itself be matched by a
    /// later entry. That carry-over is intentional and kept.
    pub fn substitute(&self, text: &str) -> String {
        let mut out = text.to_string();
        for entry in &self.entries {
            // An empty surface form would match at every position.
            if entry.word.is_empty() {
                continue;
            }
            out = out.replace(&entry.word, &entry.reading);
        }
        out
    }
}
