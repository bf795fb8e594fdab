//! User pronunciation dictionary for the herald relay.
//!
//! Maps surface words to the readings a speaker should pronounce instead.
//! The in-memory [`Lexicon`] is the working copy; a [`DictStore`] persists
//! it write-through (load on start, save on every mutation). [`Dictionary`]
//! ties the two together behind a lock so command handlers and the relay
//! path can share it.

use std::sync::Arc;

use tokio::sync::RwLock;

mod error;
mod lexicon;
mod store;

pub use error::DictError;
pub use lexicon::{DictEntry, DictPage, Lexicon, PAGE_SIZE};
pub use store::{DictStore, MemoryStore, SqliteStore};

/// Shared pronunciation dictionary service.
///
/// Mutations hold the write lock across the store call, so memory is only
/// updated once the store has accepted the change and concurrent writers
/// apply in a consistent order (last write wins).
pub struct Dictionary {
    lexicon: RwLock<Lexicon>,
    store: Arc<dyn DictStore>,
}

impl Dictionary {
    /// Loads the persisted entries from `store` into memory.
    pub async fn load(store: Arc<dyn DictStore>) -> Result<Self, DictError> {
        let entries = store.load().await?;
        tracing::debug!(count = entries.len(), "dictionary loaded");
        Ok(Self {
            lexicon: RwLock::new(Lexicon::from_entries(entries)),
            store,
        })
    }

    /// An ephemeral dictionary with no persistence, for tests and dry runs.
    pub fn ephemeral() -> Self {
        Self {
            lexicon: RwLock::new(Lexicon::new()),
            store: Arc::new(MemoryStore),
        }
    }

    /// Upserts a reading for `word`. Redefinitions keep the word's
    /// insertion position.
    pub async fn define(&self, word: &str, reading: &str) -> Result<(), DictError> {
        let mut lexicon = self.lexicon.write().await;
        let entry = DictEntry {
            word: word.to_string(),
            reading: reading.to_string(),
        };
        self.store.upsert(&entry).await?;
        let created = lexicon.define(word, reading);
        tracing::debug!(word, reading, created, "dictionary entry defined");
        Ok(())
    }

    /// Removes `word`. Returns `true` when it was present.
    pub async fn remove(&self, word: &str) -> Result<bool, DictError> {
        let mut lexicon = self.lexicon.write().await;
        self.store.delete(word).await?;
        let removed = lexicon.remove(word);
        tracing::debug!(word, removed, "dictionary entry removed");
        Ok(removed)
    }

    /// Full snapshot in insertion order.
    pub async fn entries(&self) -> Vec<DictEntry> {
        self.lexicon.read().await.entries().to_vec()
    }

    pub async fn len(&self) -> usize {
        self.lexicon.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.lexicon.read().await.is_empty()
    }

    /// One listing window, see [`Lexicon::page`].
    pub async fn page(&self, page: usize) -> Result<DictPage, DictError> {
        self.lexicon.read().await.page(page)
    }

    /// Insertion-ordered literal substitution, see [`Lexicon::substitute`].
    pub async fn substitute(&self, text: &str) -> String {
        self.lexicon.read().await.substitute(text)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    #[tokio::test]
    async fn ephemeral_define_and_substitute() {
        let dict = Dictionary::ephemeral();
        dict.define("cat", "neko").await.unwrap();
        assert_eq!(dict.substitute("I have a cat").await, "I have a neko");
    }

    #[tokio::test]
    async fn remove_reports_presence() {
        let dict = Dictionary::ephemeral();
        dict.define("cat", "neko").await.unwrap();
        assert!(dict.remove("cat").await.unwrap());
        assert!(!dict.remove("cat").await.unwrap());
    }

    #[tokio::test]
    async fn load_restores_store_contents() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());

        let dict = Dictionary::load(store.clone()).await.unwrap();
        dict.define("b", "bee").await.unwrap();
        dict.define("a", "ay").await.unwrap();
        drop(dict);

        let reloaded = Dictionary::load(store).await.unwrap();
        let words: Vec<String> = reloaded
            .entries()
            .await
            .into_iter()
            .map(|e| e.word)
            .collect();
        assert_eq!(words, vec!["b".to_string(), "a".to_string()]);
    }

    struct FailingStore;

    #[async_trait]
    impl DictStore for FailingStore {
        async fn load(&self) -> Result<Vec<DictEntry>, DictError> {
            Ok(Vec::new())
        }

        async fn upsert(&self, _entry: &DictEntry) -> Result<(), DictError> {
            Err(DictError::Store(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
                Some("disk full".to_string()),
            )))
        }

        async fn delete(&self, _word: &str) -> Result<(), DictError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn store_failure_leaves_memory_unchanged() {
        let dict = Dictionary::load(Arc::new(FailingStore)).await.unwrap();
        assert!(dict.define("cat", "neko").await.is_err());
        assert!(dict.is_empty().await);
        assert_eq!(dict.substitute("cat").await, "cat");
    }
}
