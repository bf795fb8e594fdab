use thiserror::Error;

/// Errors that can occur during dictionary operations.
#[derive(Debug, Error)]
pub enum DictError {
    /// The page argument was zero; pages are numbered from 1.
    #[error("page must be a positive integer")]
    InvalidPage,
    /// The requested page starts beyond the last entry.
    #[error("page {page} is out of range: max page is {max_page} ({total} entries)")]
    PageOutOfRange {
        page: usize,
        max_page: usize,
        total: usize,
    },
    /// The persistence backend failed; in-memory state is left unchanged.
    #[error("dictionary store error: {0}")]
    Store(#[from] rusqlite::Error),
}
