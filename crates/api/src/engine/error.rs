use std::time::Duration;

/// Why a sync batch was rolled back.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Outside any item: prefetch, `BEGIN` or `COMMIT`.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("transaction did not start within {0:?}")]
    TransactionStartTimeout(Duration),

    #[error("transaction exceeded {0:?}")]
    ExecutionTimeout(Duration),

    /// A statement failed while writing the item at `index` (zero-based).
    #[error("item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: sqlx::Error,
    },
}

impl SyncError {
    /// Zero-based position of the failing item, when one is to blame.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            SyncError::Item { index, .. } => Some(*index),
            _ => None,
        }
    }
}
