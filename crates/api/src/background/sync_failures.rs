//! Durable log of failed sync batches.
//!
//! Handlers hold a [`SyncFailureReporter`] and hand it one
//! [`SyncFailureEvent`] per rolled-back batch. The recorder task drains the
//! channel, writes each event to `sync_failures` and emits an error event.
//! Reporting never blocks and never fails the request: when the channel is
//! full or closed the event is dropped with a warning.

use arbor_core::types::{DbId, Timestamp};
use arbor_db::models::sync_failure::CreateSyncFailure;
use arbor_db::repositories::SyncFailureRepo;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_util::sync::CancellationToken;

/// Pending failures held in memory before new ones are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// One rolled-back batch.
#[derive(Debug, Clone)]
pub struct SyncFailureEvent {
    pub inspector_id: Option<DbId>,
    pub batch_size: usize,
    pub error: String,
    pub context: serde_json::Value,
    pub occurred_at: Timestamp,
}

impl SyncFailureEvent {
    pub fn new(inspector_id: Option<DbId>, batch_size: usize, error: impl Into<String>) -> Self {
        Self {
            inspector_id,
            batch_size,
            error: error.into(),
            context: serde_json::Value::Null,
            occurred_at: Utc::now(),
        }
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = context;
        self
    }

    fn into_record(self) -> CreateSyncFailure {
        CreateSyncFailure {
            inspector_id: self.inspector_id,
            batch_size: i32::try_from(self.batch_size).unwrap_or(i32::MAX),
            error: self.error,
            context: self.context,
            occurred_at: self.occurred_at,
        }
    }
}

/// Cloneable sending half of the failure log.
#[derive(Debug, Clone)]
pub struct SyncFailureReporter {
    tx: mpsc::Sender<SyncFailureEvent>,
}

impl SyncFailureReporter {
    /// Create a reporter and the receiver to pass to [`run`].
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<SyncFailureEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    pub fn report(&self, event: SyncFailureEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::warn!(error = %event.error, "Sync failure log full, dropping event");
            }
            Err(TrySendError::Closed(event)) => {
                tracing::warn!(error = %event.error, "Sync failure log closed, dropping event");
            }
        }
    }
}

/// Record failures until `cancel` fires or every reporter is dropped.
///
/// Events already queued at cancellation are still written.
pub async fn run(pool: PgPool, mut rx: mpsc::Receiver<SyncFailureEvent>, cancel: CancellationToken) {
    tracing::info!("Sync failure recorder started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                rx.close();
                while let Some(event) = rx.recv().await {
                    record(&pool, event).await;
                }
                tracing::info!("Sync failure recorder stopping");
                break;
            }
            event = rx.recv() => match event {
                Some(event) => record(&pool, event).await,
                None => {
                    tracing::info!("Sync failure recorder: all reporters dropped");
                    break;
                }
            },
        }
    }
}

async fn record(pool: &PgPool, event: SyncFailureEvent) {
    tracing::error!(
        inspector_id = ?event.inspector_id,
        batch_size = event.batch_size,
        error = %event.error,
        "Sync batch failed",
    );

    if let Err(e) = SyncFailureRepo::create(pool, &event.into_record()).await {
        tracing::warn!(error = %e, "Sync failure recorder: could not persist event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn report_drops_when_full() {
        let (reporter, mut rx) = SyncFailureReporter::channel(1);
        reporter.report(SyncFailureEvent::new(None, 1, "first"));
        reporter.report(SyncFailureEvent::new(None, 1, "second"));

        assert_eq!(rx.recv().await.map(|e| e.error).as_deref(), Some("first"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn report_after_close_does_not_panic() {
        let (reporter, rx) = SyncFailureReporter::channel(1);
        drop(rx);
        reporter.report(SyncFailureEvent::new(Some(3), 2, "lost"));
    }

    #[test]
    fn oversized_batch_count_saturates() {
        let record = SyncFailureEvent::new(None, usize::MAX, "x").into_record();
        assert_eq!(record.batch_size, i32::MAX);
    }
}
