//! Repository for the `sync_failures` log.

use sqlx::PgExecutor;

use crate::models::sync_failure::{CreateSyncFailure, SyncFailure};

const COLUMNS: &str = "id, inspector_id, batch_size, error, context, occurred_at, created_at";

pub struct SyncFailureRepo;

impl SyncFailureRepo {
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateSyncFailure,
    ) -> Result<SyncFailure, sqlx::Error> {
        let query = format!(
            "INSERT INTO sync_failures (inspector_id, batch_size, error, context, occurred_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SyncFailure>(&query)
            .bind(input.inspector_id)
            .bind(input.batch_size)
            .bind(&input.error)
            .bind(&input.context)
            .bind(input.occurred_at)
            .fetch_one(executor)
            .await
    }

    /// Most recent failures first.
    pub async fn list_recent<'e>(
        executor: impl PgExecutor<'e>,
        limit: i64,
    ) -> Result<Vec<SyncFailure>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sync_failures ORDER BY occurred_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, SyncFailure>(&query)
            .bind(limit)
            .fetch_all(executor)
            .await
    }
}
