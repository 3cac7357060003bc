//! Repository for the `management_actions` table.

use arbor_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::management_action::{CreateManagementAction, ManagementAction};

const COLUMNS: &str = "id, inspection_id, needs_management, action_type, subtypes, \
    justification, valid_from, valid_to";

pub struct ManagementActionRepo;

impl ManagementActionRepo {
    /// Insert a current record (`valid_to` left open).
    pub async fn insert_current<'e>(
        executor: impl PgExecutor<'e>,
        inspection_id: DbId,
        input: &CreateManagementAction,
        valid_from: Timestamp,
    ) -> Result<ManagementAction, sqlx::Error> {
        let query = format!(
            "INSERT INTO management_actions
                (inspection_id, needs_management, action_type, subtypes, justification, valid_from)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ManagementAction>(&query)
            .bind(inspection_id)
            .bind(input.needs_management)
            .bind(&input.action_type)
            .bind(&input.subtypes)
            .bind(&input.justification)
            .bind(valid_from)
            .fetch_one(executor)
            .await
    }

    pub async fn find_current<'e>(
        executor: impl PgExecutor<'e>,
        inspection_id: DbId,
    ) -> Result<Option<ManagementAction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM management_actions
             WHERE inspection_id = $1 AND valid_to IS NULL
             ORDER BY valid_from DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, ManagementAction>(&query)
            .bind(inspection_id)
            .fetch_optional(executor)
            .await
    }

    pub async fn delete_for_inspection<'e>(
        executor: impl PgExecutor<'e>,
        inspection_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM management_actions WHERE inspection_id = $1")
            .bind(inspection_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
