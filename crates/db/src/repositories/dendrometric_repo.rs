//! Repository for the `dendrometrics` table.

use arbor_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::dendrometric::{CreateDendrometric, Dendrometric};

const COLUMNS: &str = "id, inspection_id, dbh_cm, total_height_m, crown_height_m, \
    crown_diameter_m, valid_from, valid_to";

pub struct DendrometricRepo;

impl DendrometricRepo {
    /// Insert a current record (`valid_to` left open).
    pub async fn insert_current<'e>(
        executor: impl PgExecutor<'e>,
        inspection_id: DbId,
        input: &CreateDendrometric,
        valid_from: Timestamp,
    ) -> Result<Dendrometric, sqlx::Error> {
        let query = format!(
            "INSERT INTO dendrometrics
                (inspection_id, dbh_cm, total_height_m, crown_height_m, crown_diameter_m, valid_from)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dendrometric>(&query)
            .bind(inspection_id)
            .bind(input.dbh_cm)
            .bind(input.total_height_m)
            .bind(input.crown_height_m)
            .bind(input.crown_diameter_m)
            .bind(valid_from)
            .fetch_one(executor)
            .await
    }

    pub async fn find_current<'e>(
        executor: impl PgExecutor<'e>,
        inspection_id: DbId,
    ) -> Result<Option<Dendrometric>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dendrometrics
             WHERE inspection_id = $1 AND valid_to IS NULL
             ORDER BY valid_from DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Dendrometric>(&query)
            .bind(inspection_id)
            .fetch_optional(executor)
            .await
    }

    /// Remove every record of an inspection. Returns the number of rows deleted.
    pub async fn delete_for_inspection<'e>(
        executor: impl PgExecutor<'e>,
        inspection_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dendrometrics WHERE inspection_id = $1")
            .bind(inspection_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
