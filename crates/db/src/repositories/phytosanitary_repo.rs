//! Repository for `phytosanitary_records` and their pest links.

use arbor_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgExecutor};

use crate::models::phytosanitary::{CreatePhytosanitary, Phytosanitary};

const COLUMNS: &str = "id, inspection_id, health_status, severity, probability, \
    consequence, valid_from, valid_to";

pub struct PhytosanitaryRepo;

impl PhytosanitaryRepo {
    /// Insert a current record and link its pests.
    pub async fn insert_current(
        conn: &mut PgConnection,
        inspection_id: DbId,
        input: &CreatePhytosanitary,
        valid_from: Timestamp,
    ) -> Result<Phytosanitary, sqlx::Error> {
        let query = format!(
            "INSERT INTO phytosanitary_records
                (inspection_id, health_status, severity, probability, consequence, valid_from)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let record = sqlx::query_as::<_, Phytosanitary>(&query)
            .bind(inspection_id)
            .bind(&input.health_status)
            .bind(input.severity)
            .bind(input.probability)
            .bind(input.consequence)
            .bind(valid_from)
            .fetch_one(&mut *conn)
            .await?;

        if !input.pest_ids.is_empty() {
            sqlx::query(
                "INSERT INTO phytosanitary_pests (phytosanitary_id, pest_id)
                 SELECT $1, UNNEST($2::BIGINT[])
                 ON CONFLICT DO NOTHING",
            )
            .bind(record.id)
            .bind(&input.pest_ids)
            .execute(&mut *conn)
            .await?;
        }

        Ok(record)
    }

    pub async fn find_current<'e>(
        executor: impl PgExecutor<'e>,
        inspection_id: DbId,
    ) -> Result<Option<Phytosanitary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM phytosanitary_records
             WHERE inspection_id = $1 AND valid_to IS NULL
             ORDER BY valid_from DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Phytosanitary>(&query)
            .bind(inspection_id)
            .fetch_optional(executor)
            .await
    }

    /// Names of the pests linked to a record, alphabetically.
    pub async fn pest_names<'e>(
        executor: impl PgExecutor<'e>,
        phytosanitary_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT p.name FROM pests p
             JOIN phytosanitary_pests pp ON pp.pest_id = p.id
             WHERE pp.phytosanitary_id = $1
             ORDER BY p.name",
        )
        .bind(phytosanitary_id)
        .fetch_all(executor)
        .await
    }

    /// Remove every record of an inspection; pest links cascade.
    pub async fn delete_for_inspection<'e>(
        executor: impl PgExecutor<'e>,
        inspection_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM phytosanitary_records WHERE inspection_id = $1")
            .bind(inspection_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
