//! Repository for the `photos` table.

use arbor_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use crate::models::photo::{CreatePhoto, Photo};

const COLUMNS: &str = "id, inspection_id, uri, category, is_cover, created_at";

pub struct PhotoRepo;

impl PhotoRepo {
    /// Insert a photo set in submission order.
    pub async fn insert_many(
        conn: &mut PgConnection,
        inspection_id: DbId,
        photos: &[CreatePhoto],
    ) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!(
            "INSERT INTO photos (inspection_id, uri, category, is_cover)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let mut inserted = Vec::with_capacity(photos.len());
        for photo in photos {
            let row = sqlx::query_as::<_, Photo>(&query)
                .bind(inspection_id)
                .bind(&photo.uri)
                .bind(&photo.category)
                .bind(photo.is_cover)
                .fetch_one(&mut *conn)
                .await?;
            inserted.push(row);
        }
        Ok(inserted)
    }

    pub async fn list_by_inspection<'e>(
        executor: impl PgExecutor<'e>,
        inspection_id: DbId,
    ) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE inspection_id = $1 ORDER BY id");
        sqlx::query_as::<_, Photo>(&query)
            .bind(inspection_id)
            .fetch_all(executor)
            .await
    }

    pub async fn delete_for_inspection<'e>(
        executor: impl PgExecutor<'e>,
        inspection_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM photos WHERE inspection_id = $1")
            .bind(inspection_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
