//! Repository for the `pests` reference table.

use arbor_core::pest::DEFAULT_PEST_CATEGORY;
use sqlx::{PgConnection, PgExecutor};

use crate::models::pest::Pest;

const COLUMNS: &str = "id, name, category, created_at";

pub struct PestRepo;

impl PestRepo {
    pub async fn find_by_name<'e>(
        executor: impl PgExecutor<'e>,
        name: &str,
    ) -> Result<Option<Pest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pests WHERE name = $1");
        sqlx::query_as::<_, Pest>(&query)
            .bind(name)
            .fetch_optional(executor)
            .await
    }

    /// Resolve each canonical name to a pest row, creating missing ones with
    /// the generic category.
    ///
    /// Uses `ON CONFLICT` so a concurrent sync creating the same pest does not
    /// fail the batch. Existing rows keep their category.
    pub async fn find_or_create_by_names(
        conn: &mut PgConnection,
        names: &[String],
    ) -> Result<Vec<Pest>, sqlx::Error> {
        let query = format!(
            "INSERT INTO pests (name, category) VALUES ($1, $2)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING {COLUMNS}"
        );
        let mut pests = Vec::with_capacity(names.len());
        for name in names {
            let pest = sqlx::query_as::<_, Pest>(&query)
                .bind(name)
                .bind(DEFAULT_PEST_CATEGORY)
                .fetch_one(&mut *conn)
                .await?;
            pests.push(pest);
        }
        Ok(pests)
    }
}
