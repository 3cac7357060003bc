//! Repository for the `species` catalog.

use arbor_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::species::Species;

const COLUMNS: &str = "id, common_name, scientific_name, created_at, updated_at";

pub struct SpeciesRepo;

impl SpeciesRepo {
    /// Insert a catalog row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        common_name: &str,
        scientific_name: Option<&str>,
    ) -> Result<Species, sqlx::Error> {
        let query = format!(
            "INSERT INTO species (common_name, scientific_name) VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Species>(&query)
            .bind(common_name)
            .bind(scientific_name)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Species>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM species WHERE id = $1");
        sqlx::query_as::<_, Species>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Return the subset of `ids` present in the catalog, in one round-trip.
    pub async fn existing_ids<'e>(
        executor: impl PgExecutor<'e>,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_scalar::<_, DbId>("SELECT id FROM species WHERE id = ANY($1) ORDER BY id")
            .bind(ids)
            .fetch_all(executor)
            .await
    }
}
