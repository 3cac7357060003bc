//! Repository for the canonical `trees` table.
//!
//! Trees are never deleted here. The `uuid` column is write-once: creation
//! sets it, and [`TreeRepo::update_merged`] only fills it on legacy rows that
//! have none.

use arbor_core::tree_status::TreeStatus;
use arbor_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::tree::{CreateTree, Tree, UpdateTree};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, uuid, tag, species_id, display_name, cover_photo, \
    street, number, neighborhood, longitude, latitude, status, created_at, updated_at";

pub struct TreeRepo;

impl TreeRepo {
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Tree>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trees WHERE id = $1");
        sqlx::query_as::<_, Tree>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn find_by_uuid<'e>(
        executor: impl PgExecutor<'e>,
        uuid: &str,
    ) -> Result<Option<Tree>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trees WHERE uuid = $1");
        sqlx::query_as::<_, Tree>(&query)
            .bind(uuid)
            .fetch_optional(executor)
            .await
    }

    /// The oldest tree carrying `tag`.
    ///
    /// Later rows sharing a tag are collisions; the lowest id is canonical.
    pub async fn find_oldest_by_tag<'e>(
        executor: impl PgExecutor<'e>,
        tag: &str,
    ) -> Result<Option<Tree>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trees WHERE tag = $1 ORDER BY id ASC LIMIT 1"
        );
        sqlx::query_as::<_, Tree>(&query)
            .bind(tag)
            .fetch_optional(executor)
            .await
    }

    /// Insert a new tree with `status = 'active'`.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateTree,
    ) -> Result<Tree, sqlx::Error> {
        let query = format!(
            "INSERT INTO trees
                (uuid, tag, species_id, display_name, cover_photo, street, number, neighborhood, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tree>(&query)
            .bind(&input.uuid)
            .bind(&input.tag)
            .bind(input.species_id)
            .bind(&input.display_name)
            .bind(&input.cover_photo)
            .bind(&input.street)
            .bind(&input.number)
            .bind(&input.neighborhood)
            .bind(TreeStatus::Active.as_str())
            .fetch_one(executor)
            .await
    }

    /// Overwrite the mutable fields of an existing tree with merged values.
    ///
    /// `client_uuid` is adopted only when the row has no uuid yet and no
    /// other tree owns it; an existing uuid is never rewritten.
    pub async fn update_merged<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        client_uuid: &str,
        input: &UpdateTree,
    ) -> Result<Tree, sqlx::Error> {
        let query = format!(
            "UPDATE trees SET
                species_id = $2,
                display_name = $3,
                cover_photo = $4,
                street = $5,
                number = $6,
                neighborhood = $7,
                uuid = CASE
                    WHEN uuid IS NULL
                         AND NOT EXISTS (SELECT 1 FROM trees other WHERE other.uuid = $8)
                    THEN $8
                    ELSE uuid
                END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tree>(&query)
            .bind(id)
            .bind(input.species_id)
            .bind(&input.display_name)
            .bind(&input.cover_photo)
            .bind(&input.street)
            .bind(&input.number)
            .bind(&input.neighborhood)
            .bind(client_uuid)
            .fetch_one(executor)
            .await
    }

    /// Spatial update, kept apart from the attribute merge.
    pub async fn set_location<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        longitude: f64,
        latitude: f64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE trees SET longitude = $2, latitude = $3 WHERE id = $1")
            .bind(id)
            .bind(longitude)
            .bind(latitude)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn set_status<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        status: TreeStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE trees SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of trees sharing a client uuid. The unique index keeps this at most one.
    pub async fn count_by_uuid<'e>(
        executor: impl PgExecutor<'e>,
        uuid: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM trees WHERE uuid = $1")
            .bind(uuid)
            .fetch_one(executor)
            .await
    }
}
