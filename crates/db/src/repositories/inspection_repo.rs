//! Repository for the `inspections` table and its versioned sub-records.

use arbor_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::inspection::{
    Inspection, InspectionDetail, InspectionSubrecords, ReplacedSubrecords, UpsertInspection,
};
use crate::repositories::{
    DendrometricRepo, ManagementActionRepo, PhotoRepo, PhytosanitaryRepo, TreeRepo,
};

const COLUMNS: &str = "id, uuid, tree_id, inspector_id, inspected_at, created_at, updated_at";

pub struct InspectionRepo;

impl InspectionRepo {
    pub async fn find_by_uuid<'e>(
        executor: impl PgExecutor<'e>,
        uuid: &str,
    ) -> Result<Option<Inspection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inspections WHERE uuid = $1");
        sqlx::query_as::<_, Inspection>(&query)
            .bind(uuid)
            .fetch_optional(executor)
            .await
    }

    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &UpsertInspection,
    ) -> Result<Inspection, sqlx::Error> {
        let query = format!(
            "INSERT INTO inspections (uuid, tree_id, inspector_id, inspected_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inspection>(&query)
            .bind(&input.uuid)
            .bind(input.tree_id)
            .bind(input.inspector_id)
            .bind(input.inspected_at)
            .fetch_one(executor)
            .await
    }

    /// Refresh the header of a resynced inspection.
    ///
    /// The author is only replaced when the current caller is known.
    pub async fn update_header<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpsertInspection,
    ) -> Result<Inspection, sqlx::Error> {
        let query = format!(
            "UPDATE inspections SET
                tree_id = $2,
                inspector_id = COALESCE($3, inspector_id),
                inspected_at = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inspection>(&query)
            .bind(id)
            .bind(input.tree_id)
            .bind(input.inspector_id)
            .bind(input.inspected_at)
            .fetch_one(executor)
            .await
    }

    /// Delete the inspection's current sub-records and insert `records` in
    /// their place, stamped `valid_from = now` with an open `valid_to`.
    ///
    /// This is a destructive replace: prior values are not kept as closed
    /// intervals. On a freshly created inspection the delete step is a no-op.
    pub async fn replace_subrecords(
        conn: &mut PgConnection,
        inspection_id: DbId,
        records: &InspectionSubrecords,
        now: Timestamp,
    ) -> Result<ReplacedSubrecords, sqlx::Error> {
        let replaced = ReplacedSubrecords {
            dendrometrics: DendrometricRepo::delete_for_inspection(&mut *conn, inspection_id)
                .await?,
            phytosanitary: PhytosanitaryRepo::delete_for_inspection(&mut *conn, inspection_id)
                .await?,
            management_actions: ManagementActionRepo::delete_for_inspection(
                &mut *conn,
                inspection_id,
            )
            .await?,
            photos: PhotoRepo::delete_for_inspection(&mut *conn, inspection_id).await?,
        };

        DendrometricRepo::insert_current(&mut *conn, inspection_id, &records.dendrometric, now)
            .await?;
        PhytosanitaryRepo::insert_current(conn, inspection_id, &records.phytosanitary, now)
            .await?;
        ManagementActionRepo::insert_current(&mut *conn, inspection_id, &records.management, now)
            .await?;
        PhotoRepo::insert_many(conn, inspection_id, &records.photos).await?;

        tracing::debug!(
            inspection_id,
            removed = replaced.total(),
            photos = records.photos.len(),
            "Replaced inspection sub-records",
        );
        Ok(replaced)
    }

    /// Load an inspection and its current sub-records by client uuid.
    pub async fn find_detail_by_uuid(
        pool: &PgPool,
        uuid: &str,
    ) -> Result<Option<InspectionDetail>, sqlx::Error> {
        let Some(inspection) = Self::find_by_uuid(pool, uuid).await? else {
            return Ok(None);
        };

        let tree_uuid = TreeRepo::find_by_id(pool, inspection.tree_id)
            .await?
            .and_then(|t| t.uuid);
        let dendrometric = DendrometricRepo::find_current(pool, inspection.id).await?;
        let phytosanitary = PhytosanitaryRepo::find_current(pool, inspection.id).await?;
        let pests = match &phytosanitary {
            Some(record) => PhytosanitaryRepo::pest_names(pool, record.id).await?,
            None => Vec::new(),
        };
        let management = ManagementActionRepo::find_current(pool, inspection.id).await?;
        let photos = PhotoRepo::list_by_inspection(pool, inspection.id).await?;

        Ok(Some(InspectionDetail {
            inspection,
            tree_uuid,
            dendrometric,
            phytosanitary,
            pests,
            management,
            photos,
        }))
    }
}
