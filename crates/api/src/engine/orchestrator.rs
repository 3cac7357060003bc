//! One transaction per batch, items in submission order.

use arbor_core::geo::CoordinateProjector;
use arbor_core::payload::SyncItem;
use arbor_core::species::SentinelSpecies;
use arbor_core::types::{DbId, Timestamp};
use chrono::Utc;
use sqlx::{PgConnection, PgPool};

use crate::config::SyncConfig;
use crate::engine::error::SyncError;
use crate::engine::merger;
use crate::engine::resolver::{self, Resolution};
use crate::engine::writer::{self, InspectionOutcome};

/// Per-request inputs shared by every item of a batch.
pub struct BatchContext<'a> {
    pub inspector_id: Option<DbId>,
    pub sentinels: SentinelSpecies,
    pub projector: &'a dyn CoordinateProjector,
}

/// What a committed batch changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub items: usize,
    pub items_skipped: usize,
    pub trees_created: usize,
    pub trees_updated: usize,
    pub inspections_created: usize,
    pub inspections_replaced: usize,
    pub inspections_ignored: usize,
}

/// Apply `items` inside a single transaction.
///
/// Waits at most `config.tx_max_wait` for the transaction to start and
/// `config.tx_timeout` for the items plus the commit. On any error or timeout
/// the transaction is dropped uncommitted, which rolls it back.
pub async fn run_batch(
    pool: &PgPool,
    config: &SyncConfig,
    ctx: &BatchContext<'_>,
    items: &[SyncItem],
) -> Result<BatchStats, SyncError> {
    let mut tx = match tokio::time::timeout(config.tx_max_wait, pool.begin()).await {
        Ok(tx) => tx?,
        Err(_) => return Err(SyncError::TransactionStartTimeout(config.tx_max_wait)),
    };

    let work = async move {
        let now = Utc::now();
        let mut stats = BatchStats {
            items: items.len(),
            ..Default::default()
        };

        for (index, item) in items.iter().enumerate() {
            apply_item(&mut *tx, ctx, item, now, &mut stats)
                .await
                .map_err(|source| SyncError::Item { index, source })?;
        }

        tx.commit().await?;
        Ok::<_, SyncError>(stats)
    };

    let stats = match tokio::time::timeout(config.tx_timeout, work).await {
        Ok(result) => result?,
        Err(_) => return Err(SyncError::ExecutionTimeout(config.tx_timeout)),
    };

    tracing::info!(
        batch_size = stats.items,
        items_skipped = stats.items_skipped,
        trees_created = stats.trees_created,
        trees_updated = stats.trees_updated,
        inspections_created = stats.inspections_created,
        inspections_replaced = stats.inspections_replaced,
        inspector_id = ?ctx.inspector_id,
        "Sync batch committed",
    );
    Ok(stats)
}

async fn apply_item(
    conn: &mut PgConnection,
    ctx: &BatchContext<'_>,
    item: &SyncItem,
    now: Timestamp,
    stats: &mut BatchStats,
) -> Result<(), sqlx::Error> {
    let Some(tree_payload) = item.tree.as_ref() else {
        stats.items_skipped += 1;
        return Ok(());
    };

    let merged = match resolver::resolve(&mut *conn, tree_payload).await? {
        Resolution::Skip => {
            tracing::debug!("Skipping item without tree uuid");
            stats.items_skipped += 1;
            return Ok(());
        }
        Resolution::New { uuid } => {
            let merged = merger::write_tree(
                &mut *conn,
                &ctx.sentinels,
                ctx.projector,
                uuid,
                None,
                tree_payload,
            )
            .await?;
            stats.trees_created += 1;
            merged
        }
        Resolution::Existing {
            tree,
            uuid,
            matched_by,
        } => {
            tracing::debug!(tree_id = tree.id, matched_by = matched_by.as_str(), "Matched tree");
            let merged = merger::write_tree(
                &mut *conn,
                &ctx.sentinels,
                ctx.projector,
                uuid,
                Some(&tree),
                tree_payload,
            )
            .await?;
            stats.trees_updated += 1;
            merged
        }
    };

    if let Some(inspection) = &item.inspection {
        let outcome = writer::write_inspection(
            &mut *conn,
            merged.tree.id,
            ctx.inspector_id,
            inspection,
            now,
        )
        .await?;
        match outcome {
            InspectionOutcome::Created => stats.inspections_created += 1,
            InspectionOutcome::Replaced => stats.inspections_replaced += 1,
            InspectionOutcome::Ignored => stats.inspections_ignored += 1,
        }
    }

    Ok(())
}
