//! Offline-sync engine.
//!
//! A batch flows through the species prefetch once, then the orchestrator
//! opens one transaction and runs every item through the resolver, the tree
//! merger and the inspection writer, in submission order. Any error rolls
//! the whole batch back.

pub mod error;
pub mod merger;
pub mod orchestrator;
pub mod resolver;
pub mod species_cache;
pub mod writer;

use arbor_core::geo::CoordinateProjector;
use arbor_core::payload::SyncItem;
use arbor_core::types::DbId;
use sqlx::PgPool;

use crate::config::SyncConfig;

pub use error::SyncError;
pub use orchestrator::BatchStats;

/// Run one batch end to end and return what it changed.
pub async fn run_sync(
    pool: &PgPool,
    config: &SyncConfig,
    projector: &dyn CoordinateProjector,
    inspector_id: Option<DbId>,
    items: &[SyncItem],
) -> Result<BatchStats, SyncError> {
    let known = species_cache::prefetch_valid_species(pool, items).await?;
    let unknown = species_cache::unknown_references(items, &known);
    if unknown > 0 {
        tracing::debug!(
            unknown,
            known = known.len(),
            "Batch references species missing from the catalog",
        );
    }

    let ctx = orchestrator::BatchContext {
        inspector_id,
        sentinels: config.sentinels,
        projector,
    };
    orchestrator::run_batch(pool, config, &ctx, items).await
}
