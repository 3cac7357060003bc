//! One read of the species catalog per batch, before the transaction opens.
//!
//! The merger still checks each species on its own inside the transaction;
//! this set only feeds diagnostics.

use std::collections::HashSet;

use arbor_core::payload::SyncItem;
use arbor_core::species::{referenced_species_ids, SentinelSpecies};
use arbor_core::types::DbId;
use arbor_db::repositories::SpeciesRepo;
use sqlx::PgPool;

fn referenced(items: &[SyncItem]) -> Vec<DbId> {
    referenced_species_ids(
        items
            .iter()
            .filter_map(|item| item.tree.as_ref()?.species_id.as_ref()),
    )
}

/// Species ids referenced by the batch that exist in the catalog.
pub async fn prefetch_valid_species(
    pool: &PgPool,
    items: &[SyncItem],
) -> Result<HashSet<DbId>, sqlx::Error> {
    let ids = referenced(items);
    let existing = SpeciesRepo::existing_ids(pool, &ids).await?;
    Ok(existing.into_iter().collect())
}

/// Distinct referenced species ids not present in `known`.
pub fn unknown_references(items: &[SyncItem], known: &HashSet<DbId>) -> usize {
    referenced(items)
        .into_iter()
        .filter(|id| !known.contains(id))
        .count()
}

/// Sentinel ids with no catalog row. Checked once at startup.
pub async fn missing_sentinels(
    pool: &PgPool,
    sentinels: &SentinelSpecies,
) -> Result<Vec<DbId>, sqlx::Error> {
    let wanted = [sentinels.unidentified, sentinels.fallback];
    let existing = SpeciesRepo::existing_ids(pool, &wanted).await?;
    Ok(wanted
        .into_iter()
        .filter(|id| !existing.contains(id))
        .collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn items(value: serde_json::Value) -> Vec<SyncItem> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn counts_distinct_missing_ids() {
        let batch = items(json!([
            {"tree": {"uuid": "a", "speciesId": 3}},
            {"tree": {"uuid": "b", "speciesId": "3"}},
            {"tree": {"uuid": "c", "speciesId": 999}},
            {"tree": {"uuid": "d"}},
            {"inspection": {"uuid": "i"}}
        ]));
        let known: HashSet<DbId> = [3].into_iter().collect();
        assert_eq!(unknown_references(&batch, &known), 1);
    }

    #[test]
    fn empty_batch_references_nothing() {
        assert_eq!(unknown_references(&[], &HashSet::new()), 0);
    }
}
