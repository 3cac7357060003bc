//! Species catalog references and the sentinel rows used as fallbacks.

use serde_json::Value;

use crate::payload::parse_db_id;
use crate::types::DbId;

/// Display name given to a tree whose species could not be resolved at all.
pub const UNKNOWN_SPECIES_NAME: &str = "Unknown species";

/// Default id of the "unidentified" catalog row seeded by the initial migration.
pub const DEFAULT_UNIDENTIFIED_SPECIES_ID: DbId = 1;

/// Default id of the last-resort catalog row seeded by the initial migration.
pub const DEFAULT_FALLBACK_SPECIES_ID: DbId = 2;

/// The two reserved catalog rows the merger falls back to.
///
/// Built once at startup from configuration; merge logic never hard-codes ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentinelSpecies {
    /// Substituted when the client sends no usable species id.
    pub unidentified: DbId,
    /// Used when even the substituted species cannot be found.
    pub fallback: DbId,
}

impl Default for SentinelSpecies {
    fn default() -> Self {
        Self {
            unidentified: DEFAULT_UNIDENTIFIED_SPECIES_ID,
            fallback: DEFAULT_FALLBACK_SPECIES_ID,
        }
    }
}

impl SentinelSpecies {
    /// Species id to look up for an incoming raw value.
    pub fn candidate_for(&self, raw: Option<&Value>) -> DbId {
        raw.and_then(parse_db_id).unwrap_or(self.unidentified)
    }

    /// Resolution used when the catalog lookup comes back empty.
    pub fn unknown(&self) -> ResolvedSpecies {
        ResolvedSpecies {
            id: self.fallback,
            common_name: UNKNOWN_SPECIES_NAME.to_string(),
        }
    }
}

/// Species id and catalog name chosen for a tree write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpecies {
    pub id: DbId,
    pub common_name: String,
}

/// Collect the distinct, parseable species ids referenced by raw values.
pub fn referenced_species_ids<'a>(raw: impl IntoIterator<Item = &'a Value>) -> Vec<DbId> {
    let mut ids: Vec<DbId> = raw.into_iter().filter_map(parse_db_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn candidate_falls_back_to_unidentified() {
        let sentinels = SentinelSpecies {
            unidentified: 10,
            fallback: 20,
        };
        assert_eq!(sentinels.candidate_for(None), 10);
        assert_eq!(sentinels.candidate_for(Some(&json!("abc"))), 10);
        assert_eq!(sentinels.candidate_for(Some(&json!(5))), 5);
    }

    #[test]
    fn unknown_uses_fallback_id_and_placeholder_name() {
        let resolved = SentinelSpecies::default().unknown();
        assert_eq!(resolved.id, DEFAULT_FALLBACK_SPECIES_ID);
        assert_eq!(resolved.common_name, UNKNOWN_SPECIES_NAME);
    }

    #[test]
    fn referenced_ids_are_sorted_and_distinct() {
        let values = [json!(5), json!("5"), json!("x"), json!(2)];
        assert_eq!(referenced_species_ids(values.iter()), vec![2, 5]);
    }
}
