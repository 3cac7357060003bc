//! Merge an incoming tree payload into the canonical row.
//!
//! Field precedence lives in `arbor_core::merge`; this module resolves the
//! species against the catalog, builds the write DTO and applies it.

use arbor_core::geo::CoordinateProjector;
use arbor_core::merge::{merge_field, resolve_cover_photo, resolve_display_name};
use arbor_core::media::persistable_uri;
use arbor_core::payload::TreePayload;
use arbor_core::species::{ResolvedSpecies, SentinelSpecies};
use arbor_db::models::tree::{CreateTree, Tree, UpdateTree};
use arbor_db::repositories::{SpeciesRepo, TreeRepo};
use serde_json::Value;
use sqlx::PgConnection;

/// The tree row after the merge.
#[derive(Debug)]
pub struct MergedTree {
    pub tree: Tree,
}

/// Resolve the payload's species, falling back to the sentinels.
///
/// Queried per item inside the transaction so a species created earlier in
/// the same batch is visible.
pub async fn resolve_species(
    conn: &mut PgConnection,
    sentinels: &SentinelSpecies,
    raw: Option<&Value>,
) -> Result<ResolvedSpecies, sqlx::Error> {
    let candidate = sentinels.candidate_for(raw);
    match SpeciesRepo::find_by_id(&mut *conn, candidate).await? {
        Some(species) => Ok(ResolvedSpecies {
            id: species.id,
            common_name: species.common_name,
        }),
        None => {
            tracing::warn!(species_id = candidate, "Species not in catalog, using fallback");
            Ok(sentinels.unknown())
        }
    }
}

pub fn plan_create(uuid: String, payload: &TreePayload, species: &ResolvedSpecies) -> CreateTree {
    CreateTree {
        uuid,
        tag: payload.tag(),
        species_id: species.id,
        display_name: resolve_display_name(payload.display_name(), &species.common_name, None),
        cover_photo: persistable_uri(payload.cover_photo.as_deref()).map(str::to_string),
        street: payload.street().map(str::to_string),
        number: payload.number(),
        neighborhood: payload.neighborhood().map(str::to_string),
    }
}

pub fn plan_update(existing: &Tree, payload: &TreePayload, species: &ResolvedSpecies) -> UpdateTree {
    UpdateTree {
        species_id: species.id,
        display_name: resolve_display_name(
            payload.display_name(),
            &species.common_name,
            existing.display_name.as_deref(),
        ),
        cover_photo: resolve_cover_photo(
            payload.cover_photo.as_deref(),
            existing.cover_photo.as_deref(),
        ),
        street: merge_field(payload.street(), existing.street.as_deref()),
        number: payload.number().or_else(|| existing.number.clone()),
        neighborhood: merge_field(payload.neighborhood(), existing.neighborhood.as_deref()),
    }
}

/// Create or update the tree, then apply the location if one was sent.
///
/// `existing` is `None` for a tree seen for the first time.
pub async fn write_tree(
    conn: &mut PgConnection,
    sentinels: &SentinelSpecies,
    projector: &dyn CoordinateProjector,
    uuid: String,
    existing: Option<&Tree>,
    payload: &TreePayload,
) -> Result<MergedTree, sqlx::Error> {
    let species = resolve_species(conn, sentinels, payload.species_id.as_ref()).await?;

    let mut merged = match existing {
        None => MergedTree {
            tree: TreeRepo::create(&mut *conn, &plan_create(uuid, payload, &species)).await?,
        },
        Some(tree) => {
            let update = plan_update(tree, payload, &species);
            MergedTree {
                tree: TreeRepo::update_merged(&mut *conn, tree.id, &uuid, &update).await?,
            }
        }
    };

    if let Some((latitude, longitude)) = payload.coordinates() {
        match projector.project(latitude, longitude) {
            Ok(point) => {
                TreeRepo::set_location(&mut *conn, merged.tree.id, point.longitude, point.latitude)
                    .await?;
                merged.tree.longitude = Some(point.longitude);
                merged.tree.latitude = Some(point.latitude);
            }
            Err(e) => {
                tracing::warn!(
                    tree_id = merged.tree.id,
                    latitude,
                    longitude,
                    error = %e,
                    "Skipping invalid coordinates",
                );
            }
        }
    }

    Ok(merged)
}
