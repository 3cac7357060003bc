//! Field-level conflict resolution between an incoming client record and the
//! canonical row.
//!
//! The rules here are deliberately free of I/O so they can be tested in
//! isolation; the sync engine feeds them the catalog and canonical values it
//! read inside the batch transaction.

use crate::media::persistable_uri;

/// Choose the display name for a tree.
///
/// Precedence, first match wins:
/// 1. a non-empty incoming name that differs from the species catalog name
///    is a manual edit made on the device;
/// 2. an existing non-empty canonical name is preserved;
/// 3. the species catalog name.
///
/// ```
/// use arbor_core::merge::resolve_display_name;
///
/// // The device sent the catalog default; the earlier manual edit survives.
/// assert_eq!(
///     resolve_display_name(Some("Ipê-amarelo"), "Ipê-amarelo", Some("Grandpa's Oak")),
///     "Grandpa's Oak"
/// );
/// ```
pub fn resolve_display_name(
    incoming: Option<&str>,
    catalog_name: &str,
    existing: Option<&str>,
) -> String {
    let incoming = incoming.map(str::trim).filter(|n| !n.is_empty());
    if let Some(name) = incoming {
        if name != catalog_name.trim() {
            return name.to_string();
        }
    }

    if let Some(name) = existing.map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }

    catalog_name.to_string()
}

/// Choose the cover photo reference.
///
/// The incoming value replaces the canonical one only when it may be stored
/// canonically; otherwise the existing value is kept.
pub fn resolve_cover_photo(incoming: Option<&str>, existing: Option<&str>) -> Option<String> {
    persistable_uri(incoming)
        .or(existing)
        .map(str::to_string)
}

/// Replace-when-present merge for plain optional text fields.
pub fn merge_field(incoming: Option<&str>, existing: Option<&str>) -> Option<String> {
    incoming.or(existing).map(str::to_string)
}
