//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Create*` / `Update*` input structs for the sync engine's writes

pub mod dendrometric;
pub mod inspection;
pub mod management_action;
pub mod pest;
pub mod photo;
pub mod phytosanitary;
pub mod species;
pub mod sync_failure;
pub mod tree;
