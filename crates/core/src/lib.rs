//! Domain types and pure reconciliation rules for the Arbor tree inventory.
//!
//! Nothing in this crate touches the database. The sync engine in
//! `arbor-api` composes these rules with the repositories in `arbor-db`.

pub mod error;
pub mod geo;
pub mod media;
pub mod merge;
pub mod payload;
pub mod pest;
pub mod species;
pub mod tree_status;
pub mod types;
