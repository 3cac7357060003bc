//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Reads take
//! any `PgExecutor` (pool or transaction); writes that issue several
//! statements take `&mut PgConnection`.

pub mod dendrometric_repo;
pub mod inspection_repo;
pub mod management_action_repo;
pub mod pest_repo;
pub mod photo_repo;
pub mod phytosanitary_repo;
pub mod species_repo;
pub mod sync_failure_repo;
pub mod tree_repo;

pub use dendrometric_repo::DendrometricRepo;
pub use inspection_repo::InspectionRepo;
pub use management_action_repo::ManagementActionRepo;
pub use pest_repo::PestRepo;
pub use photo_repo::PhotoRepo;
pub use phytosanitary_repo::PhytosanitaryRepo;
pub use species_repo::SpeciesRepo;
pub use sync_failure_repo::SyncFailureRepo;
pub use tree_repo::TreeRepo;
