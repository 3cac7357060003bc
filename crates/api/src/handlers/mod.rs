pub mod inspections;
pub mod sync;
