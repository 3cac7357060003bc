//! Bearer-token authentication for field inspectors.

pub mod jwt;
