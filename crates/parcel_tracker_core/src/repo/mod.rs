//! Repository layer contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the parcel data access contract.
//! - Keep SQLite query details out of the service layer.
//!
//! # Invariants
//! - Repository APIs return a semantic `NotFound` distinct from store errors.

pub mod parcel_repo;
