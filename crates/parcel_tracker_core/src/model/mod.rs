//! Parcel domain model.
//!
//! # Responsibility
//! - Define the data structures shared by repository and service layers.
//!
//! # Invariants
//! - Domain values carry no storage handles; persistence lives in `repo`.

pub mod parcel;
