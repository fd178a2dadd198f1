//! Parcel domain model.
//!
//! # Responsibility
//! - Define the canonical parcel record stored in the `parcel` table.
//! - Provide well-known status values and the delivery chain between them.
//!
//! # Invariants
//! - `number` is assigned by storage on insert and never changes afterwards.
//! - `client` and `created_at` are set once at creation.
//! - `address` may only change while status is `registered`.
//! - Status is free text; well-known values are not an exhaustive set.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned parcel identifier.
pub type ParcelNumber = i64;

/// Identifier of the client owning a parcel.
pub type ClientId = i64;

const STATUS_REGISTERED: &str = "registered";
const STATUS_SENT: &str = "sent";
const STATUS_DELIVERED: &str = "delivered";

/// Delivery status of a parcel.
///
/// Stored verbatim as text, so values outside the well-known set survive
/// a write/read cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParcelStatus(String);

impl ParcelStatus {
    /// Initial status. Address changes and deletion are allowed only here.
    pub fn registered() -> Self {
        Self(STATUS_REGISTERED.to_string())
    }

    /// Parcel handed over to delivery.
    pub fn sent() -> Self {
        Self(STATUS_SENT.to_string())
    }

    /// Parcel received by the client.
    pub fn delivered() -> Self {
        Self(STATUS_DELIVERED.to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_registered(&self) -> bool {
        self.0 == STATUS_REGISTERED
    }

    /// Returns the following status in `registered -> sent -> delivered`.
    ///
    /// Returns `None` for `delivered` and for values outside the chain.
    pub fn next(&self) -> Option<Self> {
        match self.0.as_str() {
            STATUS_REGISTERED => Some(Self::sent()),
            STATUS_SENT => Some(Self::delivered()),
            _ => None,
        }
    }
}

impl From<&str> for ParcelStatus {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ParcelStatus {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for ParcelStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tracked shipment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Ignored on insert; filled from storage on read.
    pub number: ParcelNumber,
    pub client: ClientId,
    pub status: ParcelStatus,
    pub address: String,
    /// RFC 3339 timestamp text.
    pub created_at: String,
}

impl Parcel {
    /// Builds an unsaved parcel in `registered` state.
    ///
    /// `number` stays `0` until the repository returns the assigned value.
    pub fn new_registered(
        client: ClientId,
        address: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            number: 0,
            client,
            status: ParcelStatus::registered(),
            address: address.into(),
            created_at: created_at.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Parcel, ParcelStatus};

    #[test]
    fn status_chain_ends_at_delivered() {
        assert_eq!(ParcelStatus::registered().next(), Some(ParcelStatus::sent()));
        assert_eq!(ParcelStatus::sent().next(), Some(ParcelStatus::delivered()));
        assert_eq!(ParcelStatus::delivered().next(), None);
    }

    #[test]
    fn unknown_status_is_kept_verbatim_and_has_no_successor() {
        let status = ParcelStatus::from("lost");
        assert_eq!(status.as_str(), "lost");
        assert!(!status.is_registered());
        assert_eq!(status.next(), None);
    }

    #[test]
    fn new_registered_starts_unsaved() {
        let parcel = Parcel::new_registered(7, "Main st. 1", "2024-01-02T03:04:05Z");
        assert_eq!(parcel.number, 0);
        assert!(parcel.status.is_registered());
    }

    #[test]
    fn status_serializes_as_plain_string() {
        let parcel = Parcel::new_registered(7, "Main st. 1", "2024-01-02T03:04:05Z");
        let json = serde_json::to_value(&parcel).unwrap();
        assert_eq!(json["status"], "registered");
        assert_eq!(json["created_at"], "2024-01-02T03:04:05Z");
    }
}
