//! Parcel use-case service.
//!
//! # Responsibility
//! - Provide registration, status progression and client listing entry points.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository status gates.
//! - Status progression follows `registered -> sent -> delivered` and stops
//!   at the last known status.

use crate::model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
use crate::repo::parcel_repo::{ParcelRepository, RepoError, RepoResult};
use chrono::{SecondsFormat, Utc};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for status progression.
#[derive(Debug)]
pub enum ParcelServiceError {
    /// Target parcel does not exist.
    ParcelNotFound(ParcelNumber),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ParcelServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParcelNotFound(number) => write!(f, "parcel not found: {number}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ParcelServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::ParcelNotFound(_) => None,
        }
    }
}

impl From<RepoError> for ParcelServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(number) => Self::ParcelNotFound(number),
            other => Self::Repo(other),
        }
    }
}

/// Use-case service wrapper for parcel operations.
pub struct ParcelService<R: ParcelRepository> {
    repo: R,
}

impl<R: ParcelRepository> ParcelService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new parcel for `client`, stamped with the current UTC time.
    ///
    /// Returns the stored parcel including its assigned number.
    pub fn register(&self, client: ClientId, address: impl Into<String>) -> RepoResult<Parcel> {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut parcel = Parcel::new_registered(client, address, created_at);
        parcel.number = self.repo.add(&parcel)?;

        info!(
            "event=parcel_register module=service status=ok number={} client={}",
            parcel.number, parcel.client
        );
        Ok(parcel)
    }

    /// Lists all parcels owned by `client`.
    pub fn client_parcels(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        self.repo.get_by_client(client)
    }

    /// Advances a parcel to its next delivery status.
    ///
    /// # Contract
    /// - Returns the status written, or `None` when the parcel is already
    ///   at the end of the chain (nothing is written then).
    /// - Read and write are separate statements and not atomic.
    pub fn next_status(
        &self,
        number: ParcelNumber,
    ) -> Result<Option<ParcelStatus>, ParcelServiceError> {
        let parcel = self.repo.get(number)?;
        let Some(next) = parcel.status.next() else {
            return Ok(None);
        };

        self.repo.set_status(number, &next)?;
        info!(
            "event=parcel_status module=service status=ok number={number} from={} to={next}",
            parcel.status
        );
        Ok(Some(next))
    }

    /// Changes the delivery address of a `registered` parcel.
    ///
    /// Silently leaves other parcels untouched; re-read to detect rejection.
    pub fn change_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        self.repo.set_address(number, address)
    }

    /// Deletes a `registered` parcel. Other parcels are kept.
    pub fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        self.repo.delete(number)
    }
}
