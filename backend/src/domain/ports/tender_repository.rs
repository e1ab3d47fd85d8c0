//! Port for tender persistence and version history.
//!
//! Updates follow optimistic concurrency: callers pass the version they
//! read, and the store applies the change only if the stored version still
//! matches. A successful update snapshots the prior state into the history
//! log and bumps the version by one, atomically.

use async_trait::async_trait;

use crate::domain::{NewTender, ServiceType, Tender, TenderHistory, TenderId, TenderVersion, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tender repository adapters.
    pub enum TenderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "tender repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "tender repository query failed: {message}",
        /// The stored version moved on since it was read.
        VersionMismatch { expected: i32 } =>
            "tender version mismatch: expected {expected}",
    }
}

/// Storage for tenders and their append-only history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenderRepository: Send + Sync {
    /// Fetch a tender by identifier.
    async fn find_by_id(&self, id: &TenderId) -> Result<Option<Tender>, TenderRepositoryError>;

    /// Persist a new tender at [`TenderVersion::INITIAL`].
    async fn create(&self, tender: NewTender) -> Result<Tender, TenderRepositoryError>;

    /// Persist `tender.status`.
    ///
    /// Returns [`TenderRepositoryError::VersionMismatch`] when the stored
    /// version differs from `expected_version`.
    async fn update_status(
        &self,
        tender: &Tender,
        expected_version: TenderVersion,
    ) -> Result<Tender, TenderRepositoryError>;

    /// Persist name, description, service type and status of `tender`.
    ///
    /// Same versioning contract as [`TenderRepository::update_status`].
    async fn update_fields(
        &self,
        tender: &Tender,
        expected_version: TenderVersion,
    ) -> Result<Tender, TenderRepositoryError>;

    /// Fetch the snapshot recorded for `version`.
    async fn find_history(
        &self,
        id: &TenderId,
        version: TenderVersion,
    ) -> Result<Option<TenderHistory>, TenderRepositoryError>;

    /// List tenders, optionally restricted to one service type.
    async fn list_by_service_type(
        &self,
        service_type: Option<ServiceType>,
    ) -> Result<Vec<Tender>, TenderRepositoryError>;

    /// List tenders created by `creator_id`.
    async fn list_by_creator(&self, creator_id: &UserId)
    -> Result<Vec<Tender>, TenderRepositoryError>;
}
