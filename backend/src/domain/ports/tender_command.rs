//! Driving port for tender mutations.
//!
//! Requests carry caller input as received. Implementations validate it,
//! failing with `invalid_request` before touching any store.

use async_trait::async_trait;

use crate::domain::{Error, Tender};

/// Request to create a tender on behalf of a named user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTenderRequest {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Service category tag.
    pub service_type: String,
    /// Initial status, e.g. `CREATED`.
    pub status: String,
    /// Owning organization identifier.
    pub organization_id: String,
    /// Username recorded as the creator.
    pub creator_username: String,
}

/// Request to change a tender's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTenderStatusRequest {
    /// Tender identifier.
    pub tender_id: String,
    /// New status.
    pub status: String,
    /// Acting user.
    pub username: String,
}

/// Request to edit a tender's descriptive fields. Absent fields are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTenderRequest {
    /// Tender identifier.
    pub tender_id: String,
    /// Acting user.
    pub username: String,
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New service type.
    pub service_type: Option<String>,
}

/// Request to restore a tender to a recorded version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackTenderRequest {
    /// Tender identifier.
    pub tender_id: String,
    /// Version to restore, as supplied by the caller.
    pub version: String,
    /// Acting user.
    pub username: String,
}

/// Tender lifecycle mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenderCommand: Send + Sync {
    /// Create a tender at version 1.
    async fn create_tender(&self, request: CreateTenderRequest) -> Result<Tender, Error>;

    /// Change the status of a tender the caller may manage.
    async fn update_tender_status(
        &self,
        request: UpdateTenderStatusRequest,
    ) -> Result<Tender, Error>;

    /// Edit a tender the caller may manage.
    async fn edit_tender(&self, request: EditTenderRequest) -> Result<Tender, Error>;

    /// Copy a recorded snapshot back onto a tender the caller may manage.
    async fn rollback_tender(&self, request: RollbackTenderRequest) -> Result<Tender, Error>;
}
