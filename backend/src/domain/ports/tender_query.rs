//! Driving port for tender reads.

use async_trait::async_trait;

use crate::domain::{Error, Tender, TenderStatus};

/// Request for the status of a tender the caller may manage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenderStatusRequest {
    /// Tender identifier.
    pub tender_id: String,
    /// Acting user.
    pub username: String,
}

/// Request to list tenders, optionally by service type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTendersRequest {
    /// Service type filter; `None` or blank lists everything.
    pub service_type: Option<String>,
}

/// Request to list tenders created by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTendersRequest {
    /// Creator's username.
    pub username: String,
}

/// Tender lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenderQuery: Send + Sync {
    /// Current status of a tender.
    async fn tender_status(&self, request: TenderStatusRequest) -> Result<TenderStatus, Error>;

    /// All tenders, optionally filtered.
    async fn list_tenders(&self, request: ListTendersRequest) -> Result<Vec<Tender>, Error>;

    /// Tenders created by the named user.
    async fn list_user_tenders(&self, request: UserTendersRequest) -> Result<Vec<Tender>, Error>;
}
