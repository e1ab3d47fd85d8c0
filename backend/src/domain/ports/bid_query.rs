//! Driving port for bid reads.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Bid, BidStatus, Error};

/// Request for the status of the caller's bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidStatusRequest {
    /// Bid identifier.
    pub bid_id: String,
    /// Acting user.
    pub username: String,
}

/// Request for a page of the caller's own bids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserBidsRequest {
    /// Acting user.
    pub username: String,
    /// Page window.
    pub page: PageRequest,
}

/// Request for a page of bids on a tender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenderBidsRequest {
    /// Tender identifier.
    pub tender_id: String,
    /// Acting user; must be responsible for the tender's organization.
    pub username: String,
    /// Page window.
    pub page: PageRequest,
}

/// Bid lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BidQuery: Send + Sync {
    /// Status of the caller's bid.
    async fn bid_status(&self, request: BidStatusRequest) -> Result<BidStatus, Error>;

    /// The caller's bids ordered by description.
    async fn user_bids(&self, request: UserBidsRequest) -> Result<Vec<Bid>, Error>;

    /// Bids on a tender, for organization-responsible users.
    async fn tender_bids(&self, request: TenderBidsRequest) -> Result<Vec<Bid>, Error>;
}
