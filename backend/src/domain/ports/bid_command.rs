//! Driving port for bid mutations.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::{Bid, Error};

/// Request to submit a bid against a tender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBidRequest {
    /// Proposal text.
    pub description: String,
    /// Tender identifier.
    pub tender_id: String,
    /// Organization the bid is made for.
    pub organization_id: String,
    /// Submitting user identifier.
    pub user_id: String,
    /// `User` or `Organization`.
    pub author_type: String,
}

/// Request to change a bid's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBidStatusRequest {
    /// Bid identifier.
    pub bid_id: String,
    /// New status.
    pub status: String,
    /// Acting user.
    pub username: String,
}

/// Request to edit a bid from a raw field map.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBidRequest {
    /// Bid identifier.
    pub bid_id: String,
    /// Acting user.
    pub username: String,
    /// Column/value pairs; only `description` and `status` are accepted.
    pub fields: Map<String, Value>,
}

/// Request to leave feedback on a bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitBidFeedbackRequest {
    /// Bid identifier.
    pub bid_id: String,
    /// Acting user.
    pub username: String,
    /// Feedback text.
    pub feedback: String,
}

/// Bid lifecycle mutations. Only a bid's author may act on it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BidCommand: Send + Sync {
    /// Submit a new bid with status `CREATED`.
    async fn create_bid(&self, request: CreateBidRequest) -> Result<Bid, Error>;

    /// Change the status of the caller's bid.
    async fn update_bid_status(&self, request: UpdateBidStatusRequest) -> Result<Bid, Error>;

    /// Edit the caller's bid.
    async fn edit_bid(&self, request: EditBidRequest) -> Result<Bid, Error>;

    /// Record feedback and return the bid unchanged.
    async fn submit_feedback(&self, request: SubmitBidFeedbackRequest) -> Result<Bid, Error>;
}
