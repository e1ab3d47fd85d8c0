//! Port for bid persistence and feedback records.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{
    Bid, BidEdit, BidFeedback, BidId, BidStatus, FeedbackText, NewBid, TenderId, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by bid repository adapters.
    pub enum BidRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "bid repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "bid repository query failed: {message}",
    }
}

/// Storage for bids. Writes are last-writer-wins.
///
/// Listings are ordered by description, then identifier, and windowed by the
/// supplied [`PageRequest`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BidRepository: Send + Sync {
    /// Fetch a bid by identifier.
    async fn find_by_id(&self, id: &BidId) -> Result<Option<Bid>, BidRepositoryError>;

    /// Persist a new bid.
    async fn create(&self, bid: NewBid) -> Result<Bid, BidRepositoryError>;

    /// Overwrite the status of an existing bid.
    async fn update_status(&self, id: &BidId, status: BidStatus) -> Result<Bid, BidRepositoryError>;

    /// Apply the present fields of `edit` to an existing bid.
    async fn update_fields(&self, id: &BidId, edit: &BidEdit) -> Result<Bid, BidRepositoryError>;

    /// Bids submitted against a tender.
    async fn list_by_tender(
        &self,
        tender_id: &TenderId,
        page: PageRequest,
    ) -> Result<Vec<Bid>, BidRepositoryError>;

    /// Bids submitted by a user.
    async fn list_by_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Vec<Bid>, BidRepositoryError>;

    /// Record feedback against a bid.
    async fn append_feedback(
        &self,
        id: &BidId,
        feedback: &FeedbackText,
    ) -> Result<BidFeedback, BidRepositoryError>;
}
