//! In-memory bid store.

use async_trait::async_trait;
use pagination::PageRequest;

use super::{InMemoryStore, Poisoned};
use crate::domain::ports::{BidRepository, BidRepositoryError};
use crate::domain::{
    Bid, BidEdit, BidFeedback, BidFeedbackId, BidId, BidStatus, FeedbackText, NewBid, TenderId,
    UserId,
};

impl From<Poisoned> for BidRepositoryError {
    fn from(_: Poisoned) -> Self {
        Self::query("bid store lock poisoned")
    }
}

fn missing(id: &BidId) -> BidRepositoryError {
    BidRepositoryError::query(format!("bid {id} does not exist"))
}

impl InMemoryStore {
    fn list_bids<P>(&self, page: PageRequest, mut keep: P) -> Result<Vec<Bid>, BidRepositoryError>
    where
        P: FnMut(&Bid) -> bool,
    {
        let state = self.lock()?;
        let mut bids: Vec<Bid> = state.bids.values().filter(|bid| keep(bid)).cloned().collect();
        bids.sort_by(|left, right| {
            left.description
                .cmp(&right.description)
                .then_with(|| left.id.as_uuid().cmp(right.id.as_uuid()))
        });
        Ok(page.apply(bids).collect())
    }

    fn modify_bid<F>(&self, id: &BidId, apply: F) -> Result<Bid, BidRepositoryError>
    where
        F: FnOnce(&mut Bid),
    {
        let now = self.clock.utc();
        let mut state = self.lock()?;
        let bid = state.bids.get_mut(id).ok_or_else(|| missing(id))?;
        apply(bid);
        bid.updated_at = now;
        Ok(bid.clone())
    }
}

#[async_trait]
impl BidRepository for InMemoryStore {
    async fn find_by_id(&self, id: &BidId) -> Result<Option<Bid>, BidRepositoryError> {
        Ok(self.lock()?.bids.get(id).cloned())
    }

    async fn create(&self, bid: NewBid) -> Result<Bid, BidRepositoryError> {
        let now = self.clock.utc();
        let created = Bid {
            id: BidId::random(),
            tender_id: bid.tender_id,
            organization_id: bid.organization_id,
            user_id: bid.user_id,
            author_type: bid.author_type,
            description: bid.description,
            status: bid.status,
            created_at: now,
            updated_at: now,
        };
        self.lock()?.bids.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn update_status(&self, id: &BidId, status: BidStatus) -> Result<Bid, BidRepositoryError> {
        self.modify_bid(id, |bid| bid.status = status)
    }

    async fn update_fields(&self, id: &BidId, edit: &BidEdit) -> Result<Bid, BidRepositoryError> {
        self.modify_bid(id, |bid| bid.apply_edit(edit))
    }

    async fn list_by_tender(
        &self,
        tender_id: &TenderId,
        page: PageRequest,
    ) -> Result<Vec<Bid>, BidRepositoryError> {
        self.list_bids(page, |bid| &bid.tender_id == tender_id)
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Vec<Bid>, BidRepositoryError> {
        self.list_bids(page, |bid| &bid.user_id == user_id)
    }

    async fn append_feedback(
        &self,
        id: &BidId,
        feedback: &FeedbackText,
    ) -> Result<BidFeedback, BidRepositoryError> {
        let now = self.clock.utc();
        let mut state = self.lock()?;
        if !state.bids.contains_key(id) {
            return Err(missing(id));
        }
        let record = BidFeedback {
            id: BidFeedbackId::random(),
            bid_id: id.clone(),
            feedback: feedback.clone(),
            created_at: now,
        };
        state.feedback.push(record.clone());
        Ok(record)
    }
}
