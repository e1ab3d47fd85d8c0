//! Bid lifecycle service.
//!
//! Implements [`BidCommand`] and [`BidQuery`]. Bid-scoped operations are
//! restricted to the bid's author; organization responsibility grants no
//! access to individual bids. Listing a tender's bids and submitting a new bid
//! both require responsibility for the relevant organization.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    BidCommand, BidQuery, BidRepository, BidRepositoryError, BidStatusRequest, CreateBidRequest,
    EditBidRequest, SubmitBidFeedbackRequest, TenderBidsRequest, TenderRepository,
    UpdateBidStatusRequest, UserBidsRequest, UserDirectory,
};
use crate::domain::service_support::{
    invalid_field, is_responsible, parse_input, parse_username, resolve_user_id,
    resolve_username,
};
use crate::domain::tender_service::map_repository_error as map_tender_error;
use crate::domain::{
    Bid, BidAuthorType, BidEdit, BidId, BidStatus, Error, FeedbackText, NewBid, OrganizationId,
    Tender, TenderId, UserId, Username,
};

fn map_repository_error(error: BidRepositoryError) -> Error {
    match error {
        BidRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("bid repository unavailable: {message}"))
        }
        BidRepositoryError::Query { message } => {
            Error::internal(format!("bid repository error: {message}"))
        }
    }
}

fn parse_bid_id(raw: &str) -> Result<BidId, Error> {
    parse_input("bidId", raw, |raw| BidId::new(raw))
}

fn parse_tender_id(raw: &str) -> Result<TenderId, Error> {
    parse_input("tenderId", raw, |raw| TenderId::new(raw))
}

/// Bid service implementing the bid driving ports.
#[derive(Clone)]
pub struct BidService<B, T, U> {
    bids: Arc<B>,
    tenders: Arc<T>,
    users: Arc<U>,
}

impl<B, T, U> BidService<B, T, U> {
    /// Create a service over the bid and tender stores and the user directory.
    pub fn new(bids: Arc<B>, tenders: Arc<T>, users: Arc<U>) -> Self {
        Self {
            bids,
            tenders,
            users,
        }
    }
}

impl<B, T, U> BidService<B, T, U>
where
    B: BidRepository,
    T: TenderRepository,
    U: UserDirectory,
{
    async fn load_tender(&self, tender_id: &TenderId) -> Result<Tender, Error> {
        self.tenders
            .find_by_id(tender_id)
            .await
            .map_err(map_tender_error)?
            .ok_or_else(|| Error::tender_not_found(format!("tender {tender_id} not found")))
    }

    /// Load the bid, resolve the caller and check they authored it.
    async fn load_owned(&self, bid_id: &BidId, username: &Username) -> Result<Bid, Error> {
        debug!(%bid_id, "loading bid");
        let bid = self
            .bids
            .find_by_id(bid_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::bid_not_found(format!("bid {bid_id} not found")))?;
        let user = resolve_username(self.users.as_ref(), username).await?;
        if !bid.is_authored_by(user.id()) {
            warn!(%bid_id, %username, "bid access denied");
            return Err(Error::forbidden(format!(
                "user {username} may not access bid {bid_id}"
            )));
        }
        Ok(bid)
    }
}

#[async_trait]
impl<B, T, U> BidCommand for BidService<B, T, U>
where
    B: BidRepository,
    T: TenderRepository,
    U: UserDirectory,
{
    async fn create_bid(&self, request: CreateBidRequest) -> Result<Bid, Error> {
        let tender_id = parse_tender_id(&request.tender_id)?;
        let organization_id = parse_input("organizationId", &request.organization_id, |raw| {
            OrganizationId::new(raw)
        })?;
        let user_id = parse_input("userId", &request.user_id, |raw| UserId::new(raw))?;
        let author_type = parse_input("authorType", &request.author_type, |raw| {
            raw.parse::<BidAuthorType>()
        })?;

        let user = resolve_user_id(self.users.as_ref(), &user_id).await?;
        self.load_tender(&tender_id).await?;
        if !is_responsible(self.users.as_ref(), user.id(), &organization_id).await? {
            warn!(%user_id, %organization_id, "bid submission denied");
            return Err(Error::forbidden(format!(
                "user {user_id} may not bid for organization {organization_id}"
            )));
        }

        let bid = self
            .bids
            .create(NewBid {
                tender_id,
                organization_id,
                user_id,
                author_type,
                description: request.description,
                status: BidStatus::Created,
            })
            .await
            .map_err(map_repository_error)?;
        info!(bid_id = %bid.id, tender_id = %bid.tender_id, "bid created");
        Ok(bid)
    }

    async fn update_bid_status(&self, request: UpdateBidStatusRequest) -> Result<Bid, Error> {
        let bid_id = parse_bid_id(&request.bid_id)?;
        let status = parse_input("status", &request.status, |raw| raw.parse::<BidStatus>())?;
        let username = parse_username(&request.username)?;

        self.load_owned(&bid_id, &username).await?;
        let bid = self
            .bids
            .update_status(&bid_id, status)
            .await
            .map_err(map_repository_error)?;
        info!(%bid_id, %status, "bid status updated");
        Ok(bid)
    }

    async fn edit_bid(&self, request: EditBidRequest) -> Result<Bid, Error> {
        let bid_id = parse_bid_id(&request.bid_id)?;
        let username = parse_username(&request.username)?;
        let edit =
            BidEdit::from_fields(&request.fields).map_err(|err| invalid_field("body", err))?;

        self.load_owned(&bid_id, &username).await?;
        let bid = self
            .bids
            .update_fields(&bid_id, &edit)
            .await
            .map_err(map_repository_error)?;
        info!(%bid_id, "bid edited");
        Ok(bid)
    }

    async fn submit_feedback(&self, request: SubmitBidFeedbackRequest) -> Result<Bid, Error> {
        let bid_id = parse_bid_id(&request.bid_id)?;
        let username = parse_username(&request.username)?;
        let feedback = parse_input("bidFeedback", &request.feedback, |raw| {
            FeedbackText::new(raw)
        })?;

        let bid = self.load_owned(&bid_id, &username).await?;
        let record = self
            .bids
            .append_feedback(&bid_id, &feedback)
            .await
            .map_err(map_repository_error)?;
        info!(%bid_id, feedback_id = %record.id, "bid feedback recorded");
        Ok(bid)
    }
}

#[async_trait]
impl<B, T, U> BidQuery for BidService<B, T, U>
where
    B: BidRepository,
    T: TenderRepository,
    U: UserDirectory,
{
    async fn bid_status(&self, request: BidStatusRequest) -> Result<BidStatus, Error> {
        let bid_id = parse_bid_id(&request.bid_id)?;
        let username = parse_username(&request.username)?;
        let bid = self.load_owned(&bid_id, &username).await?;
        Ok(bid.status)
    }

    async fn user_bids(&self, request: UserBidsRequest) -> Result<Vec<Bid>, Error> {
        let username = parse_username(&request.username)?;
        let user = resolve_username(self.users.as_ref(), &username).await?;
        self.bids
            .list_by_user(user.id(), request.page)
            .await
            .map_err(map_repository_error)
    }

    async fn tender_bids(&self, request: TenderBidsRequest) -> Result<Vec<Bid>, Error> {
        let tender_id = parse_tender_id(&request.tender_id)?;
        let username = parse_username(&request.username)?;

        let tender = self.load_tender(&tender_id).await?;
        let user = resolve_username(self.users.as_ref(), &username).await?;
        if !is_responsible(self.users.as_ref(), user.id(), &tender.organization_id).await? {
            warn!(%tender_id, %username, "tender bid listing denied");
            return Err(Error::forbidden(format!(
                "user {username} may not list bids for tender {tender_id}"
            )));
        }
        self.bids
            .list_by_tender(&tender_id, request.page)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "bid_service_tests.rs"]
mod tests;
