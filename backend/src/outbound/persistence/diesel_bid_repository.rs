//! PostgreSQL-backed `BidRepository` over the `bid` and `bid_review` tables.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::ports::{BidRepository, BidRepositoryError};
use crate::domain::{
    Bid, BidEdit, BidFeedback, BidId, BidStatus, FeedbackText, NewBid, TenderId, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{BidReviewRow, BidRow, BidUpdate, InvalidRow, NewBidRow};
use super::pool::{DbPool, PoolError};
use super::schema::{bid, bid_review};

/// Diesel implementation of the bid store.
#[derive(Clone)]
pub struct DieselBidRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselBidRepository {
    /// Create a repository backed by `pool`, stamping rows with `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn map_pool_error(error: PoolError) -> BidRepositoryError {
    map_basic_pool_error(error, BidRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BidRepositoryError {
    map_basic_diesel_error(error, BidRepositoryError::query, BidRepositoryError::connection)
}

fn map_invalid_row(error: InvalidRow) -> BidRepositoryError {
    BidRepositoryError::query(error.to_string())
}

fn to_domain(rows: Vec<BidRow>) -> Result<Vec<Bid>, BidRepositoryError> {
    rows.into_iter()
        .map(|row| Bid::try_from(row).map_err(map_invalid_row))
        .collect()
}

impl DieselBidRepository {
    async fn apply_update(
        &self,
        id: &BidId,
        update: BidUpdate<'_>,
    ) -> Result<Bid, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(bid::table.filter(bid::id.eq(id.as_uuid())))
            .set((&update, bid::updated_at.eq(self.clock.utc())))
            .returning(BidRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Bid::try_from(row).map_err(map_invalid_row)
    }
}

#[async_trait]
impl BidRepository for DieselBidRepository {
    async fn find_by_id(&self, id: &BidId) -> Result<Option<Bid>, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = bid::table
            .filter(bid::id.eq(id.as_uuid()))
            .select(BidRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Bid::try_from).transpose().map_err(map_invalid_row)
    }

    async fn create(&self, bid: NewBid) -> Result<Bid, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewBidRow {
            id: Uuid::new_v4(),
            tender_id: *bid.tender_id.as_uuid(),
            organization_id: *bid.organization_id.as_uuid(),
            user_id: *bid.user_id.as_uuid(),
            author_type: bid.author_type.as_str(),
            description: &bid.description,
            status: bid.status.as_str(),
        };
        let created = diesel::insert_into(bid::table)
            .values(&row)
            .returning(BidRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Bid::try_from(created).map_err(map_invalid_row)
    }

    async fn update_status(&self, id: &BidId, status: BidStatus) -> Result<Bid, BidRepositoryError> {
        let update = BidUpdate {
            description: None,
            status: Some(status.as_str()),
        };
        self.apply_update(id, update).await
    }

    async fn update_fields(&self, id: &BidId, edit: &BidEdit) -> Result<Bid, BidRepositoryError> {
        let update = BidUpdate {
            description: edit.description(),
            status: edit.status().map(BidStatus::as_str),
        };
        self.apply_update(id, update).await
    }

    async fn list_by_tender(
        &self,
        tender_id: &TenderId,
        page: PageRequest,
    ) -> Result<Vec<Bid>, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = bid::table
            .filter(bid::tender_id.eq(tender_id.as_uuid()))
            .select(BidRow::as_select())
            .order((bid::description.asc(), bid::id.asc()))
            .limit(page.limit_i64())
            .offset(page.offset_i64())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_domain(rows)
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Vec<Bid>, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = bid::table
            .filter(bid::user_id.eq(user_id.as_uuid()))
            .select(BidRow::as_select())
            .order((bid::description.asc(), bid::id.asc()))
            .limit(page.limit_i64())
            .offset(page.offset_i64())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_domain(rows)
    }

    async fn append_feedback(
        &self,
        id: &BidId,
        feedback: &FeedbackText,
    ) -> Result<BidFeedback, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = BidReviewRow {
            id: Uuid::new_v4(),
            bid_id: *id.as_uuid(),
            description: feedback.as_ref().to_owned(),
            created_at: self.clock.utc(),
        };
        let stored = diesel::insert_into(bid_review::table)
            .values(&row)
            .returning(BidReviewRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        BidFeedback::try_from(stored).map_err(map_invalid_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::fixed_time;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(err, BidRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("timed out"));
    }

    #[rstest]
    fn corrupt_author_type_is_a_query_error() {
        let row = BidRow {
            id: Uuid::nil(),
            tender_id: Uuid::nil(),
            organization_id: Uuid::nil(),
            user_id: Uuid::nil(),
            author_type: "Robot".to_owned(),
            description: "Offer".to_owned(),
            status: "CREATED".to_owned(),
            created_at: fixed_time(),
            updated_at: fixed_time(),
        };
        let err = to_domain(vec![row]).expect_err("unknown author type");
        assert!(matches!(err, BidRepositoryError::Query { .. }));
    }
}
