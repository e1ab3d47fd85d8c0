//! PostgreSQL-backed `TenderRepository` with version history.
//!
//! Version bumps run in one transaction: the live row is locked with
//! `SELECT ... FOR UPDATE`, its current state is copied into
//! `tender_history`, and the new fields are written with `version + 1`. A
//! row whose version no longer matches the caller's expectation is left
//! untouched and reported as a version mismatch.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use mockable::Clock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{TenderRepository, TenderRepositoryError};
use crate::domain::{
    NewTender, ServiceType, Tender, TenderHistory, TenderId, TenderVersion, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{InvalidRow, NewTenderRow, TenderHistoryRow, TenderRow, TenderVersionUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{tender, tender_history};

/// Diesel implementation of the tender store.
#[derive(Clone)]
pub struct DieselTenderRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselTenderRepository {
    /// Create a repository backed by `pool`, stamping history rows with
    /// `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn map_pool_error(error: PoolError) -> TenderRepositoryError {
    map_basic_pool_error(error, TenderRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TenderRepositoryError {
    map_basic_diesel_error(
        error,
        TenderRepositoryError::query,
        TenderRepositoryError::connection,
    )
}

fn map_invalid_row(error: InvalidRow) -> TenderRepositoryError {
    TenderRepositoryError::query(error.to_string())
}

fn to_domain(rows: Vec<TenderRow>) -> Result<Vec<Tender>, TenderRepositoryError> {
    rows.into_iter()
        .map(|row| Tender::try_from(row).map_err(map_invalid_row))
        .collect()
}

/// Outcome of a guarded version bump.
enum Bump {
    Applied(TenderRow),
    Stale,
}

fn next_version(
    tender_id: &TenderId,
    expected_version: TenderVersion,
) -> Result<i32, TenderRepositoryError> {
    expected_version
        .next()
        .map(TenderVersion::get)
        .ok_or_else(|| TenderRepositoryError::query(format!("tender {tender_id} version overflow")))
}

impl DieselTenderRepository {
    /// Write the editable columns of `tender` as the version after
    /// `expected_version`, snapshotting the stored row first.
    async fn bump(
        &self,
        tender: &Tender,
        expected_version: TenderVersion,
    ) -> Result<Tender, TenderRepositoryError> {
        let tender_id = *tender.id.as_uuid();
        let expected = expected_version.get();
        let update = TenderVersionUpdate {
            name: tender.name.as_ref(),
            description: &tender.description,
            service_type: tender.service_type.as_ref(),
            status: tender.status.as_str(),
            version: next_version(&tender.id, expected_version)?,
        };
        let recorded_at = self.clock.utc();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let current: TenderRow = tender::table
                        .filter(tender::id.eq(tender_id))
                        .select(TenderRow::as_select())
                        .for_update()
                        .get_result(conn)
                        .await?;
                    if current.version != expected {
                        return Ok(Bump::Stale);
                    }

                    diesel::insert_into(tender_history::table)
                        .values(&TenderHistoryRow::from_live(&current, recorded_at))
                        .execute(conn)
                        .await?;

                    let updated = diesel::update(tender::table.filter(tender::id.eq(tender_id)))
                        .set((&update, tender::updated_at.eq(recorded_at)))
                        .returning(TenderRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>(Bump::Applied(updated))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            Bump::Applied(row) => {
                debug!(%tender_id, version = row.version, "tender version bumped");
                Tender::try_from(row).map_err(map_invalid_row)
            }
            Bump::Stale => Err(TenderRepositoryError::version_mismatch(expected)),
        }
    }
}

#[async_trait]
impl TenderRepository for DieselTenderRepository {
    async fn find_by_id(&self, id: &TenderId) -> Result<Option<Tender>, TenderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = tender::table
            .filter(tender::id.eq(id.as_uuid()))
            .select(TenderRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Tender::try_from)
            .transpose()
            .map_err(map_invalid_row)
    }

    async fn create(&self, tender: NewTender) -> Result<Tender, TenderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewTenderRow {
            id: Uuid::new_v4(),
            name: tender.name.as_ref(),
            description: &tender.description,
            service_type: tender.service_type.as_ref(),
            status: tender.status.as_str(),
            organization_id: *tender.organization_id.as_uuid(),
            creator_id: *tender.creator_id.as_uuid(),
            version: TenderVersion::INITIAL.get(),
        };
        let created = diesel::insert_into(tender::table)
            .values(&row)
            .returning(TenderRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Tender::try_from(created).map_err(map_invalid_row)
    }

    async fn update_status(
        &self,
        tender: &Tender,
        expected_version: TenderVersion,
    ) -> Result<Tender, TenderRepositoryError> {
        // The other editable columns are unchanged at `expected_version`.
        self.bump(tender, expected_version).await
    }

    async fn update_fields(
        &self,
        tender: &Tender,
        expected_version: TenderVersion,
    ) -> Result<Tender, TenderRepositoryError> {
        self.bump(tender, expected_version).await
    }

    async fn find_history(
        &self,
        id: &TenderId,
        version: TenderVersion,
    ) -> Result<Option<TenderHistory>, TenderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = tender_history::table
            .filter(
                tender_history::tender_id
                    .eq(id.as_uuid())
                    .and(tender_history::version.eq(version.get())),
            )
            .select(TenderHistoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(TenderHistory::try_from)
            .transpose()
            .map_err(map_invalid_row)
    }

    async fn list_by_service_type(
        &self,
        service_type: Option<ServiceType>,
    ) -> Result<Vec<Tender>, TenderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = tender::table
            .select(TenderRow::as_select())
            .order((tender::name.asc(), tender::id.asc()))
            .into_boxed();
        if let Some(wanted) = service_type {
            query = query.filter(tender::service_type.eq(String::from(wanted)));
        }
        let rows = query.load(&mut conn).await.map_err(map_diesel_error)?;
        to_domain(rows)
    }

    async fn list_by_creator(
        &self,
        creator_id: &UserId,
    ) -> Result<Vec<Tender>, TenderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = tender::table
            .filter(tender::creator_id.eq(creator_id.as_uuid()))
            .select(TenderRow::as_select())
            .order((tender::name.asc(), tender::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_domain(rows)
    }
}
