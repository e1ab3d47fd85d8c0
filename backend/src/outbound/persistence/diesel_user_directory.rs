//! PostgreSQL-backed `UserDirectory` over the `employee` and
//! `organization_responsible` tables.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{OrganizationId, User, UserId, Username};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{EmployeeRow, InvalidRow};
use super::pool::{DbPool, PoolError};
use super::schema::{employee, organization_responsible};

/// Diesel implementation of the user directory port.
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    /// Create a directory backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserDirectoryError {
    map_basic_pool_error(error, UserDirectoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserDirectoryError {
    map_basic_diesel_error(error, UserDirectoryError::query, UserDirectoryError::connection)
}

fn map_row(row: Option<EmployeeRow>) -> Result<Option<User>, UserDirectoryError> {
    row.map(User::try_from)
        .transpose()
        .map_err(|err: InvalidRow| UserDirectoryError::query(err.to_string()))
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = employee::table
            .filter(employee::username.eq(username.as_ref()))
            .select(EmployeeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        map_row(row)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = employee::table
            .filter(employee::id.eq(id.as_uuid()))
            .select(EmployeeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        map_row(row)
    }

    async fn is_organization_responsible(
        &self,
        user_id: &UserId,
        organization_id: &OrganizationId,
    ) -> Result<bool, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            organization_responsible::table.filter(
                organization_responsible::user_id
                    .eq(user_id.as_uuid())
                    .and(organization_responsible::organization_id.eq(organization_id.as_uuid())),
            ),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}
