//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain values re-run the
//! domain validation so a corrupt row surfaces as [`InvalidRow`] rather than
//! as an invalid aggregate.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{bid, bid_review, employee, tender, tender_history};
use crate::domain::{
    Bid, BidFeedback, BidFeedbackId, BidId, BidValidationError, FeedbackText, OrganizationId,
    ServiceType, Tender, TenderHistory, TenderId, TenderName, TenderValidationError,
    TenderVersion, User, UserId, Username,
};

/// A stored value failed domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {column} in {table} row: {message}")]
pub(crate) struct InvalidRow {
    table: &'static str,
    column: &'static str,
    message: String,
}

impl InvalidRow {
    fn new(table: &'static str, column: &'static str, error: impl std::fmt::Display) -> Self {
        Self {
            table,
            column,
            message: error.to_string(),
        }
    }

    fn column<E>(table: &'static str, column: &'static str) -> impl FnOnce(E) -> Self
    where
        E: std::fmt::Display,
    {
        move |err| Self::new(table, column, err)
    }
}

// ---------------------------------------------------------------------------
// Employee models
// ---------------------------------------------------------------------------

/// Row struct for reading the identity columns of the employee table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = employee)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmployeeRow {
    pub id: Uuid,
    pub username: String,
}

impl TryFrom<EmployeeRow> for User {
    type Error = InvalidRow;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let username = Username::new(&row.username)
            .map_err(InvalidRow::column("employee", "username"))?;
        Ok(Self::new(UserId::from_uuid(row.id), username))
    }
}

// ---------------------------------------------------------------------------
// Tender models
// ---------------------------------------------------------------------------

/// Row struct for reading from the tender table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tender)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TenderRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: String,
    pub organization_id: Uuid,
    pub creator_id: Uuid,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<TenderRow> for Tender {
    type Error = InvalidRow;

    fn try_from(row: TenderRow) -> Result<Self, Self::Error> {
        let invalid = |column| InvalidRow::column::<TenderValidationError>("tender", column);
        Ok(Self {
            id: TenderId::from_uuid(row.id),
            name: TenderName::new(row.name).map_err(invalid("name"))?,
            description: row.description,
            service_type: ServiceType::new(row.service_type).map_err(invalid("service_type"))?,
            status: row.status.parse().map_err(invalid("status"))?,
            organization_id: OrganizationId::from_uuid(row.organization_id),
            creator_id: UserId::from_uuid(row.creator_id),
            version: TenderVersion::new(row.version).map_err(invalid("version"))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable struct for creating tender records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tender)]
pub(crate) struct NewTenderRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub service_type: &'a str,
    pub status: &'a str,
    pub organization_id: Uuid,
    pub creator_id: Uuid,
    pub version: i32,
}

/// Changeset applied when a tender moves to a new version.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tender)]
pub(crate) struct TenderVersionUpdate<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub service_type: &'a str,
    pub status: &'a str,
    pub version: i32,
}

/// Row struct for both reading and writing tender history snapshots.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tender_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TenderHistoryRow {
    pub tender_id: Uuid,
    pub version: i32,
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: String,
    pub organization_id: Uuid,
    pub creator_id: Uuid,
    pub recorded_at: DateTime<Utc>,
}

impl TenderHistoryRow {
    /// Snapshot a live row before it is overwritten.
    pub fn from_live(row: &TenderRow, recorded_at: DateTime<Utc>) -> Self {
        Self {
            tender_id: row.id,
            version: row.version,
            name: row.name.clone(),
            description: row.description.clone(),
            service_type: row.service_type.clone(),
            status: row.status.clone(),
            organization_id: row.organization_id,
            creator_id: row.creator_id,
            recorded_at,
        }
    }
}

impl TryFrom<TenderHistoryRow> for TenderHistory {
    type Error = InvalidRow;

    fn try_from(row: TenderHistoryRow) -> Result<Self, Self::Error> {
        let invalid = |column| InvalidRow::column::<TenderValidationError>("tender_history", column);
        Ok(Self {
            tender_id: TenderId::from_uuid(row.tender_id),
            version: TenderVersion::new(row.version).map_err(invalid("version"))?,
            name: TenderName::new(row.name).map_err(invalid("name"))?,
            description: row.description,
            service_type: ServiceType::new(row.service_type).map_err(invalid("service_type"))?,
            status: row.status.parse().map_err(invalid("status"))?,
            organization_id: OrganizationId::from_uuid(row.organization_id),
            creator_id: UserId::from_uuid(row.creator_id),
            recorded_at: row.recorded_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Bid models
// ---------------------------------------------------------------------------

/// Row struct for reading from the bid table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bid)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BidRow {
    pub id: Uuid,
    pub tender_id: Uuid,
    pub organization_id: Uuid,
    pub user_id: Uuid,
    pub author_type: String,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BidRow> for Bid {
    type Error = InvalidRow;

    fn try_from(row: BidRow) -> Result<Self, Self::Error> {
        let invalid = |column| InvalidRow::column::<BidValidationError>("bid", column);
        Ok(Self {
            id: BidId::from_uuid(row.id),
            tender_id: TenderId::from_uuid(row.tender_id),
            organization_id: OrganizationId::from_uuid(row.organization_id),
            user_id: UserId::from_uuid(row.user_id),
            author_type: row.author_type.parse().map_err(invalid("author_type"))?,
            description: row.description,
            status: row.status.parse().map_err(invalid("status"))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable struct for creating bid records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bid)]
pub(crate) struct NewBidRow<'a> {
    pub id: Uuid,
    pub tender_id: Uuid,
    pub organization_id: Uuid,
    pub user_id: Uuid,
    pub author_type: &'a str,
    pub description: &'a str,
    pub status: &'a str,
}

/// Partial bid update; `None` columns are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = bid)]
pub(crate) struct BidUpdate<'a> {
    pub description: Option<&'a str>,
    pub status: Option<&'a str>,
}

/// Row struct for both reading and writing bid feedback.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = bid_review)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BidReviewRow {
    pub id: Uuid,
    pub bid_id: Uuid,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<BidReviewRow> for BidFeedback {
    type Error = InvalidRow;

    fn try_from(row: BidReviewRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BidFeedbackId::from_uuid(row.id),
            bid_id: BidId::from_uuid(row.bid_id),
            feedback: FeedbackText::new(row.description)
                .map_err(|err| InvalidRow::new("bid_review", "description", err))?,
            created_at: row.created_at,
        })
    }
}
