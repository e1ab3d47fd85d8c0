//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialized shape of their domain types but
//! live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The acting user could not be resolved.
    #[schema(rename = "user_not_found")]
    UserNotFound,
    /// Known user without permission for this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// No tender with the supplied identifier.
    #[schema(rename = "tender_not_found")]
    TenderNotFound,
    /// The tender has no snapshot for the requested version.
    #[schema(rename = "tender_history_not_found")]
    TenderHistoryNotFound,
    /// No bid with the supplied identifier.
    #[schema(rename = "bid_not_found")]
    BidNotFound,
    /// The tender changed concurrently.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "tenderId must be a valid UUID")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::TenderStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TenderStatus)]
pub enum TenderStatusSchema {
    /// Drafted, not yet visible to bidders.
    #[schema(rename = "CREATED")]
    Created,
    /// Open for bids.
    #[schema(rename = "PUBLISHED")]
    Published,
    /// No longer accepting bids.
    #[schema(rename = "CLOSED")]
    Closed,
}

/// OpenAPI schema for [`crate::domain::Tender`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Tender, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TenderSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Road repair")]
    name: String,
    description: String,
    #[schema(example = "Construction")]
    service_type: String,
    status: TenderStatusSchema,
    organization_id: String,
    creator_id: String,
    /// Starts at 1 and grows by one on every mutation.
    #[schema(example = 1, minimum = 1)]
    version: i32,
    #[schema(format = DateTime)]
    created_at: String,
    #[schema(format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::BidStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::BidStatus)]
pub enum BidStatusSchema {
    /// Submitted, not yet visible.
    #[schema(rename = "CREATED")]
    Created,
    /// Visible to the tender owner.
    #[schema(rename = "PUBLISHED")]
    Published,
    /// Withdrawn by its author.
    #[schema(rename = "CANCELED")]
    Canceled,
}

/// OpenAPI schema for [`crate::domain::BidAuthorType`].
#[derive(ToSchema)]
#[schema(as = crate::domain::BidAuthorType)]
pub enum BidAuthorTypeSchema {
    /// Submitted by an individual.
    User,
    /// Submitted on behalf of an organization.
    Organization,
}

/// OpenAPI schema for [`crate::domain::Bid`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Bid, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BidSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    tender_id: String,
    organization_id: String,
    user_id: String,
    author_type: BidAuthorTypeSchema,
    #[schema(example = "We can deliver in six weeks")]
    description: String,
    status: BidStatusSchema,
    #[schema(format = DateTime)]
    created_at: String,
    #[schema(format = DateTime)]
    updated_at: String,
}
