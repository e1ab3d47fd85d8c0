//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: Define strongly typed tender and bid entities, the ports through
//! which the domain reaches storage, and the services that enforce lifecycle
//! and permission rules. Keep types immutable where possible and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - Tender, Bid and their value types — the aggregates being managed.
//! - TenderService and BidService — implementations of the driving ports.

pub mod bid;
pub mod bid_service;
pub mod error;
pub mod identifier;
pub mod organization;
pub mod ports;
pub(crate) mod service_support;
pub mod tender;
pub mod tender_service;
#[cfg(test)]
pub(crate) mod test_fixtures;
pub mod trace_id;
pub mod user;

pub use self::bid::{
    Bid, BidAuthorType, BidEdit, BidFeedback, BidFeedbackId, BidId, BidStatus,
    BidValidationError, EDITABLE_BID_FIELDS, FeedbackText, NewBid,
};
pub use self::bid_service::BidService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identifier::IdentifierError;
pub use self::organization::OrganizationId;
pub use self::tender::{
    NewTender, ServiceType, Tender, TenderDraft, TenderEdit, TenderHistory, TenderId, TenderName,
    TenderStatus, TenderValidationError, TenderVersion,
};
pub use self::tender_service::TenderService;
pub use self::trace_id::TraceId;
pub use self::user::{User, UserId, Username, UsernameValidationError};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use tender_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
