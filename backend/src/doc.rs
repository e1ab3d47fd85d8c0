//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every tender, bid and health endpoint together with
//! the schema wrappers from [`crate::inbound::http::schemas`], which keep
//! domain types free of utoipa derives.
//!
//! The generated document backs Swagger UI in debug builds and is printed by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::bids::{CreateBidBody, EditBidBody};
use crate::inbound::http::schemas::{
    BidAuthorTypeSchema, BidSchema, BidStatusSchema, ErrorCodeSchema, ErrorSchema, TenderSchema,
    TenderStatusSchema,
};
use crate::inbound::http::tenders::{CreateTenderBody, EditTenderBody};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tender backend API",
        description = "Tender and bid management with versioned tender history."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::ping,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::tenders::list_tenders,
        crate::inbound::http::tenders::create_tender,
        crate::inbound::http::tenders::user_tenders,
        crate::inbound::http::tenders::tender_status,
        crate::inbound::http::tenders::update_tender_status,
        crate::inbound::http::tenders::edit_tender,
        crate::inbound::http::tenders::rollback_tender,
        crate::inbound::http::bids::create_bid,
        crate::inbound::http::bids::user_bids,
        crate::inbound::http::bids::tender_bids,
        crate::inbound::http::bids::bid_status,
        crate::inbound::http::bids::update_bid_status,
        crate::inbound::http::bids::edit_bid,
        crate::inbound::http::bids::submit_feedback,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        TenderSchema,
        TenderStatusSchema,
        BidSchema,
        BidStatusSchema,
        BidAuthorTypeSchema,
        CreateTenderBody,
        EditTenderBody,
        CreateBidBody,
        EditBidBody,
    )),
    tags(
        (name = "tenders", description = "Tender lifecycle and version history"),
        (name = "bids", description = "Bids submitted against tenders"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
