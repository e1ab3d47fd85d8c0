//! Bid HTTP handlers.
//!
//! ```text
//! POST  /api/bids/new
//! GET   /api/bids/my?username=&limit=&offset=
//! GET   /api/bids/{tenderId}/list?username=&limit=&offset=
//! GET   /api/bids/{bidId}/status?username=
//! PUT   /api/bids/{bidId}/status?status=&username=
//! PATCH /api/bids/{bidId}/edit?username=
//! PUT   /api/bids/{bidId}/feedback?bidFeedback=&username=
//! ```

use actix_web::{get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::ports::{
    BidStatusRequest, CreateBidRequest, EditBidRequest, SubmitBidFeedbackRequest,
    TenderBidsRequest, UpdateBidStatusRequest, UserBidsRequest,
};
use crate::domain::{Bid, BidStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::params::{StatusChangeQuery, UsernameQuery};
use crate::inbound::http::schemas::{BidSchema, BidStatusSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_page, require};

const USERNAME: FieldName = FieldName::new("username");
const STATUS: FieldName = FieldName::new("status");
const BID_FEEDBACK: FieldName = FieldName::new("bidFeedback");

/// Request body for `POST /api/bids/new`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBidBody {
    pub description: Option<String>,
    pub tender_id: Option<String>,
    pub organization_id: Option<String>,
    pub user_id: Option<String>,
    /// `User` or `Organization`.
    pub author_type: Option<String>,
}

impl From<CreateBidBody> for CreateBidRequest {
    fn from(body: CreateBidBody) -> Self {
        Self {
            description: body.description.unwrap_or_default(),
            tender_id: body.tender_id.unwrap_or_default(),
            organization_id: body.organization_id.unwrap_or_default(),
            user_id: body.user_id.unwrap_or_default(),
            author_type: body.author_type.unwrap_or_default(),
        }
    }
}

/// Documented shape of the `PATCH /api/bids/{bidId}/edit` body. Any other
/// key is rejected.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EditBidBody {
    description: Option<String>,
    /// `CREATED`, `PUBLISHED` or `CANCELED`.
    status: Option<String>,
}

/// Query string for paged listings.
#[derive(Debug, Default, Deserialize)]
pub struct PagedQuery {
    pub username: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Query string for feedback submission.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQuery {
    pub bid_feedback: Option<String>,
    pub username: Option<String>,
}

/// Submit a bid against a tender.
#[utoipa::path(
    post,
    path = "/api/bids/new",
    request_body = CreateBidBody,
    responses(
        (status = 200, description = "Created bid", body = BidSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unknown user", body = ErrorSchema),
        (status = 403, description = "Not responsible for the organization", body = ErrorSchema),
        (status = 404, description = "Tender not found", body = ErrorSchema)
    ),
    tags = ["bids"],
    operation_id = "createBid"
)]
#[post("/bids/new")]
pub async fn create_bid(
    state: web::Data<HttpState>,
    payload: web::Json<CreateBidBody>,
) -> ApiResult<web::Json<Bid>> {
    let bid = state
        .bids
        .create_bid(CreateBidRequest::from(payload.into_inner()))
        .await?;
    Ok(web::Json(bid))
}

/// Page through the caller's bids.
#[utoipa::path(
    get,
    path = "/api/bids/my",
    params(
        ("username" = String, Query, description = "Acting user"),
        ("limit" = Option<i64>, Query, description = "Page size, 1 to 100, default 10"),
        ("offset" = Option<i64>, Query, description = "Items to skip, default 0")
    ),
    responses(
        (status = 200, description = "Bids ordered by description", body = [BidSchema]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["bids"],
    operation_id = "listUserBids"
)]
#[get("/bids/my")]
pub async fn user_bids(
    state: web::Data<HttpState>,
    query: web::Query<PagedQuery>,
) -> ApiResult<web::Json<Vec<Bid>>> {
    let PagedQuery {
        username,
        limit,
        offset,
    } = query.into_inner();
    let request = UserBidsRequest {
        username: require(username, USERNAME)?,
        page: parse_page(limit.as_deref(), offset.as_deref())?,
    };
    let bids = state.bids_query.user_bids(request).await?;
    Ok(web::Json(bids))
}

/// Page through the bids on a tender.
#[utoipa::path(
    get,
    path = "/api/bids/{tenderId}/list",
    params(
        ("tenderId" = String, Path, description = "Tender identifier"),
        ("username" = String, Query, description = "Acting user"),
        ("limit" = Option<i64>, Query, description = "Page size, 1 to 100, default 10"),
        ("offset" = Option<i64>, Query, description = "Items to skip, default 0")
    ),
    responses(
        (status = 200, description = "Bids ordered by description", body = [BidSchema]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unknown user", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Tender not found", body = ErrorSchema)
    ),
    tags = ["bids"],
    operation_id = "listTenderBids"
)]
#[get("/bids/{tenderId}/list")]
pub async fn tender_bids(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<PagedQuery>,
) -> ApiResult<web::Json<Vec<Bid>>> {
    let PagedQuery {
        username,
        limit,
        offset,
    } = query.into_inner();
    let request = TenderBidsRequest {
        tender_id: path.into_inner(),
        username: require(username, USERNAME)?,
        page: parse_page(limit.as_deref(), offset.as_deref())?,
    };
    let bids = state.bids_query.tender_bids(request).await?;
    Ok(web::Json(bids))
}

/// Read the status of the caller's bid.
#[utoipa::path(
    get,
    path = "/api/bids/{bidId}/status",
    params(
        ("bidId" = String, Path, description = "Bid identifier"),
        ("username" = String, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Current status", body = BidStatusSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unknown user", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Bid not found", body = ErrorSchema)
    ),
    tags = ["bids"],
    operation_id = "getBidStatus"
)]
#[get("/bids/{bidId}/status")]
pub async fn bid_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<UsernameQuery>,
) -> ApiResult<web::Json<BidStatus>> {
    let request = BidStatusRequest {
        bid_id: path.into_inner(),
        username: require(query.into_inner().username, USERNAME)?,
    };
    let status = state.bids_query.bid_status(request).await?;
    Ok(web::Json(status))
}

/// Change the status of the caller's bid.
#[utoipa::path(
    put,
    path = "/api/bids/{bidId}/status",
    params(
        ("bidId" = String, Path, description = "Bid identifier"),
        ("status" = String, Query, description = "New status"),
        ("username" = String, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Updated bid", body = BidSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unknown user", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Bid not found", body = ErrorSchema)
    ),
    tags = ["bids"],
    operation_id = "updateBidStatus"
)]
#[put("/bids/{bidId}/status")]
pub async fn update_bid_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<StatusChangeQuery>,
) -> ApiResult<web::Json<Bid>> {
    let StatusChangeQuery { status, username } = query.into_inner();
    let request = UpdateBidStatusRequest {
        bid_id: path.into_inner(),
        status: require(status, STATUS)?,
        username: require(username, USERNAME)?,
    };
    let bid = state.bids.update_bid_status(request).await?;
    Ok(web::Json(bid))
}

/// Edit the caller's bid. Only `description` and `status` may be set.
#[utoipa::path(
    patch,
    path = "/api/bids/{bidId}/edit",
    params(
        ("bidId" = String, Path, description = "Bid identifier"),
        ("username" = String, Query, description = "Acting user")
    ),
    request_body = EditBidBody,
    responses(
        (status = 200, description = "Updated bid", body = BidSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unknown user", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Bid not found", body = ErrorSchema)
    ),
    tags = ["bids"],
    operation_id = "editBid"
)]
#[patch("/bids/{bidId}/edit")]
pub async fn edit_bid(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<UsernameQuery>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<web::Json<Bid>> {
    let request = EditBidRequest {
        bid_id: path.into_inner(),
        username: require(query.into_inner().username, USERNAME)?,
        fields: payload.into_inner(),
    };
    let bid = state.bids.edit_bid(request).await?;
    Ok(web::Json(bid))
}

/// Leave feedback on the caller's bid.
#[utoipa::path(
    put,
    path = "/api/bids/{bidId}/feedback",
    params(
        ("bidId" = String, Path, description = "Bid identifier"),
        ("bidFeedback" = String, Query, description = "Feedback text"),
        ("username" = String, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "The bid, unchanged", body = BidSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unknown user", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Bid not found", body = ErrorSchema)
    ),
    tags = ["bids"],
    operation_id = "submitBidFeedback"
)]
#[put("/bids/{bidId}/feedback")]
pub async fn submit_feedback(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<FeedbackQuery>,
) -> ApiResult<web::Json<Bid>> {
    let FeedbackQuery {
        bid_feedback,
        username,
    } = query.into_inner();
    let request = SubmitBidFeedbackRequest {
        bid_id: path.into_inner(),
        username: require(username, USERNAME)?,
        feedback: require(bid_feedback, BID_FEEDBACK)?,
    };
    let bid = state.bids.submit_feedback(request).await?;
    Ok(web::Json(bid))
}

/// Register every bid handler on a scope or app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_bid)
        .service(user_bids)
        .service(tender_bids)
        .service(bid_status)
        .service(update_bid_status)
        .service(edit_bid)
        .service(submit_feedback);
}

#[cfg(test)]
#[path = "bids_tests.rs"]
mod tests;
