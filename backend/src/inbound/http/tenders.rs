//! Tender HTTP handlers.
//!
//! ```text
//! GET   /api/tenders?service_type=
//! POST  /api/tenders/new
//! GET   /api/tenders/my?username=
//! GET   /api/tenders/{tenderId}/status?username=
//! PUT   /api/tenders/{tenderId}/status?status=&username=
//! PATCH /api/tenders/{tenderId}/edit?username=
//! PUT   /api/tenders/{tenderId}/rollback/{version}?username=
//! POST  /api/tenders/{tenderId}/rollback/{version}?username=
//! ```
//!
//! Handlers only reshape transport input into driving-port requests. Every
//! identifier and value is validated by the tender service.

use actix_web::{get, patch, post, put, route, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    CreateTenderRequest, EditTenderRequest, ListTendersRequest, RollbackTenderRequest,
    TenderStatusRequest, UpdateTenderStatusRequest, UserTendersRequest,
};
use crate::domain::{Tender, TenderStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::params::{StatusChangeQuery, UsernameQuery};
use crate::inbound::http::schemas::{ErrorSchema, TenderSchema, TenderStatusSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

const USERNAME: FieldName = FieldName::new("username");
const STATUS: FieldName = FieldName::new("status");

/// Request body for `POST /api/tenders/new`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenderBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_type: Option<String>,
    /// Defaults to `CREATED`.
    pub status: Option<String>,
    pub organization_id: Option<String>,
    pub creator_username: Option<String>,
}

impl From<CreateTenderBody> for CreateTenderRequest {
    fn from(body: CreateTenderBody) -> Self {
        Self {
            name: body.name.unwrap_or_default(),
            description: body.description.unwrap_or_default(),
            service_type: body.service_type.unwrap_or_default(),
            status: body
                .status
                .unwrap_or_else(|| TenderStatus::Created.as_str().to_owned()),
            organization_id: body.organization_id.unwrap_or_default(),
            creator_username: body.creator_username.unwrap_or_default(),
        }
    }
}

/// Request body for `PATCH /api/tenders/{tenderId}/edit`. Absent fields are
/// left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditTenderBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_type: Option<String>,
}

/// Query string for the tender listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListTendersQuery {
    pub service_type: Option<String>,
}

/// List tenders, optionally filtered by service type.
#[utoipa::path(
    get,
    path = "/api/tenders",
    params(("service_type" = Option<String>, Query, description = "Service type filter")),
    responses(
        (status = 200, description = "Tenders ordered by name", body = [TenderSchema]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tenders"],
    operation_id = "listTenders"
)]
#[get("/tenders")]
pub async fn list_tenders(
    state: web::Data<HttpState>,
    query: web::Query<ListTendersQuery>,
) -> ApiResult<web::Json<Vec<Tender>>> {
    let request = ListTendersRequest {
        service_type: query.into_inner().service_type,
    };
    let tenders = state.tenders_query.list_tenders(request).await?;
    Ok(web::Json(tenders))
}

/// Create a tender at version 1.
#[utoipa::path(
    post,
    path = "/api/tenders/new",
    request_body = CreateTenderBody,
    responses(
        (status = 200, description = "Created tender", body = TenderSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unknown creator", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tenders"],
    operation_id = "createTender"
)]
#[post("/tenders/new")]
pub async fn create_tender(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTenderBody>,
) -> ApiResult<web::Json<Tender>> {
    let request = CreateTenderRequest::from(payload.into_inner());
    let tender = state.tenders.create_tender(request).await?;
    Ok(web::Json(tender))
}

/// List tenders created by the named user.
#[utoipa::path(
    get,
    path = "/api/tenders/my",
    params(("username" = String, Query, description = "Creator's username")),
    responses(
        (status = 200, description = "Tenders ordered by name", body = [TenderSchema]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tenders"],
    operation_id = "listUserTenders"
)]
#[get("/tenders/my")]
pub async fn user_tenders(
    state: web::Data<HttpState>,
    query: web::Query<UsernameQuery>,
) -> ApiResult<web::Json<Vec<Tender>>> {
    let username = require(query.into_inner().username, USERNAME)?;
    let tenders = state
        .tenders_query
        .list_user_tenders(UserTendersRequest { username })
        .await?;
    Ok(web::Json(tenders))
}

/// Read a tender's status.
#[utoipa::path(
    get,
    path = "/api/tenders/{tenderId}/status",
    params(
        ("tenderId" = String, Path, description = "Tender identifier"),
        ("username" = String, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Current status", body = TenderStatusSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unknown user", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Tender not found", body = ErrorSchema)
    ),
    tags = ["tenders"],
    operation_id = "getTenderStatus"
)]
#[get("/tenders/{tenderId}/status")]
pub async fn tender_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<UsernameQuery>,
) -> ApiResult<web::Json<TenderStatus>> {
    let username = require(query.into_inner().username, USERNAME)?;
    let status = state
        .tenders_query
        .tender_status(TenderStatusRequest {
            tender_id: path.into_inner(),
            username,
        })
        .await?;
    Ok(web::Json(status))
}

/// Change a tender's status, bumping its version.
#[utoipa::path(
    put,
    path = "/api/tenders/{tenderId}/status",
    params(
        ("tenderId" = String, Path, description = "Tender identifier"),
        ("status" = String, Query, description = "New status"),
        ("username" = String, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Updated tender", body = TenderSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unknown user", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Tender not found", body = ErrorSchema),
        (status = 409, description = "Tender changed concurrently", body = ErrorSchema)
    ),
    tags = ["tenders"],
    operation_id = "updateTenderStatus"
)]
#[put("/tenders/{tenderId}/status")]
pub async fn update_tender_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<StatusChangeQuery>,
) -> ApiResult<web::Json<Tender>> {
    let StatusChangeQuery { status, username } = query.into_inner();
    let request = UpdateTenderStatusRequest {
        tender_id: path.into_inner(),
        status: require(status, STATUS)?,
        username: require(username, USERNAME)?,
    };
    let tender = state.tenders.update_tender_status(request).await?;
    Ok(web::Json(tender))
}

/// Edit a tender's name, description or service type.
#[utoipa::path(
    patch,
    path = "/api/tenders/{tenderId}/edit",
    params(
        ("tenderId" = String, Path, description = "Tender identifier"),
        ("username" = String, Query, description = "Acting user")
    ),
    request_body = EditTenderBody,
    responses(
        (status = 200, description = "Updated tender", body = TenderSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unknown user", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Tender not found", body = ErrorSchema),
        (status = 409, description = "Tender changed concurrently", body = ErrorSchema)
    ),
    tags = ["tenders"],
    operation_id = "editTender"
)]
#[patch("/tenders/{tenderId}/edit")]
pub async fn edit_tender(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<UsernameQuery>,
    payload: web::Json<EditTenderBody>,
) -> ApiResult<web::Json<Tender>> {
    let username = require(query.into_inner().username, USERNAME)?;
    let EditTenderBody {
        name,
        description,
        service_type,
    } = payload.into_inner();
    let request = EditTenderRequest {
        tender_id: path.into_inner(),
        username,
        name,
        description,
        service_type,
    };
    let tender = state.tenders.edit_tender(request).await?;
    Ok(web::Json(tender))
}

/// Restore the fields recorded for an earlier version.
#[utoipa::path(
    method(put, post),
    path = "/api/tenders/{tenderId}/rollback/{version}",
    params(
        ("tenderId" = String, Path, description = "Tender identifier"),
        ("version" = i32, Path, description = "Version to restore"),
        ("username" = String, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Restored tender at a new version", body = TenderSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unknown user", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Tender or version not found", body = ErrorSchema),
        (status = 409, description = "Tender changed concurrently", body = ErrorSchema)
    ),
    tags = ["tenders"],
    operation_id = "rollbackTender"
)]
#[route(
    "/tenders/{tenderId}/rollback/{version}",
    method = "PUT",
    method = "POST"
)]
pub async fn rollback_tender(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    query: web::Query<UsernameQuery>,
) -> ApiResult<web::Json<Tender>> {
    let username = require(query.into_inner().username, USERNAME)?;
    let (tender_id, version) = path.into_inner();
    let tender = state
        .tenders
        .rollback_tender(RollbackTenderRequest {
            tender_id,
            version,
            username,
        })
        .await?;
    Ok(web::Json(tender))
}

/// Register every tender handler on a scope or app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_tenders)
        .service(create_tender)
        .service(user_tenders)
        .service(tender_status)
        .service(update_tender_status)
        .service(edit_tender)
        .service(rollback_tender);
}

#[cfg(test)]
#[path = "tenders_tests.rs"]
mod tests;
