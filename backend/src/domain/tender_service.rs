//! Tender lifecycle service.
//!
//! Implements [`TenderCommand`] and [`TenderQuery`]. Every tender-scoped
//! operation validates caller input, loads the tender, resolves the caller
//! and checks permission, in that order, before doing any work. A caller may
//! manage a tender when they created it or are responsible for its
//! organization.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CreateTenderRequest, EditTenderRequest, ListTendersRequest, RollbackTenderRequest,
    TenderCommand, TenderQuery, TenderRepository, TenderRepositoryError, TenderStatusRequest,
    UpdateTenderStatusRequest, UserDirectory, UserTendersRequest,
};
use crate::domain::service_support::{
    invalid_field, is_responsible, parse_input, parse_username, resolve_username,
};
use crate::domain::{
    Error, OrganizationId, ServiceType, Tender, TenderDraft, TenderEdit, TenderId, TenderName,
    TenderStatus, TenderValidationError, TenderVersion, User, Username,
};

pub(crate) fn map_repository_error(error: TenderRepositoryError) -> Error {
    match error {
        TenderRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("tender repository unavailable: {message}"))
        }
        TenderRepositoryError::Query { message } => {
            Error::internal(format!("tender repository error: {message}"))
        }
        TenderRepositoryError::VersionMismatch { expected } => Error::conflict(format!(
            "tender was modified concurrently; version {expected} is stale"
        )),
    }
}

fn edit_error(error: TenderValidationError) -> Error {
    let field = match error {
        TenderValidationError::EmptyName => "name",
        TenderValidationError::EmptyServiceType => "serviceType",
        _ => "body",
    };
    invalid_field(field, error)
}

fn parse_tender_id(raw: &str) -> Result<TenderId, Error> {
    parse_input("tenderId", raw, |raw| TenderId::new(raw))
}

/// Tender service implementing the tender driving ports.
#[derive(Clone)]
pub struct TenderService<T, U> {
    tenders: Arc<T>,
    users: Arc<U>,
}

impl<T, U> TenderService<T, U> {
    /// Create a service over the tender store and user directory.
    pub fn new(tenders: Arc<T>, users: Arc<U>) -> Self {
        Self { tenders, users }
    }
}

impl<T, U> TenderService<T, U>
where
    T: TenderRepository,
    U: UserDirectory,
{
    async fn load_tender(&self, tender_id: &TenderId) -> Result<Tender, Error> {
        debug!(%tender_id, "loading tender");
        self.tenders
            .find_by_id(tender_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::tender_not_found(format!("tender {tender_id} not found")))
    }

    async fn can_manage(&self, tender: &Tender, user: &User) -> Result<bool, Error> {
        if tender.is_created_by(user.id()) {
            return Ok(true);
        }
        is_responsible(self.users.as_ref(), user.id(), &tender.organization_id).await
    }

    /// Load the tender, resolve the caller and check they may manage it.
    async fn load_managed(
        &self,
        tender_id: &TenderId,
        username: &Username,
    ) -> Result<Tender, Error> {
        let tender = self.load_tender(tender_id).await?;
        let user = resolve_username(self.users.as_ref(), username).await?;
        if !self.can_manage(&tender, &user).await? {
            warn!(%tender_id, %username, "tender access denied");
            return Err(Error::forbidden(format!(
                "user {username} may not manage tender {tender_id}"
            )));
        }
        Ok(tender)
    }

    async fn persist_fields(&self, tender: Tender) -> Result<Tender, Error> {
        let expected = tender.version;
        let updated = self
            .tenders
            .update_fields(&tender, expected)
            .await
            .map_err(map_repository_error)?;
        info!(
            tender_id = %updated.id,
            version = %updated.version,
            "tender fields updated"
        );
        Ok(updated)
    }
}

#[async_trait]
impl<T, U> TenderCommand for TenderService<T, U>
where
    T: TenderRepository,
    U: UserDirectory,
{
    async fn create_tender(&self, request: CreateTenderRequest) -> Result<Tender, Error> {
        let draft = TenderDraft {
            name: parse_input("name", &request.name, |raw| TenderName::new(raw))?,
            description: request.description,
            service_type: parse_input("serviceType", &request.service_type, |raw| {
                ServiceType::new(raw)
            })?,
            status: parse_input("status", &request.status, |raw| raw.parse::<TenderStatus>())?,
            organization_id: parse_input("organizationId", &request.organization_id, |raw| {
                OrganizationId::new(raw)
            })?,
        };
        let username = parse_input("creatorUsername", &request.creator_username, |raw| {
            Username::new(raw)
        })?;
        let creator = resolve_username(self.users.as_ref(), &username).await?;

        let tender = self
            .tenders
            .create(draft.with_creator(creator.id().clone()))
            .await
            .map_err(map_repository_error)?;
        info!(tender_id = %tender.id, creator = %username, "tender created");
        Ok(tender)
    }

    async fn update_tender_status(
        &self,
        request: UpdateTenderStatusRequest,
    ) -> Result<Tender, Error> {
        let tender_id = parse_tender_id(&request.tender_id)?;
        let status = parse_input("status", &request.status, |raw| raw.parse::<TenderStatus>())?;
        let username = parse_username(&request.username)?;

        let mut tender = self.load_managed(&tender_id, &username).await?;
        let expected = tender.version;
        tender.status = status;
        let updated = self
            .tenders
            .update_status(&tender, expected)
            .await
            .map_err(map_repository_error)?;
        info!(%tender_id, %status, version = %updated.version, "tender status updated");
        Ok(updated)
    }

    async fn edit_tender(&self, request: EditTenderRequest) -> Result<Tender, Error> {
        let tender_id = parse_tender_id(&request.tender_id)?;
        let username = parse_username(&request.username)?;
        let edit = TenderEdit::new(request.name, request.description, request.service_type)
            .map_err(edit_error)?;

        let mut tender = self.load_managed(&tender_id, &username).await?;
        if edit.is_empty() {
            debug!(%tender_id, "empty tender edit; nothing to persist");
            return Ok(tender);
        }
        tender.apply_edit(&edit);
        self.persist_fields(tender).await
    }

    async fn rollback_tender(&self, request: RollbackTenderRequest) -> Result<Tender, Error> {
        let tender_id = parse_tender_id(&request.tender_id)?;
        let version = parse_input("version", &request.version, |raw| {
            raw.parse::<TenderVersion>()
        })?;
        let username = parse_username(&request.username)?;

        let mut tender = self.load_managed(&tender_id, &username).await?;
        let snapshot = self
            .tenders
            .find_history(&tender_id, version)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::tender_history_not_found(format!(
                    "tender {tender_id} has no version {version}"
                ))
            })?;

        tender.restore(&snapshot);
        info!(%tender_id, restored = %version, "rolling tender back");
        self.persist_fields(tender).await
    }
}

#[async_trait]
impl<T, U> TenderQuery for TenderService<T, U>
where
    T: TenderRepository,
    U: UserDirectory,
{
    async fn tender_status(&self, request: TenderStatusRequest) -> Result<TenderStatus, Error> {
        let tender_id = parse_tender_id(&request.tender_id)?;
        let username = parse_username(&request.username)?;
        let tender = self.load_managed(&tender_id, &username).await?;
        Ok(tender.status)
    }

    async fn list_tenders(&self, request: ListTendersRequest) -> Result<Vec<Tender>, Error> {
        let filter = match request.service_type {
            Some(raw) if !raw.trim().is_empty() => {
                Some(parse_input("serviceType", &raw, |raw| ServiceType::new(raw))?)
            }
            _ => None,
        };
        self.tenders
            .list_by_service_type(filter)
            .await
            .map_err(map_repository_error)
    }

    async fn list_user_tenders(&self, request: UserTendersRequest) -> Result<Vec<Tender>, Error> {
        let username = parse_username(&request.username)?;
        let user = resolve_username(self.users.as_ref(), &username).await?;
        self.tenders
            .list_by_creator(user.id())
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "tender_service_tests.rs"]
mod tests;
