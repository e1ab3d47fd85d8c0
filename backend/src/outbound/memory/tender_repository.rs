//! In-memory tender store with version history.

use async_trait::async_trait;
use tracing::debug;

use super::{InMemoryStore, Poisoned, State};
use crate::domain::ports::{TenderRepository, TenderRepositoryError};
use crate::domain::{
    NewTender, ServiceType, Tender, TenderHistory, TenderId, TenderVersion, UserId,
};

impl From<Poisoned> for TenderRepositoryError {
    fn from(_: Poisoned) -> Self {
        Self::query("tender store lock poisoned")
    }
}

fn sorted(mut tenders: Vec<Tender>) -> Vec<Tender> {
    tenders.sort_by(|left, right| {
        left.name
            .as_ref()
            .cmp(right.name.as_ref())
            .then_with(|| left.id.as_uuid().cmp(right.id.as_uuid()))
    });
    tenders
}

impl InMemoryStore {
    /// Snapshot the stored tender, bump its version and store `apply`'s
    /// result, all under one lock.
    fn bump_tender<F>(
        &self,
        tender: &Tender,
        expected_version: TenderVersion,
        apply: F,
    ) -> Result<Tender, TenderRepositoryError>
    where
        F: FnOnce(&mut Tender, &Tender),
    {
        let now = self.clock.utc();
        let mut guard = self.lock()?;
        let state: &mut State = &mut guard;
        let stored = state.tenders.get_mut(&tender.id).ok_or_else(|| {
            TenderRepositoryError::query(format!("tender {} does not exist", tender.id))
        })?;
        if stored.version != expected_version {
            return Err(TenderRepositoryError::version_mismatch(
                expected_version.get(),
            ));
        }
        let next = stored.version.next().ok_or_else(|| {
            TenderRepositoryError::query(format!("tender {} version overflow", tender.id))
        })?;

        state
            .history
            .entry(tender.id.clone())
            .or_default()
            .push(TenderHistory::snapshot(stored, now));
        apply(stored, tender);
        stored.version = next;
        stored.updated_at = now;
        debug!(tender_id = %stored.id, version = %next, "tender version bumped");
        Ok(stored.clone())
    }
}

#[async_trait]
impl TenderRepository for InMemoryStore {
    async fn find_by_id(&self, id: &TenderId) -> Result<Option<Tender>, TenderRepositoryError> {
        Ok(self.lock()?.tenders.get(id).cloned())
    }

    async fn create(&self, tender: NewTender) -> Result<Tender, TenderRepositoryError> {
        let now = self.clock.utc();
        let created = Tender {
            id: TenderId::random(),
            name: tender.name,
            description: tender.description,
            service_type: tender.service_type,
            status: tender.status,
            organization_id: tender.organization_id,
            creator_id: tender.creator_id,
            version: TenderVersion::INITIAL,
            created_at: now,
            updated_at: now,
        };
        self.lock()?
            .tenders
            .insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn update_status(
        &self,
        tender: &Tender,
        expected_version: TenderVersion,
    ) -> Result<Tender, TenderRepositoryError> {
        self.bump_tender(tender, expected_version, |stored, source| {
            stored.status = source.status;
        })
    }

    async fn update_fields(
        &self,
        tender: &Tender,
        expected_version: TenderVersion,
    ) -> Result<Tender, TenderRepositoryError> {
        self.bump_tender(tender, expected_version, |stored, source| {
            stored.name = source.name.clone();
            stored.description = source.description.clone();
            stored.service_type = source.service_type.clone();
            stored.status = source.status;
        })
    }

    async fn find_history(
        &self,
        id: &TenderId,
        version: TenderVersion,
    ) -> Result<Option<TenderHistory>, TenderRepositoryError> {
        let state = self.lock()?;
        Ok(state
            .history
            .get(id)
            .and_then(|rows| rows.iter().find(|row| row.version == version))
            .cloned())
    }

    async fn list_by_service_type(
        &self,
        service_type: Option<ServiceType>,
    ) -> Result<Vec<Tender>, TenderRepositoryError> {
        let state = self.lock()?;
        let tenders = state
            .tenders
            .values()
            .filter(|tender| {
                service_type
                    .as_ref()
                    .is_none_or(|wanted| &tender.service_type == wanted)
            })
            .cloned()
            .collect();
        Ok(sorted(tenders))
    }

    async fn list_by_creator(
        &self,
        creator_id: &UserId,
    ) -> Result<Vec<Tender>, TenderRepositoryError> {
        let state = self.lock()?;
        let tenders = state
            .tenders
            .values()
            .filter(|tender| &tender.creator_id == creator_id)
            .cloned()
            .collect();
        Ok(sorted(tenders))
    }
}
