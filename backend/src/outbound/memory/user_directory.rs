//! In-memory user directory.

use async_trait::async_trait;

use super::{InMemoryStore, Poisoned};
use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{OrganizationId, User, UserId, Username};

impl From<Poisoned> for UserDirectoryError {
    fn from(_: Poisoned) -> Self {
        Self::query("user directory lock poisoned")
    }
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserDirectoryError> {
        let state = self.lock()?;
        Ok(state
            .users
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        Ok(self.lock()?.users.get(id).cloned())
    }

    async fn is_organization_responsible(
        &self,
        user_id: &UserId,
        organization_id: &OrganizationId,
    ) -> Result<bool, UserDirectoryError> {
        let state = self.lock()?;
        Ok(state
            .responsibles
            .contains(&(user_id.clone(), organization_id.clone())))
    }
}
