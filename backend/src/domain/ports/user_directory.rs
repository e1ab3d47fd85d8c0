//! Port for resolving user identities and organization membership.

use async_trait::async_trait;

use crate::domain::{OrganizationId, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } =>
            "user directory connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } =>
            "user directory query failed: {message}",
    }
}

/// Read-only view over known users and the organizations they act for.
///
/// Lookups return `Ok(None)` for unknown users; only infrastructure
/// failures surface as errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve a user by login name.
    async fn find_by_username(&self, username: &Username)
    -> Result<Option<User>, UserDirectoryError>;

    /// Resolve a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDirectoryError>;

    /// Whether the user is registered as responsible for the organization.
    async fn is_organization_responsible(
        &self,
        user_id: &UserId,
        organization_id: &OrganizationId,
    ) -> Result<bool, UserDirectoryError>;
}
