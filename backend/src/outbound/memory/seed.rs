//! Startup fixtures for the in-memory store.
//!
//! A seed is a JSON document listing directory users and the organizations
//! each user is responsible for:
//!
//! ```json
//! {
//!   "users": [{ "id": "11111111-1111-1111-1111-111111111111", "username": "alice" }],
//!   "responsibles": [{
//!     "userId": "11111111-1111-1111-1111-111111111111",
//!     "organizationId": "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa"
//!   }]
//! }
//! ```

use serde::Deserialize;

use super::InMemoryStore;
use crate::domain::{OrganizationId, User, UserId};

/// A user's responsibility for one organization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedResponsibility {
    /// Responsible user.
    pub user_id: UserId,
    /// Organization they act for.
    pub organization_id: OrganizationId,
}

/// Users and responsibilities loaded into an [`InMemoryStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemorySeed {
    /// Directory users.
    #[serde(default)]
    pub users: Vec<User>,
    /// Organization responsibilities.
    #[serde(default)]
    pub responsibles: Vec<SeedResponsibility>,
}

impl MemorySeed {
    /// Parse a seed document.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the document is malformed or an
    /// identifier or username fails validation.
    ///
    /// # Examples
    /// ```
    /// use tender_backend::outbound::memory::MemorySeed;
    ///
    /// let seed = MemorySeed::from_json(r#"{ "users": [] }"#).expect("valid seed");
    /// assert!(seed.users.is_empty());
    /// assert!(MemorySeed::from_json(r#"{ "users": [{ "id": "x" }] }"#).is_err());
    /// ```
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl InMemoryStore {
    /// Load every user and responsibility in `seed`.
    ///
    /// Returns `false` when the store lock is poisoned.
    pub fn apply_seed(&self, seed: &MemorySeed) -> bool {
        self.lock()
            .map(|mut state| {
                for user in &seed.users {
                    state.users.insert(user.id().clone(), user.clone());
                }
                for grant in &seed.responsibles {
                    state
                        .responsibles
                        .insert((grant.user_id.clone(), grant.organization_id.clone()));
                }
            })
            .is_ok()
    }
}
