//! In-memory implementations of the driven ports.
//!
//! [`InMemoryStore`] backs the user directory, the tender store and the bid
//! store with a single mutex-guarded state. Each port call takes the lock
//! once, so a tender update, its version bump and its history snapshot
//! happen in one critical section. Timestamps come from an injected
//! [`mockable::Clock`].
//!
//! The store is used when no database is configured and by HTTP-level tests.
//! Directory users can be loaded at startup from a [`MemorySeed`].

mod bid_repository;
mod seed;
mod tender_repository;
mod user_directory;

pub use seed::{MemorySeed, SeedResponsibility};

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use mockable::{Clock, DefaultClock};

use crate::domain::{
    Bid, BidFeedback, BidId, OrganizationId, Tender, TenderHistory, TenderId, User, UserId,
};

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    responsibles: HashSet<(UserId, OrganizationId)>,
    tenders: HashMap<TenderId, Tender>,
    history: HashMap<TenderId, Vec<TenderHistory>>,
    bids: HashMap<BidId, Bid>,
    feedback: Vec<BidFeedback>,
}

/// Lock poisoning surfaced as a store-specific query failure.
#[derive(Debug)]
struct Poisoned;

/// Mutex-backed store implementing every driven port.
#[derive(Clone)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryStore {
    /// Create an empty store reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            clock,
        }
    }

    /// Register a user in the directory.
    ///
    /// Returns `false` when the store lock is poisoned.
    pub fn insert_user(&self, user: User) -> bool {
        self.lock()
            .map(|mut state| {
                state.users.insert(user.id().clone(), user);
            })
            .is_ok()
    }

    /// Mark `user_id` as responsible for `organization_id`.
    ///
    /// Returns `false` when the store lock is poisoned.
    pub fn grant_responsibility(&self, user_id: UserId, organization_id: OrganizationId) -> bool {
        self.lock()
            .map(|mut state| {
                state.responsibles.insert((user_id, organization_id));
            })
            .is_ok()
    }

    /// Number of feedback records stored for `bid_id`.
    pub fn feedback_count(&self, bid_id: &BidId) -> usize {
        self.lock()
            .map(|state| {
                state
                    .feedback
                    .iter()
                    .filter(|record| &record.bid_id == bid_id)
                    .count()
            })
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, Poisoned> {
        self.state.lock().map_err(|_| Poisoned)
    }
}
