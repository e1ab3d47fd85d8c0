//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{BidCommand, BidQuery, TenderCommand, TenderQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Tender mutations.
    pub tenders: Arc<dyn TenderCommand>,
    /// Tender lookups.
    pub tenders_query: Arc<dyn TenderQuery>,
    /// Bid mutations.
    pub bids: Arc<dyn BidCommand>,
    /// Bid lookups.
    pub bids_query: Arc<dyn BidQuery>,
}

impl HttpState {
    /// Construct state from a service implementing both tender ports and a
    /// service implementing both bid ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use tender_backend::domain::{BidService, TenderService};
    /// use tender_backend::inbound::http::state::HttpState;
    /// use tender_backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::default());
    /// let tenders = Arc::new(TenderService::new(store.clone(), store.clone()));
    /// let bids = Arc::new(BidService::new(store.clone(), store.clone(), store));
    /// let state = HttpState::from_services(tenders, bids);
    /// let _tenders = state.tenders.clone();
    /// ```
    pub fn from_services<T, B>(tenders: Arc<T>, bids: Arc<B>) -> Self
    where
        T: TenderCommand + TenderQuery + 'static,
        B: BidCommand + BidQuery + 'static,
    {
        Self {
            tenders: tenders.clone(),
            tenders_query: tenders,
            bids: bids.clone(),
            bids_query: bids,
        }
    }
}
