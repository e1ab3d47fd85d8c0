//! Builders wiring the domain services onto a storage backend.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use tender_backend::domain::ports::{BidRepository, TenderRepository, UserDirectory};
use tender_backend::domain::{BidService, TenderService};
use tender_backend::inbound::http::state::HttpState;
use tender_backend::outbound::memory::{InMemoryStore, MemorySeed};
use tender_backend::outbound::persistence::{
    DbPool, DieselBidRepository, DieselTenderRepository, DieselUserDirectory,
};

use super::ServerConfig;

/// Assemble both services over one set of driven ports.
fn http_state_from<T, B, U>(tenders: Arc<T>, bids: Arc<B>, users: Arc<U>) -> HttpState
where
    T: TenderRepository + 'static,
    B: BidRepository + 'static,
    U: UserDirectory + 'static,
{
    let tender_service = Arc::new(TenderService::new(tenders.clone(), users.clone()));
    let bid_service = Arc::new(BidService::new(bids, tenders, users));
    HttpState::from_services(tender_service, bid_service)
}

fn diesel_state(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpState {
    http_state_from(
        Arc::new(DieselTenderRepository::new(pool.clone(), clock.clone())),
        Arc::new(DieselBidRepository::new(pool.clone(), clock)),
        Arc::new(DieselUserDirectory::new(pool.clone())),
    )
}

fn memory_state(clock: Arc<dyn Clock>, seed: Option<&MemorySeed>) -> HttpState {
    let store = Arc::new(InMemoryStore::new(clock));
    match seed {
        Some(seed) if store.apply_seed(seed) => info!(
            users = seed.users.len(),
            responsibles = seed.responsibles.len(),
            "in-memory store seeded"
        ),
        Some(_) => warn!("in-memory store lock poisoned; seed not applied"),
        None => warn!("in-memory store has no seed; every user lookup will fail"),
    }
    http_state_from(store.clone(), store.clone(), store)
}

/// Build handler state, using PostgreSQL when a pool is configured and the
/// in-memory store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL stores");
            diesel_state(pool, clock)
        }
        None => {
            warn!("no database configured; state is kept in memory and lost on restart");
            memory_state(clock, config.memory_seed.as_ref())
        }
    };
    web::Data::new(state)
}
