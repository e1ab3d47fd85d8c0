//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{MockBidCommand, MockBidQuery, MockTenderCommand, MockTenderQuery};
use crate::inbound::http::state::HttpState;

/// Mocked driving ports. Unconfigured mocks panic when called, so a test
/// only sets expectations on the port its handler should reach.
#[derive(Default)]
pub struct MockPorts {
    pub tenders: MockTenderCommand,
    pub tenders_query: MockTenderQuery,
    pub bids: MockBidCommand,
    pub bids_query: MockBidQuery,
}

impl MockPorts {
    /// Wrap the mocks as shared handler state.
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            tenders: Arc::new(self.tenders),
            tenders_query: Arc::new(self.tenders_query),
            bids: Arc::new(self.bids),
            bids_query: Arc::new(self.bids_query),
        })
    }
}
