//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`UserDirectory`, `TenderRepository`, `BidRepository`) are
//! implemented by outbound adapters. Driving ports (`TenderCommand`,
//! `TenderQuery`, `BidCommand`, `BidQuery`) are implemented by domain
//! services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod bid_command;
mod bid_query;
mod bid_repository;
mod tender_command;
mod tender_query;
mod tender_repository;
mod user_directory;

#[cfg(test)]
pub use bid_command::MockBidCommand;
pub use bid_command::{
    BidCommand, CreateBidRequest, EditBidRequest, SubmitBidFeedbackRequest,
    UpdateBidStatusRequest,
};
#[cfg(test)]
pub use bid_query::MockBidQuery;
pub use bid_query::{BidQuery, BidStatusRequest, TenderBidsRequest, UserBidsRequest};
#[cfg(test)]
pub use bid_repository::MockBidRepository;
pub use bid_repository::{BidRepository, BidRepositoryError};
#[cfg(test)]
pub use tender_command::MockTenderCommand;
pub use tender_command::{
    CreateTenderRequest, EditTenderRequest, RollbackTenderRequest, TenderCommand,
    UpdateTenderStatusRequest,
};
#[cfg(test)]
pub use tender_query::MockTenderQuery;
pub use tender_query::{ListTendersRequest, TenderQuery, TenderStatusRequest, UserTendersRequest};
#[cfg(test)]
pub use tender_repository::MockTenderRepository;
pub use tender_repository::{TenderRepository, TenderRepositoryError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{UserDirectory, UserDirectoryError};
