//! Tender and bid management backend library.
//!
//! The crate follows a hexagonal layout: [`domain`] owns entities, ports and
//! services; [`inbound`] adapts HTTP requests onto the driving ports; and
//! [`outbound`] implements the driven ports over PostgreSQL or memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
