//! HTTP inbound adapter exposing REST endpoints.

pub mod bids;
pub mod error;
pub mod health;
pub mod params;
pub mod schemas;
pub mod state;
pub mod tenders;
#[cfg(test)]
pub mod test_utils;
pub(crate) mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the tender and bid handlers plus `/ping` on the `/api` scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use tender_backend::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(health::ping)
        .configure(tenders::configure)
        .configure(bids::configure);
}
