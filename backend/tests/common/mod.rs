//! Shared harness for HTTP tests over the in-memory store.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::test::{self as actix_test, TestRequest};
use actix_web::{App, web};
use serde_json::Value;
use tender_backend::Trace;
use tender_backend::domain::{
    BidService, OrganizationId, TenderService, User, UserId, Username,
};
use tender_backend::inbound::http::configure_api;
use tender_backend::inbound::http::state::HttpState;
use tender_backend::outbound::memory::InMemoryStore;

pub const ALICE: &str = "alice";
pub const ALICE_ID: &str = "11111111-1111-1111-1111-111111111111";
pub const BOB: &str = "bob";
pub const BOB_ID: &str = "22222222-2222-2222-2222-222222222222";
pub const CAROL: &str = "carol";
pub const CAROL_ID: &str = "33333333-3333-3333-3333-333333333333";
pub const ORG_A: &str = "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa";
pub const ORG_B: &str = "bbbbbbbb-bbbb-bbbb-bbbb-bbbbbbbbbbbb";
pub const UNKNOWN_ID: &str = "99999999-9999-9999-9999-999999999999";

fn user(id: &str, name: &str) -> User {
    User::new(
        UserId::new(id).expect("fixture user id"),
        Username::new(name).expect("fixture username"),
    )
}

/// Store with three users. Carol is responsible for `ORG_A`; Bob for
/// `ORG_B`; Alice for nothing.
pub fn seeded_store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::default());
    store.insert_user(user(ALICE_ID, ALICE));
    store.insert_user(user(BOB_ID, BOB));
    store.insert_user(user(CAROL_ID, CAROL));
    store.grant_responsibility(
        UserId::new(CAROL_ID).expect("fixture user id"),
        OrganizationId::new(ORG_A).expect("fixture org id"),
    );
    store.grant_responsibility(
        UserId::new(BOB_ID).expect("fixture user id"),
        OrganizationId::new(ORG_B).expect("fixture org id"),
    );
    store
}

/// Application serving the `/api` scope over `store`.
pub fn test_app(
    store: Arc<InMemoryStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let tenders = Arc::new(TenderService::new(store.clone(), store.clone()));
    let bids = Arc::new(BidService::new(store.clone(), store.clone(), store));
    let state = HttpState::from_services(tenders, bids);
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(web::scope("/api").configure(configure_api))
}

/// Initialised test application.
pub trait TestService:
    Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{
}

impl<S> TestService for S where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{
}

/// Send `request` through `app`.
pub async fn send(app: &impl TestService, request: TestRequest) -> ServiceResponse {
    actix_test::call_service(app, request.to_request()).await
}

/// Read a JSON response body.
pub async fn json_body(response: ServiceResponse) -> Value {
    actix_test::read_body_json(response).await
}
