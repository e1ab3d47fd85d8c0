//! Tests for server bootstrap and readiness signalling.

use super::*;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), ServerConfig::new("127.0.0.1:0"))
        .expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[rstest]
#[actix_rt::test]
async fn create_server_rejects_bad_address(health_state: web::Data<HealthState>) {
    let result = create_server(health_state.clone(), ServerConfig::new("not-an-address"));
    assert!(result.is_err());
    assert!(!health_state.is_ready());
}

#[rstest]
#[actix_web::test]
async fn app_serves_ping_and_health_checks(health_state: web::Data<HealthState>) {
    health_state.mark_ready();
    let http_state = build_http_state(&ServerConfig::new("127.0.0.1:0"));
    let app = actix_test::init_service(build_app(health_state, http_state)).await;

    let ping = actix_test::TestRequest::get().uri("/api/ping").to_request();
    let body = actix_test::call_and_read_body(&app, ping).await;
    assert_eq!(body.as_ref(), b"ok");

    let ready_req = actix_test::TestRequest::get().uri("/health/ready").to_request();
    let res = actix_test::call_service(&app, ready_req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("trace-id"));
}

#[rstest]
#[actix_web::test]
async fn memory_backend_reports_unknown_users(health_state: web::Data<HealthState>) {
    let http_state = build_http_state(&ServerConfig::new("127.0.0.1:0"));
    let app = actix_test::init_service(build_app(health_state, http_state)).await;

    let req = actix_test::TestRequest::get()
        .uri("/api/tenders/my?username=nobody")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn memory_backend_resolves_seeded_users(health_state: web::Data<HealthState>) {
    let seed = tender_backend::outbound::memory::MemorySeed::from_json(
        r#"{"users": [{"id": "550e8400-e29b-41d4-a716-446655440000", "username": "alice"}]}"#,
    )
    .expect("seed parses");
    let config = ServerConfig::new("127.0.0.1:0").with_memory_seed(seed);
    let http_state = build_http_state(&config);
    let app = actix_test::init_service(build_app(health_state, http_state)).await;

    let req = actix_test::TestRequest::get()
        .uri("/api/tenders/my?username=alice")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}
