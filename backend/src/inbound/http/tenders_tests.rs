//! Tests for tender HTTP handlers.

use super::*;
use crate::domain::Error;
use crate::domain::test_fixtures::{TENDER_1, sample_tender};
use crate::inbound::http::test_utils::MockPorts;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};

async fn call(
    ports: MockPorts,
    request: actix_test::TestRequest,
) -> actix_web::dev::ServiceResponse {
    let app = actix_test::init_service(
        App::new()
            .app_data(ports.into_state())
            .service(web::scope("/api").configure(configure)),
    )
    .await;
    actix_test::call_service(&app, request.to_request()).await
}

#[rstest]
#[actix_web::test]
async fn list_tenders_passes_filter_through() {
    let mut ports = MockPorts::default();
    ports
        .tenders_query
        .expect_list_tenders()
        .withf(|req| req.service_type.as_deref() == Some("Construction"))
        .times(1)
        .returning(|_| Ok(vec![sample_tender()]));

    let res = call(
        ports,
        actix_test::TestRequest::get().uri("/api/tenders?service_type=Construction"),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body[0]["id"], TENDER_1);
    assert_eq!(body[0]["serviceType"], "Construction");
}

#[rstest]
#[actix_web::test]
async fn list_tenders_without_filter_lists_everything() {
    let mut ports = MockPorts::default();
    ports
        .tenders_query
        .expect_list_tenders()
        .withf(|req| req.service_type.is_none())
        .returning(|_| Ok(Vec::new()));

    let res = call(ports, actix_test::TestRequest::get().uri("/api/tenders")).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!([]));
}

#[rstest]
#[actix_web::test]
async fn create_tender_defaults_status_to_created() {
    let mut ports = MockPorts::default();
    ports
        .tenders
        .expect_create_tender()
        .withf(|req| {
            req.status == "CREATED" && req.creator_username == "alice" && req.name == "Road"
        })
        .times(1)
        .returning(|_| Ok(sample_tender()));

    let res = call(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/tenders/new")
            .set_json(json!({
                "name": "Road",
                "description": "Resurface the high street",
                "serviceType": "Construction",
                "organizationId": "550e8400-e29b-41d4-a716-446655440020",
                "creatorUsername": "alice"
            })),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["version"], 1);
}

#[rstest]
#[actix_web::test]
async fn unknown_creator_is_unauthorised() {
    let mut ports = MockPorts::default();
    ports
        .tenders
        .expect_create_tender()
        .returning(|_| Err(Error::user_not_found("user not found")));

    let res = call(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/tenders/new")
            .set_json(json!({ "name": "Road", "creatorUsername": "ghost" })),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "user_not_found");
}

#[rstest]
#[actix_web::test]
async fn user_tenders_requires_username() {
    let res = call(
        MockPorts::default(),
        actix_test::TestRequest::get().uri("/api/tenders/my"),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "username");
}

#[rstest]
#[actix_web::test]
async fn tender_status_is_a_json_string() {
    let mut ports = MockPorts::default();
    ports
        .tenders_query
        .expect_tender_status()
        .withf(|req| req.tender_id == TENDER_1 && req.username == "alice")
        .returning(|_| Ok(TenderStatus::Published));

    let res = call(
        ports,
        actix_test::TestRequest::get()
            .uri(&format!("/api/tenders/{TENDER_1}/status?username=alice")),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!("PUBLISHED"));
}

#[rstest]
#[case(Error::invalid_request("tenderId must be a valid UUID"), StatusCode::BAD_REQUEST)]
#[case(Error::tender_not_found("tender not found"), StatusCode::NOT_FOUND)]
#[case(Error::forbidden("insufficient permissions"), StatusCode::FORBIDDEN)]
#[case(Error::conflict("tender changed concurrently"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("store unreachable"), StatusCode::SERVICE_UNAVAILABLE)]
#[actix_web::test]
async fn update_status_failures_map_to_statuses(
    #[case] failure: Error,
    #[case] expected: StatusCode,
) {
    let mut ports = MockPorts::default();
    ports
        .tenders
        .expect_update_tender_status()
        .times(1)
        .returning(move |_| Err(failure.clone()));

    let res = call(
        ports,
        actix_test::TestRequest::put()
            .uri(&format!("/api/tenders/{TENDER_1}/status?status=PUBLISHED&username=alice")),
    )
    .await;

    assert_eq!(res.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn update_status_requires_status_param() {
    let res = call(
        MockPorts::default(),
        actix_test::TestRequest::put()
            .uri(&format!("/api/tenders/{TENDER_1}/status?username=alice")),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "status");
}

#[rstest]
#[actix_web::test]
async fn edit_forwards_only_supplied_fields() {
    let mut ports = MockPorts::default();
    ports
        .tenders
        .expect_edit_tender()
        .withf(|req| {
            req.name.as_deref() == Some("Bridge")
                && req.description.is_none()
                && req.service_type.is_none()
        })
        .times(1)
        .returning(|_| Ok(sample_tender()));

    let res = call(
        ports,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/tenders/{TENDER_1}/edit?username=alice"))
            .set_json(json!({ "name": "Bridge" })),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[case::put(actix_test::TestRequest::put())]
#[case::post(actix_test::TestRequest::post())]
#[actix_web::test]
async fn rollback_passes_raw_version(#[case] request: actix_test::TestRequest) {
    let mut ports = MockPorts::default();
    ports
        .tenders
        .expect_rollback_tender()
        .withf(|req| req.tender_id == TENDER_1 && req.version == "2" && req.username == "alice")
        .times(1)
        .returning(|_| Ok(sample_tender()));

    let res = call(
        ports,
        request.uri(&format!("/api/tenders/{TENDER_1}/rollback/2?username=alice")),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn missing_history_is_not_found() {
    let mut ports = MockPorts::default();
    ports
        .tenders
        .expect_rollback_tender()
        .returning(|_| Err(Error::tender_history_not_found("no such version")));

    let res = call(
        ports,
        actix_test::TestRequest::put()
            .uri(&format!("/api/tenders/{TENDER_1}/rollback/9?username=alice")),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "tender_history_not_found");
}
