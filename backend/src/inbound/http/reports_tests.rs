//! Endpoint coverage for the report lifecycle, including the role gate.

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{json, Value};

use crate::inbound::http::test_utils::{test_app_with, test_state};

async fn register_and_login<S>(app: &S, name: &str, role: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let created = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/user/register")
            .set_json(json!({ "full_name": name, "role": role, "password": "s3cret-pass" }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/token")
            .set_json(json!({ "full_name": name, "password": "s3cret-pass" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let pair: Value = serde_json::from_slice(&actix_test::read_body(response).await).expect("JSON");
    pair["access"].as_str().expect("access token").to_owned()
}

fn report_body() -> Value {
    json!({
        "category": "basic_services_infra",
        "description": "streetlight out on 4th cross",
        "latitude": 12.97,
        "longitude": 77.59,
    })
}

async fn create_report<S>(app: &S, bearer: Option<&str>, body: Value) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut request = actix_test::TestRequest::post()
        .uri("/api/reports")
        .set_json(body);
    if let Some(token) = bearer {
        request = request.insert_header(("Authorization", format!("Bearer {token}")));
    }
    actix_test::call_service(app, request.to_request()).await
}

#[actix_web::test]
async fn anonymous_report_is_pending_and_ownerless() {
    let app = actix_test::init_service(test_app_with(test_state())).await;
    let response = create_report(&app, None, report_body()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let value: Value = serde_json::from_slice(&actix_test::read_body(response).await).expect("JSON");
    assert_eq!(value["status"], "pending");
    assert!(value["owner"].is_null());
}

#[actix_web::test]
async fn client_supplied_status_is_discarded_at_creation() {
    let app = actix_test::init_service(test_app_with(test_state())).await;
    let mut body = report_body();
    body["status"] = json!("resolved");
    let response = create_report(&app, None, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let value: Value = serde_json::from_slice(&actix_test::read_body(response).await).expect("JSON");
    assert_eq!(value["status"], "pending");
}

#[actix_web::test]
async fn authenticated_report_is_attributed_to_the_caller() {
    let app = actix_test::init_service(test_app_with(test_state())).await;
    let token = register_and_login(&app, "Asha Rao", "citizen").await;
    let response = create_report(&app, Some(&token), report_body()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let value: Value = serde_json::from_slice(&actix_test::read_body(response).await).expect("JSON");
    assert_eq!(value["owner"], 1);
}

#[actix_web::test]
async fn garbage_bearer_token_is_unauthorized() {
    let app = actix_test::init_service(test_app_with(test_state())).await;
    let response = create_report(&app, Some("not-a-jwt"), report_body()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn out_of_range_coordinates_are_rejected() {
    let app = actix_test::init_service(test_app_with(test_state())).await;
    let mut body = report_body();
    body["latitude"] = json!(91.0);
    let response = create_report(&app, None, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn citizen_status_patch_is_rejected_without_side_effects() {
    let app = actix_test::init_service(test_app_with(test_state())).await;
    let token = register_and_login(&app, "Asha Rao", "citizen").await;
    let created = create_report(&app, None, report_body()).await;
    let report: Value = serde_json::from_slice(&actix_test::read_body(created).await).expect("JSON");
    let id = report["id"].as_i64().expect("id");

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/reports/{id}"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({ "status": "resolved", "description": "smuggled edit" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The rejection is all or nothing: the description rider was not applied.
    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/reports/{id}"))
            .to_request(),
    )
    .await;
    let value: Value = serde_json::from_slice(&actix_test::read_body(fetched).await).expect("JSON");
    assert_eq!(value["status"], "pending");
    assert_eq!(value["description"], "streetlight out on 4th cross");
}

#[actix_web::test]
async fn anonymous_status_patch_is_forbidden() {
    let app = actix_test::init_service(test_app_with(test_state())).await;
    let created = create_report(&app, None, report_body()).await;
    let report: Value = serde_json::from_slice(&actix_test::read_body(created).await).expect("JSON");
    let id = report["id"].as_i64().expect("id");

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/reports/{id}"))
            .set_json(json!({ "status": "in_progress" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn district_leader_moves_a_report_through_statuses() {
    let app = actix_test::init_service(test_app_with(test_state())).await;
    let token = register_and_login(&app, "Leader Devi", "district_leader").await;
    let created = create_report(&app, None, report_body()).await;
    let report: Value = serde_json::from_slice(&actix_test::read_body(created).await).expect("JSON");
    let id = report["id"].as_i64().expect("id");

    for status in ["in_progress", "resolved", "rejected", "pending"] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::patch()
                .uri(&format!("/api/reports/{id}"))
                .insert_header(("Authorization", format!("Bearer {token}")))
                .set_json(json!({ "status": status }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("JSON");
        assert_eq!(value["status"], status);
    }
}

#[actix_web::test]
async fn non_status_fields_are_open_to_anonymous_callers() {
    let app = actix_test::init_service(test_app_with(test_state())).await;
    let created = create_report(&app, None, report_body()).await;
    let report: Value = serde_json::from_slice(&actix_test::read_body(created).await).expect("JSON");
    let id = report["id"].as_i64().expect("id");

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/reports/{id}"))
            .set_json(json!({ "description": "lamp post 12, 4th cross", "address": "4th cross" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = serde_json::from_slice(&actix_test::read_body(response).await).expect("JSON");
    assert_eq!(value["description"], "lamp post 12, 4th cross");
    assert_eq!(value["address"], "4th cross");
    assert_eq!(value["status"], "pending");
}

#[actix_web::test]
async fn listing_is_newest_first() {
    let app = actix_test::init_service(test_app_with(test_state())).await;
    for n in 1..=3 {
        let mut body = report_body();
        body["description"] = json!(format!("issue number {n}"));
        let response = create_report(&app, None, body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/reports").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = serde_json::from_slice(&actix_test::read_body(response).await).expect("JSON");
    let ids: Vec<i64> = value
        .as_array()
        .expect("array")
        .iter()
        .map(|r| r["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[actix_web::test]
async fn missing_report_is_not_found() {
    let app = actix_test::init_service(test_app_with(test_state())).await;
    for request in [
        actix_test::TestRequest::get().uri("/api/reports/99"),
        actix_test::TestRequest::delete().uri("/api/reports/99"),
    ] {
        let response = actix_test::call_service(&app, request.to_request()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[actix_web::test]
async fn delete_removes_the_report() {
    let app = actix_test::init_service(test_app_with(test_state())).await;
    let created = create_report(&app, None, report_body()).await;
    let report: Value = serde_json::from_slice(&actix_test::read_body(created).await).expect("JSON");
    let id = report["id"].as_i64().expect("id");

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/reports/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/reports/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
}
