//! Tests for the interaction handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{MemoryHarness, admin_cookie, api_app, member_cookie};

async fn body_json(response: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("JSON body")
}

#[actix_web::test]
async fn logging_returns_the_new_id_and_lists_it_for_both_parties() {
    let harness = MemoryHarness::seeded();
    let admin_id = harness.user_id("admin").await;
    let app = actix_test::init_service(api_app(harness.state.clone())).await;
    let member = member_cookie(&app).await;

    let logged = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/interactions")
            .cookie(member.clone())
            .set_json(json!({
                "counterpartId": admin_id.to_string(),
                "occurredAt": "2026-03-14T09:30:00Z",
                "durationMinutes": 20,
                "notes": "lunch"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(logged.status(), StatusCode::OK);
    let body = body_json(logged).await;
    assert_eq!(body["ok"], true);
    assert!(body["id"].as_i64().is_some());

    let admin = admin_cookie(&app).await;
    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/interactions")
            .cookie(admin)
            .to_request(),
    )
    .await;
    let rows = body_json(listed).await;
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["durationMinutes"], 20);
    assert_eq!(rows[0]["counterpartId"], admin_id.to_string());
}

#[actix_web::test]
async fn legacy_field_names_are_accepted() {
    let harness = MemoryHarness::seeded();
    let admin_id = harness.user_id("admin").await;
    let app = actix_test::init_service(api_app(harness.state.clone())).await;
    let member = member_cookie(&app).await;

    let logged = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/interactions")
            .cookie(member)
            .set_json(json!({
                "contactUserId": admin_id.to_string(),
                "when": "2026-03-14T09:30:00Z"
            }))
            .to_request(),
    )
    .await;

    assert_eq!(logged.status(), StatusCode::OK);
}

#[rstest]
#[case(json!({}), "counterpartId required")]
#[case(json!({ "counterpartId": "nope" }), "counterpartId must be a valid user id")]
#[case(
    json!({ "counterpartId": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "occurredAt": "yesterday" }),
    "occurredAt must be an RFC 3339 timestamp"
)]
#[actix_web::test]
async fn invalid_bodies_are_rejected(#[case] payload: Value, #[case] message: &str) {
    let harness = MemoryHarness::seeded();
    let app = actix_test::init_service(api_app(harness.state.clone())).await;
    let member = member_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/interactions")
            .cookie(member)
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], message);
}

#[rstest]
#[case(-1)]
#[case(3_000_000_000)]
#[actix_web::test]
async fn out_of_range_duration_is_rejected(#[case] minutes: i64) {
    let harness = MemoryHarness::seeded();
    let admin_id = harness.user_id("admin").await;
    let app = actix_test::init_service(api_app(harness.state.clone())).await;
    let member = member_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/interactions")
            .cookie(member)
            .set_json(json!({ "counterpartId": admin_id.to_string(), "durationMinutes": minutes }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "durationMinutes must be a non-negative integer"
    );
    let stored = crate::domain::ports::InteractionLog::list_all(&*harness.store)
        .await
        .expect("log");
    assert!(stored.is_empty());
}

#[actix_web::test]
async fn members_cannot_list_other_users() {
    let harness = MemoryHarness::seeded();
    let admin_id = harness.user_id("admin").await;
    let app = actix_test::init_service(api_app(harness.state.clone())).await;
    let admin = admin_cookie(&app).await;
    let stranger = crate::domain::UserId::random();

    actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/interactions")
            .cookie(admin)
            .set_json(json!({ "counterpartId": stranger.to_string() }))
            .to_request(),
    )
    .await;

    let member = member_cookie(&app).await;
    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/interactions?userId={admin_id}"))
            .cookie(member)
            .to_request(),
    )
    .await;

    assert_eq!(listed.status(), StatusCode::OK);
    assert_eq!(body_json(listed).await, json!([]));
}

#[actix_web::test]
async fn admins_can_target_another_user() {
    let harness = MemoryHarness::seeded();
    let member_id = harness.user_id("user1").await;
    let app = actix_test::init_service(api_app(harness.state.clone())).await;
    let member = member_cookie(&app).await;
    let stranger = crate::domain::UserId::random();

    actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/interactions")
            .cookie(member)
            .set_json(json!({ "counterpartId": stranger.to_string() }))
            .to_request(),
    )
    .await;

    let admin = admin_cookie(&app).await;
    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/interactions?userId={member_id}"))
            .cookie(admin)
            .to_request(),
    )
    .await;

    let rows = body_json(listed).await;
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
    assert_eq!(rows[0]["subjectId"], member_id.to_string());
}

#[actix_web::test]
async fn logging_requires_a_session() {
    let harness = MemoryHarness::seeded();
    let app = actix_test::init_service(api_app(harness.state.clone())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/interactions")
            .set_json(json!({ "counterpartId": "3fa85f64-5717-4562-b3fc-2c963f66afa6" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
