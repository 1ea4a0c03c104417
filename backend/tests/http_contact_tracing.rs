//! End-to-end walk through the REST API over the in-memory store: signup,
//! interaction logging, case report, trace and simulated notification.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use backend::Trace;
use backend::inbound::http::state::{HttpState, HttpStateRepositories};
use backend::inbound::http::{configure_api, json_config};
use backend::outbound::memory::InMemoryStore;
use backend::test_support::{fixture_clock, fixture_timestamp};
use serde_json::{Value, json};

fn state() -> web::Data<HttpState> {
    let store = Arc::new(InMemoryStore::seeded(fixture_timestamp()));
    web::Data::new(HttpState::from_repositories(
        HttpStateRepositories {
            interactions: store.clone(),
            directory: store.clone(),
            cases: store.clone(),
            notifications: store,
        },
        fixture_clock(),
    ))
}

fn session_cookie(response: &actix_web::dev::ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

#[actix_web::test]
async fn admin_traces_a_reported_case_and_notifies_the_contact() {
    let app = actix_test::init_service(
        App::new()
            .app_data(state())
            .app_data(json_config())
            .wrap(Trace)
            .service(
                web::scope("/api/v1")
                    .wrap(
                        SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                            .cookie_name("session".to_owned())
                            .cookie_secure(false)
                            .build(),
                    )
                    .configure(configure_api),
            ),
    )
    .await;

    let mut members = Vec::new();
    for username in ["alice", "bob"] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/signup")
                .set_json(json!({ "username": username, "password": "pw" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK, "signup {username}");
        let cookie = session_cookie(&response);
        let body: Value = actix_test::read_body_json(response).await;
        let id = body["user"]["id"].as_str().expect("user id").to_owned();
        members.push((id, cookie));
    }
    let (alice_id, alice) = members.remove(0);
    let (bob_id, bob) = members.remove(0);

    let logged = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/interactions")
            .cookie(alice)
            .set_json(json!({ "counterpartId": bob_id, "durationMinutes": 30 }))
            .to_request(),
    )
    .await;
    assert_eq!(logged.status(), StatusCode::OK);

    let login = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "username": "admin", "password": "admin" }))
            .to_request(),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    let admin = session_cookie(&login);

    let case: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/admin/cases")
            .cookie(admin.clone())
            .set_json(json!({ "userId": alice_id }))
            .to_request(),
    )
    .await;
    let case_id = case["case"]["id"].as_i64().expect("case id");

    let contacts: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/admin/trace")
            .cookie(admin.clone())
            .set_json(json!({ "caseUserId": alice_id, "windowDays": 14 }))
            .to_request(),
    )
    .await;
    assert_eq!(
        contacts,
        json!([{
            "contactId": bob_id,
            "displayName": "bob",
            "lastContactAt": "2026-03-15T12:00:00Z",
            "durationMinutes": 30
        }])
    );

    let notified: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/admin/simulate-notify")
            .cookie(admin)
            .set_json(json!({ "userId": bob_id, "caseId": case_id }))
            .to_request(),
    )
    .await;
    let notification_id = notified["notification"]["id"].as_i64().expect("id");

    let inbox: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/notifications")
            .cookie(bob.clone())
            .to_request(),
    )
    .await;
    assert_eq!(inbox.as_array().map(Vec::len), Some(1));
    assert_eq!(inbox[0]["caseId"], case_id);

    let marked: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/notifications/{notification_id}/mark-read"))
            .cookie(bob)
            .to_request(),
    )
    .await;
    assert_eq!(marked["notification"]["read"], true);
}
