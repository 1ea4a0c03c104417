//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use serde_json::json;

use super::state::{HttpState, HttpStateRepositories};
use crate::Trace;
use crate::domain::UserId;
use crate::domain::ports::UserDirectory;
use crate::outbound::memory::InMemoryStore;
use crate::test_support::{FixtureClock, fixture_clock, fixture_timestamp};

/// Session middleware with a fresh key, cookie name `session` and the
/// `Secure` flag disabled for plain HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Seeded in-memory store, a fixed clock and the state wired over both.
pub struct MemoryHarness {
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<FixtureClock>,
    pub state: web::Data<HttpState>,
}

impl MemoryHarness {
    pub fn seeded() -> Self {
        let store = Arc::new(InMemoryStore::seeded(fixture_timestamp()));
        let clock = fixture_clock();
        let state = HttpState::from_repositories(
            HttpStateRepositories {
                interactions: store.clone(),
                directory: store.clone(),
                cases: store.clone(),
                notifications: store.clone(),
            },
            clock.clone(),
        );
        Self {
            store,
            clock,
            state: web::Data::new(state),
        }
    }

    /// Identifier of a seeded or signed-up account.
    pub async fn user_id(&self, username: &str) -> UserId {
        UserDirectory::find_account(&*self.store, username)
            .await
            .expect("directory lookup")
            .map(|account| account.user.id().clone())
            .expect("account exists")
    }
}

/// Full API surface over `state`, as the server mounts it.
pub fn api_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(super::json_config())
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(test_session_middleware())
                .configure(super::configure_api),
        )
}

/// Log in through the API and return the issued session cookie.
pub async fn login_cookie<S>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(
        response.status().is_success(),
        "login as {username} failed: {}",
        response.status()
    );
    session_cookie(&response)
}

/// Cookie for the seeded `admin` account.
pub async fn admin_cookie<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    login_cookie(app, "admin", "admin").await
}

/// Cookie for the seeded `user1` member account.
pub async fn member_cookie<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    login_cookie(app, "user1", "password").await
}
