//! HTTP inbound adapter exposing the REST endpoints under `/api/v1`.

pub mod admin;
pub mod auth;
pub mod error;
pub mod health;
pub mod interactions;
pub mod notifications;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on the enclosing scope.
///
/// The caller owns the scope so it can attach the session middleware.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::signup)
        .service(auth::login)
        .service(auth::current_user)
        .service(auth::list_users)
        .service(interactions::log_interaction)
        .service(interactions::list_interactions)
        .service(notifications::list_notifications)
        .service(notifications::mark_read)
        .service(admin::trace_contacts)
        .service(admin::report_case)
        .service(admin::list_cases)
        .service(admin::simulate_notify)
        .service(admin::list_users)
        .service(admin::list_all_interactions)
        .service(admin::list_templates)
        .service(admin::create_template);
}

/// JSON extractor settings mapping malformed bodies onto `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(error::json_error_handler)
}
