//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes, the
//! schema wrappers from [`crate::inbound::http::schemas`] and the session
//! cookie security scheme. The document backs Swagger UI in debug builds and
//! the `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::admin::{
    CaseEnvelope, ReportCaseBody, SimulateNotifyBody, TemplateBody, TemplateEnvelope, TraceBody,
};
use crate::inbound::http::auth::{LoginRequest, SignupRequest, UserEnvelope};
use crate::inbound::http::health::{ProbeBody, StorageBackend};
use crate::inbound::http::interactions::{LogInteractionBody, LoggedInteraction};
use crate::inbound::http::notifications::NotificationEnvelope;
use crate::inbound::http::schemas::{
    CaseSchema, ErrorCodeSchema, ErrorSchema, InteractionSchema, NotificationSchema,
    NotificationTemplateSchema, RoleSchema, TraceResultSchema, UserSchema,
};

/// Adds the `SessionCookie` security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login or /api/v1/auth/signup.",
            ))),
        );
    }
}

/// OpenAPI document for the contact tracing API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Contact tracing API",
        description = "Interaction log, case register, primary contact tracing and simulated notifications."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::current_user,
        crate::inbound::http::auth::list_users,
        crate::inbound::http::interactions::log_interaction,
        crate::inbound::http::interactions::list_interactions,
        crate::inbound::http::notifications::list_notifications,
        crate::inbound::http::notifications::mark_read,
        crate::inbound::http::admin::trace_contacts,
        crate::inbound::http::admin::report_case,
        crate::inbound::http::admin::list_cases,
        crate::inbound::http::admin::simulate_notify,
        crate::inbound::http::admin::list_users,
        crate::inbound::http::admin::list_all_interactions,
        crate::inbound::http::admin::list_templates,
        crate::inbound::http::admin::create_template,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RoleSchema,
        UserSchema,
        InteractionSchema,
        CaseSchema,
        NotificationSchema,
        NotificationTemplateSchema,
        TraceResultSchema,
        SignupRequest,
        LoginRequest,
        UserEnvelope,
        LogInteractionBody,
        LoggedInteraction,
        NotificationEnvelope,
        TraceBody,
        ReportCaseBody,
        CaseEnvelope,
        SimulateNotifyBody,
        TemplateBody,
        TemplateEnvelope,
        ProbeBody,
        StorageBackend,
    )),
    tags(
        (name = "auth", description = "Signup, login and the user listing"),
        (name = "interactions", description = "Logging and reading interactions"),
        (name = "notifications", description = "Simulated notifications for the session user"),
        (name = "admin", description = "Tracing, cases and notification simulation"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
