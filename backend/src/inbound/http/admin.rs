//! Administrator endpoints: tracing, cases, notification simulation,
//! templates and the global listings.
//!
//! Every handler checks the session role before touching a port; the
//! services themselves never look at roles.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::domain::ports::{ReportCaseRequest, SimulateNotifyRequest};
use crate::domain::{
    Case, CaseId, Interaction, NewNotificationTemplate, NotificationTemplate, TraceRequest,
    TraceResult, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::notifications::NotificationEnvelope;
use crate::inbound::http::schemas::{
    CaseSchema, ErrorSchema, InteractionSchema, NotificationTemplateSchema, TraceResultSchema,
    UserSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_trace_validation_error, parse_optional_rfc3339_timestamp, require_user_id,
};

const USER_ID: FieldName = FieldName::new("userId");
const REPORTED_AT: FieldName = FieldName::new("reportedAt");

/// Body for `POST /api/v1/admin/trace`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TraceBody {
    /// User whose contacts are traced.
    #[serde(default)]
    pub case_user_id: Option<String>,
    /// Whole days in `[1, 90]`; absent, null or non-numeric means 14.
    /// Numeric strings are accepted.
    #[serde(default)]
    #[schema(value_type = Option<u16>, example = 14)]
    pub window_days: Option<Value>,
}

/// Body for `POST /api/v1/admin/cases`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportCaseBody {
    #[serde(default)]
    pub user_id: Option<String>,
    /// RFC 3339 timestamp; defaults to now.
    #[serde(default)]
    pub reported_at: Option<String>,
}

/// `{ "ok": true, "case": ... }`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CaseEnvelope {
    pub ok: bool,
    #[schema(value_type = CaseSchema)]
    pub case: Case,
}

/// Body for `POST /api/v1/admin/simulate-notify`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimulateNotifyBody {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub case_id: Option<i64>,
}

/// Body for `POST /api/v1/admin/notification-templates`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateBody {
    /// Defaults to `template-<id>`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `{ "ok": true, "template": ... }`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TemplateEnvelope {
    pub ok: bool,
    #[schema(value_type = NotificationTemplateSchema)]
    pub template: NotificationTemplate,
}

/// Primary contacts of a subject within the lookback window.
#[utoipa::path(
    post,
    path = "/api/v1/admin/trace",
    request_body = TraceBody,
    responses(
        (status = 200, description = "Primary contacts, most recent first", body = [TraceResultSchema]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin only", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "traceContacts"
)]
#[post("/admin/trace")]
pub async fn trace_contacts(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<TraceBody>,
) -> ApiResult<web::Json<Vec<TraceResult>>> {
    let admin = session.require_admin()?;
    let request = TraceRequest::try_from_parts(
        payload.case_user_id.as_deref(),
        payload.window_days.as_ref(),
    )
    .map_err(map_trace_validation_error)?;

    let results = state.trace.trace(&request).await?;
    info!(
        admin = %admin.id,
        subject = %request.subject_id,
        window_days = request.window.days(),
        contacts = results.len(),
        "contact trace completed"
    );
    Ok(web::Json(results))
}

/// Record a positive case for a user.
#[utoipa::path(
    post,
    path = "/api/v1/admin/cases",
    request_body = ReportCaseBody,
    responses(
        (status = 200, description = "Case recorded", body = CaseEnvelope),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin only", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "reportCase"
)]
#[post("/admin/cases")]
pub async fn report_case(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ReportCaseBody>,
) -> ApiResult<web::Json<CaseEnvelope>> {
    let admin = session.require_admin()?;
    let ReportCaseBody {
        user_id,
        reported_at,
    } = payload.into_inner();
    let request = ReportCaseRequest {
        subject_id: require_user_id(user_id, USER_ID)?,
        reported_by: admin.id,
        reported_at: parse_optional_rfc3339_timestamp(reported_at, REPORTED_AT)?,
    };

    let case = state.cases.report_case(request).await?;
    Ok(web::Json(CaseEnvelope { ok: true, case }))
}

/// Every case, most recently reported first.
#[utoipa::path(
    get,
    path = "/api/v1/admin/cases",
    responses(
        (status = 200, description = "Cases", body = [CaseSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin only", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listCases"
)]
#[get("/admin/cases")]
pub async fn list_cases(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Case>>> {
    session.require_admin()?;
    Ok(web::Json(state.cases_query.list_cases().await?))
}

/// Record a simulated primary-contact notice for a user.
#[utoipa::path(
    post,
    path = "/api/v1/admin/simulate-notify",
    request_body = SimulateNotifyBody,
    responses(
        (status = 200, description = "Notification recorded", body = NotificationEnvelope),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin only", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "simulateNotify"
)]
#[post("/admin/simulate-notify")]
pub async fn simulate_notify(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SimulateNotifyBody>,
) -> ApiResult<web::Json<NotificationEnvelope>> {
    let admin = session.require_admin()?;
    let SimulateNotifyBody { user_id, case_id } = payload.into_inner();
    let request = SimulateNotifyRequest {
        target: require_user_id(user_id, USER_ID)?,
        triggered_by: admin.id,
        case_id: case_id.map(CaseId::new),
    };

    let notification = state.notifications.simulate_notify(request).await?;
    Ok(web::Json(NotificationEnvelope::ok(notification)))
}

/// Every account ordered by username.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin only", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListUsers"
)]
#[get("/admin/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<User>>> {
    session.require_admin()?;
    Ok(web::Json(state.users.list_users().await?))
}

/// The whole interaction log, most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/admin/interactions",
    responses(
        (status = 200, description = "Interactions", body = [InteractionSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin only", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listAllInteractions"
)]
#[get("/admin/interactions")]
pub async fn list_all_interactions(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Interaction>>> {
    session.require_admin()?;
    Ok(web::Json(state.interactions_query.list_all().await?))
}

/// Saved notification templates.
#[utoipa::path(
    get,
    path = "/api/v1/admin/notification-templates",
    responses(
        (status = 200, description = "Templates", body = [NotificationTemplateSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin only", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listNotificationTemplates"
)]
#[get("/admin/notification-templates")]
pub async fn list_templates(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<NotificationTemplate>>> {
    session.require_admin()?;
    Ok(web::Json(state.notifications_query.list_templates().await?))
}

/// Save a notification template.
#[utoipa::path(
    post,
    path = "/api/v1/admin/notification-templates",
    request_body = TemplateBody,
    responses(
        (status = 200, description = "Template stored", body = TemplateEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin only", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "createNotificationTemplate"
)]
#[post("/admin/notification-templates")]
pub async fn create_template(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<TemplateBody>,
) -> ApiResult<web::Json<TemplateEnvelope>> {
    let admin = session.require_admin()?;
    let TemplateBody { name, message } = payload.into_inner();
    let template = state
        .notifications
        .create_template(NewNotificationTemplate::new(name, message, Some(admin.id)))
        .await?;
    Ok(web::Json(TemplateEnvelope { ok: true, template }))
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
