//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and never derive `ToSchema`. The
//! wrappers below mirror their serialised shape and are registered with utoipa
//! under the domain type's path.

#![expect(
    dead_code,
    reason = "Schema wrappers exist only for OpenAPI generation via utoipa"
)]

use utoipa::ToSchema;

/// Stable machine-readable error codes.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "conflict")]
    Conflict,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// API error payload.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "windowDays must be between 1 and 90")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "9b2f4a7e-2d1c-4c8e-8a55-0d9f3b8b6c11")]
    trace_id: Option<String>,
    details: Option<serde_json::Value>,
}

/// Account role.
#[derive(ToSchema)]
#[schema(as = crate::domain::Role)]
pub enum RoleSchema {
    #[schema(rename = "admin")]
    Admin,
    #[schema(rename = "member")]
    Member,
}

/// Public view of an account.
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[schema(rename_all = "camelCase")]
pub struct UserSchema {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "user1")]
    username: String,
    role: RoleSchema,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// Logged interaction between two users.
#[derive(ToSchema)]
#[schema(as = crate::domain::Interaction)]
#[schema(rename_all = "camelCase")]
pub struct InteractionSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(value_type = String, format = Uuid)]
    subject_id: String,
    #[schema(value_type = String, format = Uuid)]
    counterpart_id: String,
    #[schema(value_type = String, format = DateTime)]
    occurred_at: String,
    #[schema(example = 15)]
    duration_minutes: u32,
    notes: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    recorded_at: String,
}

/// Reported case.
#[derive(ToSchema)]
#[schema(as = crate::domain::Case)]
#[schema(rename_all = "camelCase")]
pub struct CaseSchema {
    id: i64,
    #[schema(value_type = String, format = Uuid)]
    subject_id: String,
    #[schema(value_type = String, format = Uuid)]
    reported_by: String,
    #[schema(value_type = String, format = DateTime)]
    reported_at: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// Simulated notification.
#[derive(ToSchema)]
#[schema(as = crate::domain::Notification)]
#[schema(rename_all = "camelCase")]
pub struct NotificationSchema {
    id: i64,
    #[schema(value_type = String, format = Uuid)]
    user_id: String,
    message: String,
    #[schema(value_type = String, format = Uuid)]
    simulated_by: String,
    case_id: Option<i64>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    read: bool,
}

/// Saved notification template.
#[derive(ToSchema)]
#[schema(as = crate::domain::NotificationTemplate)]
#[schema(rename_all = "camelCase")]
pub struct NotificationTemplateSchema {
    id: i64,
    #[schema(example = "template-1")]
    name: String,
    message: String,
    #[schema(value_type = Option<String>, format = Uuid)]
    created_by: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// One primary contact of a traced subject.
#[derive(ToSchema)]
#[schema(as = crate::domain::TraceResult)]
#[schema(rename_all = "camelCase")]
pub struct TraceResultSchema {
    #[schema(value_type = String, format = Uuid)]
    contact_id: String,
    #[schema(example = "user1")]
    display_name: String,
    #[schema(value_type = String, format = DateTime)]
    last_contact_at: String,
    #[schema(example = 30)]
    duration_minutes: u32,
}
