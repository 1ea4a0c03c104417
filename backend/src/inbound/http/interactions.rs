//! Interaction logging endpoints.
//!
//! ```text
//! POST /api/v1/interactions {"counterpartId":"…","durationMinutes":15}
//! GET  /api/v1/interactions?userId=…
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::Interaction;
use crate::domain::ports::LogInteractionRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, InteractionSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_optional_rfc3339_timestamp, parse_user_id, require_user_id,
};

const COUNTERPART_ID: FieldName = FieldName::new("counterpartId");
const OCCURRED_AT: FieldName = FieldName::new("occurredAt");
const USER_ID: FieldName = FieldName::new("userId");

/// Body for `POST /api/v1/interactions`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogInteractionBody {
    /// The other party; `contactUserId` is accepted as an alias.
    #[serde(default, alias = "contactUserId")]
    pub counterpart_id: Option<String>,
    /// RFC 3339 timestamp; `when` is accepted as an alias. Defaults to now.
    #[serde(default, alias = "when")]
    pub occurred_at: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// `{ "ok": true, "id": 7 }`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoggedInteraction {
    pub ok: bool,
    pub id: i64,
}

/// Query string for `GET /api/v1/interactions`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InteractionListQuery {
    /// Target user; honoured for administrators only.
    pub user_id: Option<String>,
}

/// Record an interaction authored by the session user.
#[utoipa::path(
    post,
    path = "/api/v1/interactions",
    request_body = LogInteractionBody,
    responses(
        (status = 200, description = "Interaction logged", body = LoggedInteraction),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["interactions"],
    operation_id = "logInteraction"
)]
#[post("/interactions")]
pub async fn log_interaction(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LogInteractionBody>,
) -> ApiResult<web::Json<LoggedInteraction>> {
    let author = session.require_user()?;
    let LogInteractionBody {
        counterpart_id,
        occurred_at,
        duration_minutes,
        notes,
    } = payload.into_inner();
    let request = LogInteractionRequest {
        author: author.id,
        counterpart_id: require_user_id(counterpart_id, COUNTERPART_ID)?,
        occurred_at: parse_optional_rfc3339_timestamp(occurred_at, OCCURRED_AT)?,
        duration_minutes,
        notes,
    };

    let stored = state.interactions.log_interaction(request).await?;
    Ok(web::Json(LoggedInteraction {
        ok: true,
        id: stored.id.get(),
    }))
}

/// Interactions touching the session user, or the `userId` target for
/// administrators; most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/interactions",
    params(InteractionListQuery),
    responses(
        (status = 200, description = "Interactions", body = [InteractionSchema]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["interactions"],
    operation_id = "listInteractions"
)]
#[get("/interactions")]
pub async fn list_interactions(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<InteractionListQuery>,
) -> ApiResult<web::Json<Vec<Interaction>>> {
    let requester = session.require_user()?;
    let target = match query.into_inner().user_id {
        Some(raw) if requester.is_admin() && !raw.trim().is_empty() => {
            parse_user_id(raw.trim(), USER_ID)?
        }
        _ => requester.id,
    };
    Ok(web::Json(
        state.interactions_query.list_for_user(&target).await?,
    ))
}

#[cfg(test)]
#[path = "interactions_tests.rs"]
mod tests;
