//! Recipient-facing notification endpoints.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Notification, NotificationId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, NotificationSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// `{ "ok": true, "notification": ... }`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NotificationEnvelope {
    pub ok: bool,
    #[schema(value_type = NotificationSchema)]
    pub notification: Notification,
}

impl NotificationEnvelope {
    pub(crate) fn ok(notification: Notification) -> Self {
        Self {
            ok: true,
            notification,
        }
    }
}

/// The session user's notifications, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    responses(
        (status = 200, description = "Notifications", body = [NotificationSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Notification>>> {
    let user = session.require_user()?;
    Ok(web::Json(
        state.notifications_query.list_for_user(&user.id).await?,
    ))
}

/// Acknowledge one of the session user's notifications.
#[utoipa::path(
    post,
    path = "/api/v1/notifications/{id}/mark-read",
    params(("id" = i64, Path, description = "Notification identifier")),
    responses(
        (status = 200, description = "Notification marked read", body = NotificationEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found or not the recipient", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationRead"
)]
#[post("/notifications/{id}/mark-read")]
pub async fn mark_read(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<NotificationEnvelope>> {
    let user = session.require_user()?;
    // Unparseable identifiers cannot name a notification.
    let id = path
        .trim()
        .parse::<i64>()
        .map(NotificationId::new)
        .map_err(|_| Error::not_found("not found"))?;
    let notification = state.notifications.mark_read(id, &user.id).await?;
    Ok(web::Json(NotificationEnvelope::ok(notification)))
}
