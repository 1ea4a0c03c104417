//! Account endpoints: signup, login, current user and the user listing.
//!
//! ```text
//! POST /api/v1/auth/signup {"username":"ada","password":"s3cret"}
//! POST /api/v1/auth/login  {"username":"admin","password":"admin"}
//! GET  /api/v1/auth/me
//! GET  /api/v1/auth/users
//! ```

use std::str::FromStr;

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use crate::domain::{LoginCredentials, Role, SignupCredentials, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{map_credentials_error, map_role_error};

/// Body for `POST /api/v1/auth/signup`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Only `member` is accepted; `admin` is refused.
    #[serde(default)]
    pub role: Option<String>,
}

/// Body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// `{ "user": ... }` envelope returned by the account endpoints.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserEnvelope {
    #[schema(value_type = UserSchema)]
    pub user: User,
}

/// Create a member account and start its session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = UserEnvelope,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Admin signup refused", body = ErrorSchema),
        (status = 409, description = "Username taken", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let SignupRequest {
        username,
        password,
        role,
    } = payload.into_inner();
    let role = role
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| Role::from_str(&raw))
        .transpose()
        .map_err(map_role_error)?;
    let credentials = SignupCredentials::try_from_parts(&username, &password, role)
        .map_err(map_credentials_error)?;

    let user = state.accounts.signup(&credentials).await?;
    session.persist_user(&user)?;
    Ok(web::Json(UserEnvelope { user }))
}

/// Verify credentials and start a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserEnvelope,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_credentials_error)?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(&user)?;
    Ok(web::Json(UserEnvelope { user }))
}

/// The account behind the current session.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserEnvelope>> {
    let session_user = session.require_user()?;
    let user = state.users.current_user(&session_user.id).await?;
    Ok(web::Json(UserEnvelope { user }))
}

/// Every account ordered by username; any signed-in user may call it.
#[utoipa::path(
    get,
    path = "/api/v1/auth/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "listUsers"
)]
#[get("/auth/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<User>>> {
    session.require_user()?;
    Ok(web::Json(state.users.list_users().await?))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
