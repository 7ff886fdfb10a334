//! Account HTTP handlers.
//!
//! ```text
//! POST /api/auth/register {"username":"ada","email":"ada@example.com","password":"...","confirmPassword":"..."}
//! POST /api/auth/login {"username":"ada","password":"..."}
//! GET  /api/auth/me  (Authorization: Bearer <token>)
//! ```
//!
//! Request bodies never implement `Debug` so passwords cannot end up in logs.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::schemas::{AuthSessionSchema, ErrorSchema, UserViewSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{login_validation_error, registration_validation_error};

/// Register request body for `POST /api/auth/register`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl TryFrom<&RegisterRequest> for Registration {
    type Error = Error;

    fn try_from(value: &RegisterRequest) -> Result<Self, Self::Error> {
        Registration::try_from_parts(
            &value.username,
            &value.email,
            &value.password,
            &value.confirm_password,
        )
        .map_err(|err| registration_validation_error(&err))
    }
}

/// Login request body for `POST /api/auth/login`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        LoginCredentials::try_from_parts(&value.username, &value.password)
            .map_err(|err| login_validation_error(&err))
    }
}

/// Create an account and return a bearer token for it.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = AuthSessionSchema),
        (status = 400, description = "Registration failed", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(&payload.into_inner())?;
    let session = state.auth.register(&registration).await?;
    info!(user_id = %session.user.id, "user registered");
    Ok(HttpResponse::Ok().json(session))
}

/// Exchange credentials for a bearer token.
///
/// Unknown usernames and wrong passwords produce the same response.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthSessionSchema),
        (status = 400, description = "Invalid username or password", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(&payload.into_inner())?;
    let session = state.auth.login(&credentials).await?;
    Ok(HttpResponse::Ok().json(session))
}

/// Return the user identified by the bearer token.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserViewSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "User no longer exists", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentUser",
    security(("BearerAuth" = []))
)]
#[get("/auth/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let view = state
        .auth
        .get_user_by_id(user.user_id())
        .await?
        .ok_or_else(|| Error::not_found(format!("user {} not found", user.user_id())))?;
    Ok(HttpResponse::Ok().json(view))
}

#[cfg(test)]
mod tests;
