//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Login failed.
    #[schema(rename = "invalid_credentials")]
    InvalidCredentials,
    /// The account could not be created.
    #[schema(rename = "registration_failed")]
    RegistrationFailed,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The write would violate a uniqueness rule.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing service is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "A company with ISIN US0378331005 already exists.")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(rename = "traceId", example = "6f0c1f8e-8d5a-4a53-9b39-0e7b0f3b2c11")]
    trace_id: Option<String>,
    /// Supplementary error details, such as `{ field, code }` for validation.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Company`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Company)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CompanySchema {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "Apple Inc")]
    name: String,
    #[schema(rename = "stockTicker", example = "AAPL")]
    stock_ticker: String,
    #[schema(example = "NASDAQ")]
    exchange: String,
    #[schema(example = "US0378331005")]
    isin: String,
    #[schema(example = "https://www.apple.com")]
    website: Option<String>,
    #[schema(rename = "createdAt", value_type = String, format = DateTime)]
    created_at: String,
    #[schema(rename = "updatedAt", value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::UserView`].
///
/// Client-facing user; the password hash is never part of it.
#[derive(ToSchema)]
#[schema(as = crate::domain::UserView)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserViewSchema {
    #[schema(value_type = String, format = Uuid, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "ada")]
    username: String,
    #[schema(example = "ada@example.com")]
    email: String,
}

/// OpenAPI schema for [`crate::domain::AuthSession`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AuthSession)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AuthSessionSchema {
    /// HS256 bearer token.
    token: String,
    user: UserViewSchema,
}
