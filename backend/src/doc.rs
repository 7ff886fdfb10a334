//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every inbound HTTP handler, the schema wrappers from
//! [`crate::inbound::http::schemas`] and the bearer token security scheme.
//! The document is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::auth::{LoginRequest, RegisterRequest};
use crate::inbound::http::companies::CompanyRequest;
use crate::inbound::http::schemas::{
    AuthSessionSchema, CompanySchema, ErrorCodeSchema, ErrorSchema, UserViewSchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "HS256 token issued by POST /api/auth/login or /api/auth/register.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Company registry API",
        description = "Company records keyed by ISIN, plus account registration and bearer token login."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::companies::list_companies,
        crate::inbound::http::companies::get_company,
        crate::inbound::http::companies::get_company_by_isin,
        crate::inbound::http::companies::create_company,
        crate::inbound::http::companies::update_company,
        crate::inbound::http::companies::delete_company,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::current_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CompanySchema,
        UserViewSchema,
        AuthSessionSchema,
        ErrorSchema,
        ErrorCodeSchema,
        CompanyRequest,
        RegisterRequest,
        LoginRequest
    )),
    tags(
        (name = "companies", description = "Company registry"),
        (name = "auth", description = "Registration, login and the current user"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
