//! Wiring of outbound adapters into the domain services behind `HttpState`.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use company_api::domain::ports::TokenError;
use company_api::domain::{CompanyRegistryService, CredentialAuthenticatorService};
use company_api::inbound::http::state::HttpState;
use company_api::outbound::persistence::{DieselCompanyRepository, DieselUserRepository};
use company_api::outbound::security::{Argon2PasswordHasher, JwtTokenService};

use super::ServerConfig;

/// Build the HTTP state from the configured pool and signing settings.
///
/// # Errors
/// Returns [`TokenError`] when the signing settings are unusable.
pub(super) fn build_http_state(config: &ServerConfig) -> Result<web::Data<HttpState>, TokenError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens = Arc::new(JwtTokenService::new(&config.jwt)?);

    let companies = CompanyRegistryService::new(
        Arc::new(DieselCompanyRepository::new(config.db_pool.clone())),
        clock.clone(),
    );
    let auth = CredentialAuthenticatorService::new(
        Arc::new(DieselUserRepository::new(config.db_pool.clone())),
        Arc::new(Argon2PasswordHasher::new()),
        tokens.clone(),
        clock,
    );

    Ok(web::Data::new(HttpState::new(
        Arc::new(companies),
        Arc::new(auth),
        tokens,
    )))
}
