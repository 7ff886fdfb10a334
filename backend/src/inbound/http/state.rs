//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CompanyRegistry, CredentialAuthenticator, TokenVerifier};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub companies: Arc<dyn CompanyRegistry>,
    pub auth: Arc<dyn CredentialAuthenticator>,
    /// Verifies bearer tokens on protected routes without touching storage.
    pub tokens: Arc<dyn TokenVerifier>,
}

impl HttpState {
    /// Bundle the driving ports and the token verifier.
    pub fn new(
        companies: Arc<dyn CompanyRegistry>,
        auth: Arc<dyn CredentialAuthenticator>,
        tokens: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            companies,
            auth,
            tokens,
        }
    }
}
