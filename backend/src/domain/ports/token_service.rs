//! Ports for issuing and verifying bearer tokens.

use chrono::{DateTime, Utc};

use crate::domain::{AccessToken, TokenClaims, User};

use super::define_port_error;

define_port_error! {
    /// Token issuance and verification failures.
    pub enum TokenError {
        /// Signature, issuer, audience or shape check failed.
        Invalid { message: String } => "token is invalid: {message}",
        /// The token was well formed but its expiry has passed.
        Expired => "token has expired",
        /// Encoding the token failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Signs tokens carrying a user's identity claims.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign a token for `user` valid from `issued_at`.
    fn issue(&self, user: &User, issued_at: DateTime<Utc>) -> Result<AccessToken, TokenError>;
}

/// Verifies tokens produced by a [`TokenIssuer`] sharing the same key.
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
