//! HS256 JSON Web Token adapter implementing `TokenIssuer` and
//! `TokenVerifier`.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{TokenError, TokenIssuer, TokenVerifier};
use crate::domain::{AccessToken, TokenClaims, User, UserId};

/// Tokens expire one day after issue.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Signing configuration for [`JwtTokenService`].
#[derive(Clone)]
pub struct JwtSettings {
    pub secret: Zeroizing<Vec<u8>>,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl JwtSettings {
    /// Settings with the default one-day lifetime.
    pub fn new(
        secret: impl Into<Vec<u8>>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Override how long issued tokens stay valid.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Registered and private claims carried by every token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    username: String,
    email: String,
    iss: String,
    aud: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies HS256 tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    ttl: TimeDelta,
}

impl JwtTokenService {
    /// Build the service from `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] when the secret is empty or the
    /// lifetime does not fit a timestamp delta.
    pub fn new(settings: &JwtSettings) -> Result<Self, TokenError> {
        if settings.secret.is_empty() {
            return Err(TokenError::signing("signing secret must not be empty"));
        }
        let ttl = TimeDelta::from_std(settings.ttl)
            .map_err(|err| TokenError::signing(format!("token lifetime out of range: {err}")))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[settings.issuer.as_str()]);
        validation.set_audience(&[settings.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&settings.secret),
            decoding_key: DecodingKey::from_secret(&settings.secret),
            validation,
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
            ttl,
        })
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, user: &User, issued_at: DateTime<Utc>) -> Result<AccessToken, TokenError> {
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.to_string(),
            email: user.email.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map(AccessToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }
}

impl TokenVerifier for JwtTokenService {
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|err| {
            debug!(error = %err, "token rejected");
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::invalid(err.to_string()),
            }
        })?;
        let claims = data.claims;
        let user_id = UserId::new(&claims.sub)
            .map_err(|err| TokenError::invalid(format!("subject claim: {err}")))?;
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| TokenError::invalid("expiry claim out of range"))?;
        Ok(TokenClaims {
            user_id,
            username: claims.username,
            email: claims.email,
            expires_at,
        })
    }
}
