//! Application configuration loaded via OrthoConfig.
//!
//! Values are layered from CLI flags and `COMPANY_API_*` environment
//! variables. Components never read configuration themselves; `main` turns
//! these settings into [`PoolConfig`], [`JwtSettings`] and the server bind
//! address.

use std::fmt;
use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::outbound::persistence::{DEFAULT_MAX_CONNECTIONS, PoolConfig};
use crate::outbound::security::JwtSettings;

/// Listen address used when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Token `iss` claim used when none is configured.
pub const DEFAULT_JWT_ISSUER: &str = "company-api";
/// Token `aud` claim used when none is configured.
pub const DEFAULT_JWT_AUDIENCE: &str = "company-api-clients";

/// Configuration problems detected at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("database url is required (set COMPANY_API_DATABASE_URL)")]
    MissingDatabaseUrl,
    #[error("bind address {value:?} is not a valid socket address")]
    InvalidBindAddr { value: String },
    #[error("jwt secret is required in release builds (set COMPANY_API_JWT_SECRET)")]
    MissingJwtSecret,
}

/// Startup configuration.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COMPANY_API")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// HS256 signing secret.
    pub jwt_secret: Option<String>,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,
    /// Apply embedded migrations before serving; on unless set to false.
    pub run_migrations: Option<bool>,
    /// Permit a random per-process signing secret outside debug builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("bind_addr", &self.bind_addr)
            .field("db_max_connections", &self.db_max_connections)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("run_migrations", &self.run_migrations)
            .field("allow_ephemeral_secret", &self.allow_ephemeral_secret)
            .finish()
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|raw| raw.trim()).filter(|raw| !raw.is_empty())
}

/// 32 random bytes from two v4 UUIDs.
fn ephemeral_secret() -> Vec<u8> {
    let mut secret = Vec::with_capacity(32);
    secret.extend_from_slice(Uuid::new_v4().as_bytes());
    secret.extend_from_slice(Uuid::new_v4().as_bytes());
    secret
}

impl AppSettings {
    /// Configured connection string; blank counts as missing.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        non_blank(self.database_url.as_ref()).ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Listen address, defaulting to [`DEFAULT_BIND_ADDR`].
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = non_blank(self.bind_addr.as_ref()).unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
        })
    }

    /// Pool size, defaulting to [`DEFAULT_MAX_CONNECTIONS`].
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    /// Whether `main` applies embedded migrations, defaulting to true.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Pool settings derived from the database options.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?).with_max_size(self.db_max_connections()))
    }

    /// Token signing settings.
    ///
    /// Without a configured secret, debug builds (or an explicit
    /// `allow_ephemeral_secret`) fall back to a random secret that does not
    /// survive restarts.
    pub fn jwt_settings(&self) -> Result<JwtSettings, SettingsError> {
        let issuer = non_blank(self.jwt_issuer.as_ref()).unwrap_or(DEFAULT_JWT_ISSUER);
        let audience = non_blank(self.jwt_audience.as_ref()).unwrap_or(DEFAULT_JWT_AUDIENCE);
        let secret = match non_blank(self.jwt_secret.as_ref()) {
            Some(secret) => secret.as_bytes().to_vec(),
            None if cfg!(debug_assertions) || self.allow_ephemeral_secret => {
                warn!("using ephemeral jwt secret; tokens will not survive a restart");
                ephemeral_secret()
            }
            None => return Err(SettingsError::MissingJwtSecret),
        };
        Ok(JwtSettings::new(secret, issuer, audience))
    }
}
