//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use company_api::outbound::persistence::DbPool;
use company_api::outbound::security::JwtSettings;

/// Everything the server needs to build its adapters.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) jwt: JwtSettings,
}

impl ServerConfig {
    /// Bundle the listen address, pool and token settings.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, jwt: JwtSettings) -> Self {
        Self {
            bind_addr,
            db_pool,
            jwt,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
