//! Driving port for account registration and login.

use async_trait::async_trait;

use crate::domain::{
    AccessToken, AuthSession, Error, LoginCredentials, Registration, User, UserId, UserView,
};

/// Authentication use-cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialAuthenticator: Send + Sync {
    /// Create an account and sign a token for it.
    async fn register(&self, registration: &Registration) -> Result<AuthSession, Error>;

    /// Check credentials and sign a token.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error>;

    async fn get_user_by_id(&self, id: &UserId) -> Result<Option<UserView>, Error>;

    /// Sign a token for `user` without touching storage.
    fn issue_token(&self, user: &User) -> Result<AccessToken, Error>;
}
