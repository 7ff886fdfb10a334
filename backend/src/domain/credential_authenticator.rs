//! Credential authenticator service.
//!
//! Registers accounts, checks login credentials and signs bearer tokens. The
//! service is stateless: tokens are verified independently by inbound
//! adapters through the [`TokenVerifier`](crate::domain::ports::TokenVerifier)
//! port.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, warn};

use crate::domain::ports::{
    CredentialAuthenticator, PasswordHashError, PasswordHasher, TokenError, TokenIssuer,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    AccessToken, AuthSession, Error, LoginCredentials, PasswordHash, Registration, User, UserId,
    UserView, Username,
};

/// Message shared by every failed login, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// Well-formed Argon2id hash, at the default cost, that no password matches.
///
/// Logins for unknown users verify against it so they cost as much as a
/// wrong password for a real account.
pub const UNKNOWN_USER_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

const USERNAME_TAKEN: &str = "Failed to register user: username is already taken";
const EMAIL_TAKEN: &str = "Failed to register user: email is already registered";

/// Authenticator implementing the [`CredentialAuthenticator`] driving port.
#[derive(Clone)]
pub struct CredentialAuthenticatorService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<U, H, T> CredentialAuthenticatorService<U, H, T> {
    /// Wire the service to its outbound ports and clock.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

impl<U, H, T> CredentialAuthenticatorService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateUsername { .. } => {
                Error::registration_failed(USERNAME_TAKEN)
            }
            UserPersistenceError::DuplicateEmail { .. } => Error::registration_failed(EMAIL_TAKEN),
        }
    }

    fn map_hash_error(error: PasswordHashError) -> Error {
        Error::internal(format!("password hashing failed: {error}"))
    }

    fn map_token_error(error: TokenError) -> Error {
        Error::internal(format!("token issuance failed: {error}"))
    }

    fn session(&self, user: &User) -> Result<AuthSession, Error> {
        Ok(AuthSession {
            token: self.issue_token(user)?,
            user: user.view(),
        })
    }

    async fn ensure_identity_free(&self, registration: &Registration) -> Result<(), Error> {
        if self
            .users
            .exists_by_username(registration.username())
            .await
            .map_err(Self::map_persistence_error)?
        {
            return Err(Error::registration_failed(USERNAME_TAKEN));
        }
        if self
            .users
            .exists_by_email(registration.email())
            .await
            .map_err(Self::map_persistence_error)?
        {
            return Err(Error::registration_failed(EMAIL_TAKEN));
        }
        Ok(())
    }

    /// Spend one verification on a password that belongs to nobody.
    async fn verify_against_unknown_user(&self, password: &str) {
        let decoy = PasswordHash::new(UNKNOWN_USER_PASSWORD_HASH);
        if let Err(err) = self.hasher.verify(password, &decoy).await {
            debug!(error = %err, "unknown-user verification failed");
        }
    }

    /// Remove a user whose registration could not be completed.
    async fn roll_back_registration(&self, id: &UserId) {
        match self.users.delete(id).await {
            Ok(true) => debug!(user_id = %id, "rolled back incomplete registration"),
            Ok(false) => warn!(user_id = %id, "incomplete registration already removed"),
            Err(err) => error!(user_id = %id, error = %err, "failed to roll back registration"),
        }
    }
}

#[async_trait]
impl<U, H, T> CredentialAuthenticator for CredentialAuthenticatorService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    async fn register(&self, registration: &Registration) -> Result<AuthSession, Error> {
        self.ensure_identity_free(registration).await?;

        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(Self::map_hash_error)?;
        let now = self.clock.utc();
        let user = User {
            id: UserId::random(),
            username: registration.username().clone(),
            email: registration.email().clone(),
            password_hash,
            created_at: now,
            updated_at: now,
        };

        self.users.create(&user).await.map_err(|err| match err {
            UserPersistenceError::Query { message } => {
                error!(%message, "user insert failed");
                Error::registration_failed("Failed to register user")
            }
            other => Self::map_persistence_error(other),
        })?;

        match self.session(&user) {
            Ok(session) => Ok(session),
            Err(err) => {
                self.roll_back_registration(&user.id).await;
                Err(err)
            }
        }
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error> {
        // A name that could never have been registered is just an unknown user.
        let found = match Username::new(credentials.username()) {
            Ok(username) => self
                .users
                .find_by_username(&username)
                .await
                .map_err(Self::map_persistence_error)?,
            Err(_) => None,
        };
        let Some(user) = found else {
            self.verify_against_unknown_user(credentials.password()).await;
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS_MESSAGE));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &user.password_hash)
            .await
            .map_err(Self::map_hash_error)?;
        if !verified {
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS_MESSAGE));
        }

        self.session(&user)
    }

    async fn get_user_by_id(&self, id: &UserId) -> Result<Option<UserView>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map(|user| user.as_ref().map(User::view))
            .map_err(Self::map_persistence_error)
    }

    fn issue_token(&self, user: &User) -> Result<AccessToken, Error> {
        self.tokens
            .issue(user, self.clock.utc())
            .map_err(Self::map_token_error)
    }
}

#[cfg(test)]
#[path = "credential_authenticator_tests.rs"]
mod tests;
