//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Email, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The unique index on `username` rejected the write.
        DuplicateUsername { username: String } => "username {username} is already taken",
        /// The unique index on `email` rejected the write.
        DuplicateEmail { email: String } => "email {email} is already registered",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch the user whose username or email equals `identifier`.
    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, UserPersistenceError>;

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Insert a new user record.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Overwrite an existing user, returning `false` when no row matched.
    async fn update(&self, user: &User) -> Result<bool, UserPersistenceError>;

    /// Remove a user, returning `false` when no row matched.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;

    async fn exists_by_username(&self, username: &Username) -> Result<bool, UserPersistenceError>;

    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserPersistenceError>;
}
