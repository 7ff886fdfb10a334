//! Port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised while hashing or parsing stored hashes.
    pub enum PasswordHashError {
        /// The hashing primitive rejected its input or parameters.
        Hash { message: String } => "password hashing failed: {message}",
        /// The blocking worker running the hash did not complete.
        Worker { message: String } => "password hashing worker failed: {message}",
    }
}

/// Hashes and verifies passwords.
///
/// Implementations are expected to be slow on purpose and must keep that work
/// off the async executor. Verification compares in constant time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produce an encoded hash with a fresh salt.
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against a stored hash.
    ///
    /// A malformed stored hash yields `Ok(false)` rather than an error.
    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;
}
