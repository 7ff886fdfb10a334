//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashing and verification are CPU-bound and run on Tokio's blocking pool.
//! Stored hashes use the PHC string format, so verification reads the cost
//! parameters from the hash itself.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id hasher with OWASP baseline parameters by default.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// 19 MiB memory cost.
    pub const MEMORY_COST_KIB: u32 = 19_456;
    /// Iterations.
    pub const TIME_COST: u32 = 2;
    /// Lanes.
    pub const PARALLELISM: u32 = 1;
    /// Digest length in bytes.
    pub const OUTPUT_LEN: usize = 32;

    /// Hasher using the default cost parameters.
    pub fn new() -> Self {
        Self {
            params: Params::new(
                Self::MEMORY_COST_KIB,
                Self::TIME_COST,
                Self::PARALLELISM,
                Some(Self::OUTPUT_LEN),
            )
            .unwrap_or_default(),
        }
    }

    /// Hasher with explicit cost parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hash`] when Argon2 rejects the parameters.
    pub fn with_params(
        memory_cost_kib: u32,
        time_cost: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHashError> {
        let params = Params::new(
            memory_cost_kib,
            time_cost,
            parallelism,
            Some(Self::OUTPUT_LEN),
        )
        .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(Self { params })
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let params = self.params.clone();
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| PasswordHash::new(hash.to_string()))
                .map_err(|err| PasswordHashError::hash(err.to_string()))
        })
        .await
        .map_err(|err| PasswordHashError::worker(err.to_string()))?
    }

    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || {
            let parsed = match PhcHash::new(&encoded) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(error = %err, "stored password hash is not a valid PHC string");
                    return false;
                }
            };
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .await
        .map_err(|err| PasswordHashError::worker(err.to_string()))
    }
}
