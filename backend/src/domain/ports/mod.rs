//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`CompanyRegistry`], [`CredentialAuthenticator`]) are what
//! inbound adapters call. Driven ports (repositories, hashing, tokens) are
//! what the domain services call out to.

mod macros;
pub(crate) use macros::define_port_error;

mod company_registry;
mod company_repository;
mod credential_authenticator;
mod password_hasher;
mod token_service;
mod user_repository;

#[cfg(test)]
pub use company_registry::MockCompanyRegistry;
pub use company_registry::CompanyRegistry;
#[cfg(test)]
pub use company_repository::MockCompanyRepository;
pub use company_repository::{CompanyPersistenceError, CompanyRepository};
#[cfg(test)]
pub use credential_authenticator::MockCredentialAuthenticator;
pub use credential_authenticator::CredentialAuthenticator;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_service::{MockTokenIssuer, MockTokenVerifier};
pub use token_service::{TokenError, TokenIssuer, TokenVerifier};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
