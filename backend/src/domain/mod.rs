//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities used by the API and persistence
//! layers, and the services that own every write rule. Types document their
//! invariants and serialisation contracts (serde) in their Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Company, CompanyDraft, CompanyId, Isin: company records and inputs.
//! - User, UserView, UserId, Username, Email, PasswordHash: identities.
//! - LoginCredentials, Registration, AccessToken, TokenClaims, AuthSession.
//! - CompanyRegistryService, CredentialAuthenticatorService: driving port
//!   implementations.

pub mod auth;
pub mod company;
pub mod company_registry;
pub mod credential_authenticator;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AccessToken, AuthSession, LoginCredentials, LoginValidationError, PASSWORD_MAX, PASSWORD_MIN,
    Registration, RegistrationValidationError, TokenClaims,
};
pub use self::company::{
    Company, CompanyDraft, CompanyId, CompanyValidationError, EXCHANGE_MAX, ISIN_LEN, Isin,
    NAME_MAX, STOCK_TICKER_MAX, WEBSITE_MAX,
};
pub use self::company_registry::{CompanyRegistryService, isin_conflict};
pub use self::credential_authenticator::{
    CredentialAuthenticatorService, INVALID_CREDENTIALS_MESSAGE, UNKNOWN_USER_PASSWORD_HASH,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EMAIL_MAX, Email, PasswordHash, USERNAME_MAX, User, UserId, UserValidationError, UserView,
    Username,
};
