//! Authentication primitives: login credentials, registrations, tokens.
//!
//! Inbound adapters build these from raw strings before calling the
//! authenticator so the domain only ever sees validated input. Passwords are
//! held in [`Zeroizing`] buffers and never appear in `Debug` output.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{Email, UserId, UserValidationError, UserView, Username};

/// Minimum accepted password length.
pub const PASSWORD_MIN: usize = 6;
/// Maximum accepted password length.
pub const PASSWORD_MAX: usize = 100;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use company_api::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada ", "hunter22").unwrap();
/// assert_eq!(creds.username(), "ada");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Reasons a registration payload is rejected before any storage access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    #[error(transparent)]
    User(#[from] UserValidationError),
    #[error("password must be between {min} and {max} characters")]
    PasswordLength { min: usize, max: usize },
    #[error("passwords do not match")]
    PasswordMismatch,
}

impl RegistrationValidationError {
    /// JSON field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::User(
                UserValidationError::EmptyUsername | UserValidationError::UsernameTooLong { .. },
            ) => "username",
            Self::User(_) => "email",
            Self::PasswordLength { .. } => "password",
            Self::PasswordMismatch => "confirmPassword",
        }
    }
}

/// Validated request to create a new account.
///
/// # Examples
/// ```
/// use company_api::domain::Registration;
///
/// let registration =
///     Registration::try_from_parts("ada", "ada@example.com", "secret1", "secret1").unwrap();
/// assert_eq!(registration.username().as_ref(), "ada");
/// assert!(Registration::try_from_parts("ada", "ada@example.com", "secret1", "other1").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    email: Email,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate a registration payload.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let username = Username::new(username)?;
        let email = Email::new(email)?;
        let length = password.chars().count();
        if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&length) {
            return Err(RegistrationValidationError::PasswordLength {
                min: PASSWORD_MIN,
                max: PASSWORD_MAX,
            });
        }
        if password != confirm_password {
            return Err(RegistrationValidationError::PasswordMismatch);
        }
        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested account name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Contact address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plaintext password; hash it, never store or log it.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signed bearer token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded token string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Identity claims recovered from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// Successful register/login outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: AccessToken,
    pub user: UserView,
}
