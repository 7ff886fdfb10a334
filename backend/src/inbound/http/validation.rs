//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain validation errors become [`Error`] payloads with
//! `details: { field, code }` so clients can highlight the offending input.

use serde_json::json;

use crate::domain::{
    CompanyId, CompanyValidationError, Error, LoginValidationError, RegistrationValidationError,
    UserValidationError,
};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    Empty,
    TooLong,
    InvalidLength,
    InvalidFormat,
    Mismatch,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            ValidationCode::Empty => "empty",
            ValidationCode::TooLong => "too_long",
            ValidationCode::InvalidLength => "invalid_length",
            ValidationCode::InvalidFormat => "invalid_format",
            ValidationCode::Mismatch => "mismatch",
        }
    }
}

fn details(field: &str, code: &str) -> serde_json::Value {
    json!({
        "field": field,
        "code": code,
    })
}

/// Map a rejected company payload to `invalid_request`.
pub(crate) fn company_validation_error(err: &CompanyValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(details(err.field(), err.reason()))
}

fn user_validation_code(err: &UserValidationError) -> ValidationCode {
    match err {
        UserValidationError::EmptyId
        | UserValidationError::EmptyUsername
        | UserValidationError::EmptyEmail => ValidationCode::Empty,
        UserValidationError::UsernameTooLong { .. } | UserValidationError::EmailTooLong { .. } => {
            ValidationCode::TooLong
        }
        UserValidationError::InvalidId | UserValidationError::InvalidEmail => {
            ValidationCode::InvalidFormat
        }
    }
}

/// Map a rejected registration payload to `registration_failed`.
pub(crate) fn registration_validation_error(err: &RegistrationValidationError) -> Error {
    let code = match err {
        RegistrationValidationError::User(inner) => user_validation_code(inner),
        RegistrationValidationError::PasswordLength { .. } => ValidationCode::InvalidLength,
        RegistrationValidationError::PasswordMismatch => ValidationCode::Mismatch,
    };
    Error::registration_failed(format!("Failed to register user: {err}"))
        .with_details(details(err.field(), code.as_str()))
}

/// Map a structurally incomplete login payload to `invalid_request`.
pub(crate) fn login_validation_error(err: &LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyUsername => "username",
        LoginValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(err.to_string())
        .with_details(details(field, ValidationCode::Empty.as_str()))
}

/// Not-found error for a company looked up by surrogate id.
pub(crate) fn company_not_found(id: CompanyId) -> Error {
    Error::not_found(format!("company {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompanyDraft, ErrorCode, Registration};
    use rstest::rstest;

    #[rstest]
    #[case("", "AAPL", "US0378331005", "name", "empty")]
    #[case("Apple", "AAPL", "US037833100", "isin", "invalid_length")]
    #[case("Apple", "AAPL", "us0378331005", "isin", "invalid_format")]
    fn company_errors_carry_field_details(
        #[case] name: &str,
        #[case] ticker: &str,
        #[case] isin: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let err = CompanyDraft::try_from_parts(name, ticker, "NASDAQ", isin, None)
            .expect_err("invalid draft");
        let mapped = company_validation_error(&err);

        assert_eq!(mapped.code(), ErrorCode::InvalidRequest);
        assert_eq!(mapped.details(), Some(&details(field, code)));
    }

    #[rstest]
    #[case("", "ada@example.com", "secret1", "secret1", "username", "empty")]
    #[case("ada", "not-an-email", "secret1", "secret1", "email", "invalid_format")]
    #[case("ada", "ada@example.com", "12345", "12345", "password", "invalid_length")]
    #[case("ada", "ada@example.com", "secret1", "secret2", "confirmPassword", "mismatch")]
    fn registration_errors_are_registration_failures(
        #[case] username: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] confirm: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let err = Registration::try_from_parts(username, email, password, confirm)
            .expect_err("invalid registration");
        let mapped = registration_validation_error(&err);

        assert_eq!(mapped.code(), ErrorCode::RegistrationFailed);
        assert!(mapped.message().starts_with("Failed to register user: "));
        assert_eq!(mapped.details(), Some(&details(field, code)));
    }

    #[rstest]
    #[case(LoginValidationError::EmptyUsername, "username")]
    #[case(LoginValidationError::EmptyPassword, "password")]
    fn login_errors_name_the_missing_field(#[case] err: LoginValidationError, #[case] field: &str) {
        let mapped = login_validation_error(&err);
        assert_eq!(mapped.code(), ErrorCode::InvalidRequest);
        assert_eq!(mapped.details(), Some(&details(field, "empty")));
    }

    #[rstest]
    fn company_not_found_names_the_id() {
        let err = company_not_found(CompanyId::new(7));
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "company 7 not found");
    }
}
