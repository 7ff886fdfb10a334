//! Domain error to HTTP response mapping.
//!
//! Handlers return [`ApiResult`]; Actix calls the [`ResponseError`] impl below
//! to build the JSON envelope. Internal failures are logged in full and
//! replaced by a generic body that keeps only the trace id.

use std::borrow::Cow;

use actix_web::http::StatusCode;
use actix_web::http::header::WWW_AUTHENTICATE;
use actix_web::{HttpResponse, ResponseError, web};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Challenge sent with every 401 so clients know a bearer token is expected.
pub(crate) const BEARER_CHALLENGE: &str = r#"Bearer realm="company-api""#;

const INTERNAL_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest
        | ErrorCode::InvalidCredentials
        | ErrorCode::RegistrationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Body safe to show a client: internal errors lose message and details.
fn public_body(error: &Error) -> Cow<'_, Error> {
    if error.code() != ErrorCode::InternalError {
        return Cow::Borrowed(error);
    }
    error!(message = %error.message(), trace_id = ?error.trace_id(), "internal error");
    let generic = Error::internal(INTERNAL_MESSAGE);
    Cow::Owned(match error.trace_id() {
        Some(id) => generic.with_trace_id(id),
        None => generic,
    })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        if self.code() == ErrorCode::Unauthorized {
            response.insert_header((WWW_AUTHENTICATE, BEARER_CHALLENGE));
        }
        response.json(public_body(self).as_ref())
    }
}

/// JSON body extractor settings answering with the error envelope.
///
/// Unreadable or incomplete bodies become `invalid_request` carrying the
/// deserializer's message.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| Error::from(actix_web::Error::from(err)).into())
}

/// Path extractor settings: a segment that does not parse names no resource.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, req| Error::not_found(format!("no resource at {}", req.path())).into())
}

/// Extractor and framework failures.
///
/// Client-side rejections keep the framework's message as `invalid_request`;
/// anything else is treated as internal.
impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        if err.as_response_error().status_code().is_client_error() {
            return Error::invalid_request(err.to_string());
        }
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_MESSAGE)
    }
}
