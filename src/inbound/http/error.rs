//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while giving handlers one
//! consistent JSON contract: validation failures carry the full violation
//! list under `errors`, every other failure carries a single `message`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        // ErrorCode is non_exhaustive; unmapped categories stay internal.
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn body_for(error: &Error) -> serde_json::Value {
    if !error.violations().is_empty() {
        return json!({ "errors": error.violations() });
    }
    // Do not leak implementation details to clients.
    if matches!(error.code(), ErrorCode::InternalError) {
        return json!({ "message": "Internal server error" });
    }
    json!({ "message": error.message() })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(body_for(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("Access Denied!"), StatusCode::UNAUTHORIZED)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("duplicate"), StatusCode::CONFLICT)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_status(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[rstest]
    fn plain_errors_serialise_a_message_body() {
        let body = body_for(&Error::unauthorized("Access Denied!"));
        assert_eq!(body, serde_json::json!({ "message": "Access Denied!" }));
    }

    #[rstest]
    fn validation_errors_serialise_the_violation_list() {
        let body = body_for(&Error::validation(vec!["first".into(), "second".into()]));
        assert_eq!(body, serde_json::json!({ "errors": ["first", "second"] }));
    }

    #[rstest]
    fn internal_errors_are_redacted() {
        let body = body_for(&Error::internal("connection string leaked"));
        assert_eq!(body, serde_json::json!({ "message": "Internal server error" }));
    }
}
