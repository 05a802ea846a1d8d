use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::football_data::UpstreamError;

pub const TABLE_UNAVAILABLE: &str = "Não foi possível carregar a tabela da liga.";
pub const MATCHES_UNAVAILABLE: &str = "Não foi possível carregar os jogos da liga.";

/// Errors a handler can end a request with.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Upstream answered without the data we need. Sent as plain text.
    #[error("{0}")]
    BadRequest(&'static str),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    /// Map a failed load, turning a missing upstream array into `message`.
    pub fn load_failed(err: UpstreamError, message: &'static str) -> Self {
        if err.is_missing_field() {
            ApiError::BadRequest(message)
        } else {
            ApiError::Upstream(err)
        }
    }
}

/// RFC 9457 problem body.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'static str,
    pub status: u16,
    pub detail: String,
}

impl ProblemDetails {
    pub fn internal(detail: String) -> Self {
        ProblemDetails {
            kind: "https://tools.ietf.org/html/rfc9110#section-15.6.1",
            title: "An error occurred while processing your request.",
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            detail,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::Upstream(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "application/problem+json")],
                Json(ProblemDetails::internal(err.to_string())),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing() -> UpstreamError {
        UpstreamError::MissingField {
            url: "http://upstream.test/competitions/PL/standings".into(),
            field: "standings",
        }
    }

    #[test]
    fn test_missing_field_becomes_bad_request() {
        let err = ApiError::load_failed(missing(), TABLE_UNAVAILABLE);
        assert!(matches!(err, ApiError::BadRequest(TABLE_UNAVAILABLE)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_status_error_becomes_problem() {
        let err = UpstreamError::Status {
            url: "http://upstream.test/competitions/XX/matches".into(),
            status: reqwest::StatusCode::NOT_FOUND,
            body: "not found".into(),
        };
        let resp = ApiError::load_failed(err, MATCHES_UNAVAILABLE).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "application/problem+json"
        );
    }
}
