//! Mapping of pipeline errors to HTTP responses.

use crate::error::{ErrorKind, TubelensError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

/// Error returned by API handlers.
#[derive(Debug)]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    kind: ErrorKind,
    message: &'a str,
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidInput,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::TranscriptUnavailable => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::InferenceFailure => StatusCode::BAD_GATEWAY,
            ErrorKind::Configuration | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TubelensError> for ApiError {
    fn from(err: TubelensError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.kind.is_client_error() {
            warn!("Request rejected ({:?}): {}", self.kind, self.message);
        } else {
            error!("Request failed ({:?}): {}", self.kind, self.message);
        }

        let body = ErrorBody {
            error: ErrorDetail {
                kind: self.kind,
                message: &self.message,
            },
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (TubelensError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (
                TubelensError::TranscriptUnavailable("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (TubelensError::InferenceFailure("x".into()), StatusCode::BAD_GATEWAY),
            (TubelensError::Config("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }
}
