use crate::errors::error::ErrorResponse;
use axum::http::StatusCode;
use serde::Serialize;

/// Rejections a request can end with.
///
/// `MissingParam` and `InvalidParam` name the offending field. `ServerError` never carries the
/// failure that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "ErrorResponse")]
pub enum HttpError {
    MissingParam(&'static str),
    InvalidParam(&'static str),
    ServerError,
}

impl HttpError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::MissingParam(_) | HttpError::InvalidParam(_) => StatusCode::BAD_REQUEST,
            HttpError::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HttpError::MissingParam(_) => "MissingParamError",
            HttpError::InvalidParam(_) => "InvalidParamError",
            HttpError::ServerError => "ServerError",
        }
    }

    pub fn field(&self) -> Option<&'static str> {
        match self {
            HttpError::MissingParam(field) | HttpError::InvalidParam(field) => Some(field),
            HttpError::ServerError => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            HttpError::MissingParam(field) => format!("Missing param: {field}"),
            HttpError::InvalidParam(field) => format!("Invalid param: {field}"),
            HttpError::ServerError => "Internal server error".to_string(),
        }
    }
}

impl From<HttpError> for ErrorResponse {
    fn from(err: HttpError) -> Self {
        ErrorResponse {
            name: err.name().to_string(),
            message: err.message(),
        }
    }
}
