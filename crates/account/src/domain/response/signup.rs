use crate::model::account::Account;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::errors::HttpError;

/// Either the stored account or a rejection, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SignUpBody {
    Account(Account),
    Error(HttpError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignUpResponse {
    pub status_code: StatusCode,
    pub body: SignUpBody,
}

impl SignUpResponse {
    pub fn ok(account: Account) -> Self {
        Self {
            status_code: StatusCode::OK,
            body: SignUpBody::Account(account),
        }
    }

    pub fn bad_request(err: HttpError) -> Self {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            body: SignUpBody::Error(err),
        }
    }

    pub fn server_error() -> Self {
        let err = HttpError::ServerError;
        Self {
            status_code: err.status_code(),
            body: SignUpBody::Error(err),
        }
    }
}

impl IntoResponse for SignUpResponse {
    fn into_response(self) -> Response {
        (self.status_code, Json(self.body)).into_response()
    }
}
