use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// `Json` extractor whose rejection is rendered as a JSON body instead of plain text.
///
/// It only checks that the body is JSON of the right shape; field rules are left to the
/// handler.
pub struct AcceptedJson<T>(pub T);

impl<S, T> FromRequest<S> for AcceptedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, axum::Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let payload = json!({
                    "error": "Invalid JSON",
                    "message": rejection.body_text(),
                });
                (rejection.status(), axum::Json(payload))
            })?;

        Ok(Self(value))
    }
}
