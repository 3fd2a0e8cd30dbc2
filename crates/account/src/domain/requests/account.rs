use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw sign-up body. Every field may be absent; absent and empty are both "missing".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

impl SignUpRequest {
    /// Required fields in the order they are checked, keyed by their wire name.
    pub fn required_fields(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("name", self.name.as_deref()),
            ("email", self.email.as_deref()),
            ("password", self.password.as_deref()),
            ("passwordConfirmation", self.password_confirmation.as_deref()),
        ]
    }
}

/// Validated sign-up data handed to the create-account use case.
#[derive(Clone, PartialEq)]
pub struct CreateAccountRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for CreateAccountRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateAccountRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What the repository stores: the plaintext password is already replaced by its hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertAccountRequest {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
