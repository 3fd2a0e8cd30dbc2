use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON body of every rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub name: String,
    pub message: String,
}
