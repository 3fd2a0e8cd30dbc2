use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::ServiceError;

pub type DynEncrypter = Arc<dyn EncrypterTrait + Send + Sync>;

/// Turns a plaintext credential into an opaque hash.
///
/// Two calls with the same plaintext are not required to return the same hash.
#[async_trait]
pub trait EncrypterTrait {
    async fn encrypt(&self, plaintext: &str) -> Result<String, ServiceError>;
}
