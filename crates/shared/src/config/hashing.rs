use crate::{abstract_trait::EncrypterTrait, errors::ServiceError};
use async_trait::async_trait;
use bcrypt::hash;

pub const DEFAULT_COST: u32 = 12;
// Mirrors bcrypt's cost bounds, which the bcrypt crate does not export.
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// bcrypt-backed [`EncrypterTrait`]. A fresh salt is drawn on every call.
#[derive(Clone)]
pub struct Hashing {
    cost: u32,
}

impl Hashing {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for Hashing {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

#[async_trait]
impl EncrypterTrait for Hashing {
    async fn encrypt(&self, plaintext: &str) -> Result<String, ServiceError> {
        let cost = self.cost;
        let plaintext = plaintext.to_owned();

        // bcrypt is CPU bound, keep it off the async workers.
        let hashed = tokio::task::spawn_blocking(move || hash(plaintext, cost))
            .await
            .map_err(|e| ServiceError::Internal(format!("hashing task failed: {e}")))??;

        Ok(hashed)
    }
}
