use crate::{domain::requests::InsertAccountRequest, model::account::Account};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynAccountCommandRepository = Arc<dyn AccountCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait AccountCommandRepositoryTrait {
    /// Stores the account and returns it with a freshly assigned `id`.
    async fn create_account(&self, req: &InsertAccountRequest) -> Result<Account, RepositoryError>;
}
