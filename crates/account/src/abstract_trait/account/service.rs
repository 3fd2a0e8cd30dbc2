use crate::{domain::requests::CreateAccountRequest, model::account::Account};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynCreateAccountService = Arc<dyn CreateAccountServiceTrait + Send + Sync>;

#[async_trait]
pub trait CreateAccountServiceTrait {
    async fn create(&self, req: &CreateAccountRequest) -> Result<Account, ServiceError>;
}
