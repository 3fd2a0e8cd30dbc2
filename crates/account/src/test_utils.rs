use crate::{
    abstract_trait::account::{AccountCommandRepositoryTrait, CreateAccountServiceTrait},
    domain::requests::{CreateAccountRequest, InsertAccountRequest},
    model::account::Account,
};
use async_trait::async_trait;
use shared::{
    abstract_trait::{EmailValidatorTrait, EncrypterTrait},
    errors::{RepositoryError, ServiceError},
};
use std::sync::Mutex;

pub const LEAKED_DETAIL: &str = "password_hash column is corrupted";

#[derive(Default)]
pub struct EmailValidatorStub {
    pub calls: Mutex<Vec<String>>,
    valid: bool,
    fail: bool,
}

impl EmailValidatorStub {
    pub fn accepting() -> Self {
        Self {
            valid: true,
            ..Default::default()
        }
    }

    pub fn rejecting() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

impl EmailValidatorTrait for EmailValidatorStub {
    fn is_valid(&self, email: &str) -> Result<bool, ServiceError> {
        self.calls.lock().unwrap().push(email.to_string());
        if self.fail {
            return Err(ServiceError::Internal(LEAKED_DETAIL.into()));
        }
        Ok(self.valid)
    }
}

#[derive(Default)]
pub struct EncrypterStub {
    pub calls: Mutex<Vec<String>>,
    hash: String,
    fail: bool,
}

impl EncrypterStub {
    pub fn returning(hash: &str) -> Self {
        Self {
            hash: hash.to_string(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl EncrypterTrait for EncrypterStub {
    async fn encrypt(&self, plaintext: &str) -> Result<String, ServiceError> {
        self.calls.lock().unwrap().push(plaintext.to_string());
        if self.fail {
            return Err(ServiceError::Internal(LEAKED_DETAIL.into()));
        }
        Ok(self.hash.clone())
    }
}

#[derive(Default)]
pub struct AccountRepositoryStub {
    pub calls: Mutex<Vec<InsertAccountRequest>>,
    id: String,
    fail: bool,
}

impl AccountRepositoryStub {
    pub fn assigning(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl AccountCommandRepositoryTrait for AccountRepositoryStub {
    async fn create_account(&self, req: &InsertAccountRequest) -> Result<Account, RepositoryError> {
        self.calls.lock().unwrap().push(req.clone());
        if self.fail {
            return Err(RepositoryError::Custom(LEAKED_DETAIL.into()));
        }
        Ok(Account {
            id: self.id.clone(),
            name: req.name.clone(),
            email: req.email.clone(),
            password_hash: req.password_hash.clone(),
        })
    }
}

/// Stands in for the whole use case when only the controller is under test.
#[derive(Default)]
pub struct CreateAccountServiceStub {
    pub calls: Mutex<Vec<CreateAccountRequest>>,
    fail: bool,
}

impl CreateAccountServiceStub {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl CreateAccountServiceTrait for CreateAccountServiceStub {
    async fn create(&self, req: &CreateAccountRequest) -> Result<Account, ServiceError> {
        self.calls.lock().unwrap().push(req.clone());
        if self.fail {
            return Err(ServiceError::Internal(LEAKED_DETAIL.into()));
        }
        Ok(Account {
            id: "valid_id".into(),
            name: req.name.clone(),
            email: req.email.clone(),
            password_hash: "hashed_password".into(),
        })
    }
}
