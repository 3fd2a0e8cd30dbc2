use crate::{
    handler::signup::SignUpController,
    repository::command::AccountCommandRepository,
    service::create_account::{CreateAccountService, CreateAccountServiceDeps},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynEmailValidator, DynEncrypter},
    config::ConnectionPool,
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub signup: Arc<SignUpController>,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("signup", &"SignUpController")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub hashing: DynEncrypter,
    pub email_validator: DynEmailValidator,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Result<Self> {
        let DependenciesInjectDeps {
            pool,
            hashing,
            email_validator,
        } = deps;

        let command = Arc::new(AccountCommandRepository::new(pool));

        let create_account = CreateAccountService::new(
            CreateAccountServiceDeps { hashing, command },
            registry,
        )
        .context("failed initialize create account service")?;

        let signup = Arc::new(SignUpController::new(
            email_validator,
            Arc::new(create_account),
        ));

        Ok(Self { signup })
    }
}
