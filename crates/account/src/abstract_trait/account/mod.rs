mod repository;
mod service;

pub use self::repository::{AccountCommandRepositoryTrait, DynAccountCommandRepository};
pub use self::service::{CreateAccountServiceTrait, DynCreateAccountService};
