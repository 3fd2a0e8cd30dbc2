use std::sync::Arc;

use crate::errors::ServiceError;

pub type DynEmailValidator = Arc<dyn EmailValidatorTrait + Send + Sync>;

/// Syntactic email check.
///
/// An `Err` means the check itself could not run, not that the address is invalid.
pub trait EmailValidatorTrait {
    fn is_valid(&self, email: &str) -> Result<bool, ServiceError>;
}
