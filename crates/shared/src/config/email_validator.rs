use crate::{abstract_trait::EmailValidatorTrait, errors::ServiceError};
use validator::ValidateEmail;

/// [`EmailValidatorTrait`] backed by the `validator` crate's HTML5 email rules.
#[derive(Clone, Default)]
pub struct EmailValidator;

impl EmailValidator {
    pub fn new() -> Self {
        Self
    }
}

impl EmailValidatorTrait for EmailValidator {
    fn is_valid(&self, email: &str) -> Result<bool, ServiceError> {
        Ok(email.validate_email())
    }
}
