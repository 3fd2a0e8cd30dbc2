mod email_validator;
mod encrypter;

pub use self::email_validator::{DynEmailValidator, EmailValidatorTrait};
pub use self::encrypter::{DynEncrypter, EncrypterTrait};
