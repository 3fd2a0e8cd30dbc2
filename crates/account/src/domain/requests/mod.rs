mod account;

pub use self::account::{CreateAccountRequest, InsertAccountRequest, SignUpRequest};
