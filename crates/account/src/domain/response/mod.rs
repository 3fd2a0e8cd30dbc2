mod signup;

pub use self::signup::{SignUpBody, SignUpResponse};
