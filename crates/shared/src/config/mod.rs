mod database;
mod email_validator;
mod hashing;
mod myconfig;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::email_validator::EmailValidator;
pub use self::hashing::Hashing;
pub use self::myconfig::Config;
