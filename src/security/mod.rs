pub mod password;
pub mod sanitizer;

pub use password::{HashError, PasswordHasher};
pub use sanitizer::Sanitizer;
