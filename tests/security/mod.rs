//! Security tests module
//!
//! The SQL injection tests need a real database and only build with the
//! `sqlite` feature.

pub mod enumeration_test;
#[cfg(feature = "sqlite")]
pub mod sql_injection_test;
pub mod xss_test;
