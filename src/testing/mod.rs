//! Helpers shared by unit and integration tests

pub mod setup;
