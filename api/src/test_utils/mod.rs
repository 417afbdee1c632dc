//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - The in-memory store has to honour the same invariants as the database
//!   (cascade delete, all-or-nothing question saves), which a canned mock
//!   would not
//! - Manual mocks are more explicit and easier to debug
//!
//! Router-level tests use the SeaORM adapters on in-memory SQLite instead;
//! see `fixtures::sqlite_db`.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
