//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models for polls (questions and their choices)
//! - `ports`: Trait definitions for persistence

pub mod entities;
pub mod ports;
