//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod admin_service;
pub mod poll_service;

pub use admin_service::{AdminService, QuestionRow};
pub use poll_service::{PollService, QuestionWithChoices, VoteOutcome, DEFAULT_INDEX_PAGE_SIZE};
