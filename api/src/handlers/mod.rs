//! HTTP handlers
//!
//! Axum request handlers for the poll pages and the admin console.

pub mod admin;
pub mod polls;

pub use admin::{
    admin_index, create_choice, create_question, delete_choice, delete_question, get_choice,
    get_question, list_choices, list_questions, update_choice, update_question,
};
pub use polls::{detail, index, results, vote};
