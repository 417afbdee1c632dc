//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod choice;
pub mod question;

pub use choice::{Choice, ChoiceChanges, ChoiceId, NewChoice};
pub use question::{
    validate_text, NewQuestion, Question, QuestionChanges, QuestionId, MAX_TEXT_LEN,
};
