//! Administrative console configuration
//!
//! Declarative admin options for questions and choices: which inline editor
//! is used, how inline formsets are validated, and how the change list is
//! searched and filtered. HTTP plumbing lives in `handlers::admin`.

pub mod inline;
pub mod question_admin;

pub use inline::{ChoiceInline, FormsetConfig, InlineChoiceForm, InlineEditor, MinChoicesPolicy};
pub use question_admin::{
    ChangeListQuery, DateFilter, QuestionAddForm, QuestionAdmin, MIN_CHOICES,
};
