//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::adapters::create_schema;
use crate::domain::entities::{Choice, NewChoice, NewQuestion, Question};
use crate::domain::ports::QuestionRepository;

/// `now` shifted by a number of days (negative for the past)
pub fn days_from_now(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

/// The two default choices every fixture question gets
pub fn two_choices() -> Vec<NewChoice> {
    vec![NewChoice::new("Choice 1"), NewChoice::new("Choice 2")]
}

/// Create a question published `days` away from now, with two choices.
///
/// Negative `days` for past questions, positive for future ones.
pub async fn create_question<R: QuestionRepository + ?Sized>(
    repo: &R,
    question_text: &str,
    days: i64,
) -> (Question, Vec<Choice>) {
    create_question_at(repo, question_text, days_from_now(days)).await
}

/// Create a question with an exact `pub_date`, with two choices
pub async fn create_question_at<R: QuestionRepository + ?Sized>(
    repo: &R,
    question_text: &str,
    pub_date: DateTime<Utc>,
) -> (Question, Vec<Choice>) {
    repo.create_with_choices(&NewQuestion::new(question_text, pub_date), &two_choices())
        .await
        .expect("fixture question should save")
}

/// Fresh in-memory SQLite database with the poll schema applied
pub async fn sqlite_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // Every pooled connection would otherwise get its own empty database
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory SQLite");
    create_schema(&db).await.expect("Failed to create schema");
    db
}
