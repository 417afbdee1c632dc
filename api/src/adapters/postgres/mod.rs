//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod choice_repo;
pub mod question_repo;
pub mod schema;


pub use choice_repo::PostgresChoiceRepository;
pub use question_repo::PostgresQuestionRepository;
pub use schema::create_schema;
