//! PostgreSQL adapter for QuestionRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::domain::entities::{
    Choice, NewChoice, NewQuestion, Question, QuestionChanges, QuestionId,
};
use crate::domain::ports::{QuestionFilter, QuestionRepository};
use crate::entity::{choices, questions};
use crate::error::DomainError;

/// PostgreSQL implementation of QuestionRepository
pub struct PostgresQuestionRepository {
    db: DatabaseConnection,
}

impl PostgresQuestionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl QuestionRepository for PostgresQuestionRepository {
    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, DomainError> {
        let result = questions::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_published(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Question>, DomainError> {
        let results = questions::Entity::find()
            .filter(questions::Column::PubDate.lte(now.fixed_offset()))
            .order_by_desc(questions::Column::PubDate)
            .order_by_desc(questions::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn list(&self, filter: &QuestionFilter) -> Result<Vec<Question>, DomainError> {
        let mut query = questions::Entity::find();

        if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(questions::Column::QuestionText)))
                    .like(LikeExpr::new(contains_pattern(&term.to_lowercase())).escape('\\')),
            );
        }
        if let Some(from) = filter.published_from {
            query = query.filter(questions::Column::PubDate.gte(from.fixed_offset()));
        }
        if let Some(until) = filter.published_until {
            query = query.filter(questions::Column::PubDate.lt(until.fixed_offset()));
        }

        let results = query
            .order_by_desc(questions::Column::PubDate)
            .order_by_desc(questions::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create_with_choices(
        &self,
        question: &NewQuestion,
        new_choices: &[NewChoice],
    ) -> Result<(Question, Vec<Choice>), DomainError> {
        question.validate_with_choices(new_choices)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        // The question needs its identity before any choice can point at it
        let saved = questions::ActiveModel {
            id: NotSet,
            question_text: Set(question.question_text.clone()),
            pub_date: Set(question.pub_date.fixed_offset()),
        }
        .insert(&txn)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut saved_choices = Vec::with_capacity(new_choices.len());
        for choice in new_choices {
            let model = choices::ActiveModel {
                id: NotSet,
                question_id: Set(saved.id),
                choice_text: Set(choice.choice_text.clone()),
                votes: Set(choice.votes),
            }
            .insert(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
            saved_choices.push(Choice::from(model));
        }

        // Dropping `txn` on an early return above rolls everything back
        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok((saved.into(), saved_choices))
    }

    async fn update(
        &self,
        id: &QuestionId,
        changes: &QuestionChanges,
    ) -> Result<Question, DomainError> {
        changes.validate()?;

        if changes.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| DomainError::NotFound(format!("Question {} not found", id)));
        }

        let mut model = questions::ActiveModel {
            id: Set(id.0),
            ..Default::default()
        };
        if let Some(text) = &changes.question_text {
            model.question_text = Set(text.clone());
        }
        if let Some(pub_date) = changes.pub_date {
            model.pub_date = Set(pub_date.fixed_offset());
        }

        let updated = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::NotFound(format!("Question {} not found", id)),
            e => DomainError::Database(e.to_string()),
        })?;

        Ok(updated.into())
    }

    async fn delete(&self, id: &QuestionId) -> Result<(), DomainError> {
        // Choices are removed by the ON DELETE CASCADE foreign key
        let result = questions::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Question {} not found", id)));
        }
        Ok(())
    }
}

/// `LIKE` pattern matching `term` anywhere, with its wildcards taken literally
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Convert SeaORM model to domain entity
impl From<questions::Model> for Question {
    fn from(model: questions::Model) -> Self {
        Question {
            id: QuestionId(model.id),
            question_text: model.question_text,
            pub_date: model.pub_date.with_timezone(&Utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("course"), "%course%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\"), "%c:\\\\%");
    }
}
