//! PostgreSQL adapter for ChoiceRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::entities::{Choice, ChoiceChanges, ChoiceId, NewChoice, QuestionId};
use crate::domain::ports::ChoiceRepository;
use crate::entity::{choices, questions};
use crate::error::DomainError;

/// PostgreSQL implementation of ChoiceRepository
pub struct PostgresChoiceRepository {
    db: DatabaseConnection,
}

impl PostgresChoiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ChoiceRepository for PostgresChoiceRepository {
    async fn find_by_id(&self, id: &ChoiceId) -> Result<Option<Choice>, DomainError> {
        let result = choices::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<Choice>, DomainError> {
        self.list(Some(question_id)).await
    }

    async fn list(&self, question_id: Option<&QuestionId>) -> Result<Vec<Choice>, DomainError> {
        let mut query = choices::Entity::find();
        if let Some(question_id) = question_id {
            query = query.filter(choices::Column::QuestionId.eq(question_id.0));
        }

        let results = query
            .order_by_asc(choices::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(
        &self,
        question_id: &QuestionId,
        choice: &NewChoice,
    ) -> Result<Choice, DomainError> {
        choice.validate()?;

        let parent = questions::Entity::find_by_id(question_id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        if parent.is_none() {
            return Err(DomainError::NotFound(format!(
                "Question {} not found",
                question_id
            )));
        }

        let model = choices::ActiveModel {
            id: NotSet,
            question_id: Set(question_id.0),
            choice_text: Set(choice.choice_text.clone()),
            votes: Set(choice.votes),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(model.into())
    }

    async fn update(&self, id: &ChoiceId, changes: &ChoiceChanges) -> Result<Choice, DomainError> {
        changes.validate()?;

        if changes.choice_text.is_none() && changes.votes.is_none() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| DomainError::NotFound(format!("Choice {} not found", id)));
        }

        let mut model = choices::ActiveModel {
            id: Set(id.0),
            ..Default::default()
        };
        if let Some(text) = &changes.choice_text {
            model.choice_text = Set(text.clone());
        }
        if let Some(votes) = changes.votes {
            model.votes = Set(votes);
        }

        let updated = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::NotFound(format!("Choice {} not found", id)),
            e => DomainError::Database(e.to_string()),
        })?;

        Ok(updated.into())
    }

    async fn increment_votes(&self, id: &ChoiceId) -> Result<(), DomainError> {
        // Single UPDATE ... SET votes = votes + 1, so concurrent votes never lose updates
        let result = choices::Entity::update_many()
            .col_expr(
                choices::Column::Votes,
                Expr::col(choices::Column::Votes).add(1),
            )
            .filter(choices::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Choice {} not found", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: &ChoiceId) -> Result<(), DomainError> {
        let result = choices::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Choice {} not found", id)));
        }
        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<choices::Model> for Choice {
    fn from(model: choices::Model) -> Self {
        Choice {
            id: ChoiceId(model.id),
            question_id: QuestionId(model.question_id),
            choice_text: model.choice_text,
            votes: model.votes,
        }
    }
}
