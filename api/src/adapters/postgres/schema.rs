//! Schema bootstrap
//!
//! Creates the poll tables from the SeaORM entity definitions. The
//! `choices.question_id` foreign key carries `ON DELETE CASCADE`, so deleting
//! a question removes its choices inside the database.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityName, EntityTrait, Schema};

use crate::entity::{choices, questions};

/// Create all tables that do not exist yet. Parents before children.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, questions::Entity).await?;
    create_table(db, choices::Entity).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let table = entity.table_name().to_string();
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;
    tracing::debug!(table = %table, "Ensured table exists");
    Ok(())
}
