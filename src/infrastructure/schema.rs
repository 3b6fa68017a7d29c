use entity::{profiles, users};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema};

/// Create the `users` and `profiles` tables from the entity definitions if they are missing.
///
/// `profiles` references `users`, so the order matters.
pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, users::Entity).await?;
    create_table(db, profiles::Entity).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::{testing::*, *};

    #[tokio::test]
    async fn test_create_tables_is_idempotent() {
        let db = memory_database().await;
        create_tables(&db).await.unwrap();
        assert_eq!(row_counts(&db).await, (0, 0));
    }
}
