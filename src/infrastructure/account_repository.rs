use async_trait::async_trait;
use entity::{profiles, users};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::domain::{
    error::RepositoryError,
    models::account::{Account, AccountId},
    repositories::account_repository::AccountRepository,
};

#[derive(Clone)]
pub struct SqlAccountRepository {
    db: DatabaseConnection,
}

impl SqlAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for SqlAccountRepository {
    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(user.is_some())
    }

    async fn exists_by_phone(&self, phone: &str) -> Result<bool, RepositoryError> {
        let user = users::Entity::find()
            .filter(users::Column::Phone.eq(phone))
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(user.is_some())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        let found = users::Entity::find_by_id(id.value())
            .find_also_related(profiles::Entity)
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(found.map(|(user, profile)| {
            Account::new(
                AccountId::new(user.id),
                user.full_name,
                user.email,
                user.phone,
                profile.map(|p| p.profile_picture),
            )
        }))
    }
}
