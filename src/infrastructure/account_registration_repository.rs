use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    DatabaseConnection, TransactionTrait,
};

use crate::domain::{
    error::RepositoryError,
    models::{
        account::{Account, AccountId, NewAccount},
        credential::HashedPassword,
    },
    repositories::account_registration_repository::AccountRegistrationRepository,
};
use entity::{profiles, users};

#[derive(Clone)]
pub struct SqlAccountRegistrationRepository {
    db: DatabaseConnection,
}

impl SqlAccountRegistrationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRegistrationRepository for SqlAccountRegistrationRepository {
    async fn register_account_with_profile(
        &self,
        new_account: &NewAccount,
        password_hash: HashedPassword,
    ) -> Result<Account, RepositoryError> {
        // Begin transaction; dropping it on an early return rolls back
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // Insert user
        let user_model = users::ActiveModel {
            id: NotSet,
            full_name: Set(new_account.full_name().to_string()),
            email: Set(new_account.email().to_string()),
            password: Set(password_hash.as_str().to_string()),
            phone: Set(new_account.phone().to_string()),
        };

        let user = user_model
            .insert(&txn)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // Insert profile keyed by the new user id
        let profile_model = profiles::ActiveModel {
            id: NotSet,
            profile_picture: Set(new_account.profile_picture().to_string()),
            user_id: Set(user.id),
        };

        let profile = profile_model
            .insert(&txn)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // Commit transaction
        txn.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(Account::new(
            AccountId::new(user.id),
            user.full_name,
            user.email,
            user.phone,
            Some(profile.profile_picture),
        ))
    }
}
