use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::account::{Account, AccountId},
};

/// Read side of the account store
#[async_trait]
pub trait AccountRepository {
    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError>;
    async fn exists_by_phone(&self, phone: &str) -> Result<bool, RepositoryError>;
    /// Account joined with its profile, if any
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError>;
}
