use crate::domain::{
    error::DomainError,
    models::account::{Account, AccountId},
    repositories::account_repository::AccountRepository,
};

pub struct GetAccountUsecase<A: AccountRepository> {
    account_repository: A,
}

impl<A: AccountRepository> GetAccountUsecase<A> {
    pub fn new(account_repository: A) -> Self {
        Self { account_repository }
    }

    pub async fn get_account(&self, id: AccountId) -> Result<Account, DomainError>
    where
        A: Send + Sync,
    {
        self.account_repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::AccountNotFound)
    }
}
