use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::{
        account::{Account, NewAccount},
        credential::HashedPassword,
    },
};

/// Repository for account registration that handles both account and profile creation atomically
#[async_trait]
pub trait AccountRegistrationRepository {
    /// Insert the account, then its profile keyed by the new account id, in a single transaction
    async fn register_account_with_profile(
        &self,
        new_account: &NewAccount,
        password_hash: HashedPassword,
    ) -> Result<Account, RepositoryError>;
}
