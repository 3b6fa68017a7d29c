use tracing::{debug, error};

use crate::domain::{
    error::{DomainError, UniqueField},
    models::{
        account::{Account, NewAccount},
        credential::PlainPassword,
    },
    repositories::{
        account_registration_repository::AccountRegistrationRepository,
        account_repository::AccountRepository,
    },
    services::password_service::PasswordHasher,
};

/// Raw registration input as received from the transport
#[derive(Debug)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub password: PlainPassword,
    pub phone: String,
    pub profile_picture: String,
}

pub struct RegisterAccountUsecase<
    A: AccountRepository,
    R: AccountRegistrationRepository,
    P: PasswordHasher,
> {
    account_repository: A,
    registration_repository: R,
    password_hasher: P,
}

impl<A: AccountRepository, R: AccountRegistrationRepository, P: PasswordHasher>
    RegisterAccountUsecase<A, R, P>
{
    pub fn new(account_repository: A, registration_repository: R, password_hasher: P) -> Self {
        Self {
            account_repository,
            registration_repository,
            password_hasher,
        }
    }

    /// Register an account and its profile.
    ///
    /// Email and phone are checked before anything is written, so a rejected
    /// registration leaves the store untouched. The unique constraints in the
    /// store remain the final word when two registrations race.
    pub async fn register(&self, form: RegistrationForm) -> Result<Account, DomainError>
    where
        A: Send + Sync,
        R: Send + Sync,
        P: Send + Sync + 'static,
    {
        let new_account =
            NewAccount::new(form.full_name, form.email, form.phone, form.profile_picture)?;

        if self
            .account_repository
            .exists_by_email(new_account.email())
            .await?
        {
            return Err(DomainError::DuplicateField(UniqueField::Email));
        }

        if self
            .account_repository
            .exists_by_phone(new_account.phone())
            .await?
        {
            return Err(DomainError::DuplicateField(UniqueField::Phone));
        }

        // Hash password off the async workers
        let hasher = self.password_hasher.clone();
        let password = form.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| {
                error!(error = %e, "password hashing task failed");
                DomainError::PasswordHashing
            })??;

        let account = self
            .registration_repository
            .register_account_with_profile(&new_account, password_hash)
            .await?;
        debug!(user_id = account.id().value(), "account and profile written");

        Ok(account)
    }
}
