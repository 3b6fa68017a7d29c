use std::fmt;

use thiserror::Error;

/// Columns that must be unique across all accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    Phone,
}

impl UniqueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueField::Email => "email",
            UniqueField::Phone => "phone",
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Duplicate field: {0}")]
    DuplicateField(UniqueField),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("Account not found")]
    AccountNotFound,

    #[error("Password hashing failed")]
    PasswordHashing,
}

impl DomainError {
    /// Errors caused by the caller's input rather than by the backend
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::DuplicateField(_) | DomainError::EmptyField(_) | DomainError::AccountNotFound
        )
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
