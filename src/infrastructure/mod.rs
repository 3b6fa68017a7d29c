pub mod account_registration_repository;
pub mod account_repository;
pub mod argon2_password_hasher;
pub mod schema;
