//! Port for user persistence and identity lookups.

use async_trait::async_trait;

use crate::domain::user::{AadhaarNumber, FullName, NewUser, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// A unique field collided with an existing record.
        Duplicate { field: String } =>
            "a user with this {field} already exists",
    }
}

/// Port for writing and reading user records.
///
/// Contract: deleting a user clears the `owner` reference on every report
/// attributed to them (SET NULL); reports themselves are never cascaded.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user, enforcing uniqueness of the login key and the
    /// optional contact fields.
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    /// Find a user by identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserRepositoryError>;

    /// Find a user by login key.
    async fn find_by_full_name(
        &self,
        full_name: &FullName,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Find a user by national-id number.
    async fn find_by_aadhaar(
        &self,
        aadhaar: &AadhaarNumber,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Set `is_verified = true` on the user and return the updated record.
    ///
    /// Verifying an already-verified user is a no-op success.
    async fn mark_verified(&self, id: i64) -> Result<Option<User>, UserRepositoryError>;

    /// Remove a user, clearing owner references on their reports.
    ///
    /// Returns whether a record was removed.
    async fn delete(&self, id: i64) -> Result<bool, UserRepositoryError>;
}

/// Fixture implementation for tests that never touch user persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert(&self, _user: NewUser) -> Result<User, UserRepositoryError> {
        Err(UserRepositoryError::query("fixture repository is empty"))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn find_by_full_name(
        &self,
        _full_name: &FullName,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn find_by_aadhaar(
        &self,
        _aadhaar: &AadhaarNumber,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn mark_verified(&self, _id: i64) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: i64) -> Result<bool, UserRepositoryError> {
        Ok(false)
    }
}
