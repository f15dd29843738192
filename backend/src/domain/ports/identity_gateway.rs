//! Driving port for registration, credential checks, and the verification
//! gate.

use async_trait::async_trait;

use crate::domain::user::{AadhaarNumber, FullName, Role, User};
use crate::domain::Error;

/// Fields submitted at registration, already structurally validated.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub full_name: FullName,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub aadhaar_number: Option<AadhaarNumber>,
    pub role: Role,
    pub password: String,
}

/// Identity operations consumed by the HTTP adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Register a new user; the password is hashed before persistence.
    async fn register(&self, request: RegistrationRequest) -> Result<User, Error>;

    /// Check credentials for token issuance.
    ///
    /// Fails `Unauthorized` with a uniform message for unknown names and
    /// wrong passwords alike.
    async fn authenticate(&self, full_name: &FullName, password: &str) -> Result<User, Error>;

    /// Verify an identity claim against a proof code and flip the verified
    /// flag.
    ///
    /// The proof is checked before any store lookup; re-verifying an already
    /// verified user is a no-op success.
    async fn verify_identity(&self, aadhaar: &AadhaarNumber, proof: &str) -> Result<User, Error>;
}
