//! Identity service: registration, credential checks, and the verification
//! gate over the user store.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    IdentityGateway, PasswordHasher, ProofVerifier, RegistrationRequest, UserRepository,
    UserRepositoryError,
};
use crate::domain::user::{AadhaarNumber, FullName, User};
use crate::domain::{validate_email, Error};

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
        UserRepositoryError::Duplicate { field } => {
            Error::conflict(format!("a user with this {field} already exists"))
                .with_details(json!({ "field": field, "code": "duplicate" }))
        }
    }
}

const BAD_CREDENTIALS: &str = "invalid full name or password";

/// Identity store facade plus verification gate.
///
/// The proof verifier is pluggable; swapping the mock OTP check for a real
/// provider does not touch this service.
#[derive(Clone)]
pub struct IdentityService<R, H, V> {
    users: Arc<R>,
    hasher: H,
    verifier: V,
}

impl<R, H, V> IdentityService<R, H, V> {
    /// Create the service over a user repository, hasher, and verifier.
    pub fn new(users: Arc<R>, hasher: H, verifier: V) -> Self {
        Self {
            users,
            hasher,
            verifier,
        }
    }
}

#[async_trait]
impl<R, H, V> IdentityGateway for IdentityService<R, H, V>
where
    R: UserRepository,
    H: PasswordHasher,
    V: ProofVerifier,
{
    async fn register(&self, request: RegistrationRequest) -> Result<User, Error> {
        if request.password.is_empty() {
            return Err(Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "missing_field" })));
        }
        if let Some(email) = request.email.as_deref() {
            validate_email(email).map_err(|err| {
                Error::invalid_request(err.to_string())
                    .with_details(json!({ "field": "email", "code": "invalid_email" }))
            })?;
        }

        let password_hash = self
            .hasher
            .hash(&request.password)
            .map_err(|err| Error::internal(err.to_string()))?;

        let RegistrationRequest {
            full_name,
            email,
            phone,
            aadhaar_number,
            role,
            ..
        } = request;

        let user = self
            .users
            .insert(crate::domain::user::NewUser {
                full_name,
                email,
                phone,
                aadhaar_number,
                role,
                password_hash,
            })
            .await
            .map_err(map_repository_error)?;

        info!(user_id = user.id(), role = %user.role(), "user registered");
        Ok(user)
    }

    async fn authenticate(&self, full_name: &FullName, password: &str) -> Result<User, Error> {
        let user = self
            .users
            .find_by_full_name(full_name)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized(BAD_CREDENTIALS))?;

        if !self.hasher.verify(password, user.password_hash()) {
            return Err(Error::unauthorized(BAD_CREDENTIALS));
        }
        Ok(user)
    }

    async fn verify_identity(&self, aadhaar: &AadhaarNumber, proof: &str) -> Result<User, Error> {
        // Proof check precedes the lookup so a wrong code never probes the
        // store for account existence.
        if !self.verifier.verify(aadhaar, proof) {
            return Err(Error::invalid_request("invalid OTP")
                .with_details(json!({ "field": "otp", "code": "invalid_proof" })));
        }

        let user = self
            .users
            .find_by_aadhaar(aadhaar)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("user with this Aadhaar not found"))?;

        let verified = self
            .users
            .mark_verified(user.id())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("user with this Aadhaar not found"))?;

        info!(user_id = verified.id(), "identity verified");
        Ok(verified)
    }
}

#[cfg(test)]
#[path = "identity_service_tests.rs"]
mod tests;
