//! Identity service coverage: registration, credentials, and the
//! verification gate.

use std::sync::Arc;

use crate::domain::ports::{
    Argon2PasswordHasher, IdentityGateway, MockOtpVerifier, MockUserRepository, ProofVerifier,
    RegistrationRequest, MOCK_OTP_CODE,
};
use crate::domain::user::{AadhaarNumber, FullName, Role};
use crate::domain::{ErrorCode, IdentityService};
use crate::outbound::persistence::InMemoryStore;

type Service = IdentityService<InMemoryStore, Argon2PasswordHasher, MockOtpVerifier>;

fn service() -> Service {
    IdentityService::new(
        Arc::new(InMemoryStore::new()),
        Argon2PasswordHasher,
        MockOtpVerifier::default(),
    )
}

fn registration(name: &str, aadhaar: Option<&str>) -> RegistrationRequest {
    RegistrationRequest {
        full_name: FullName::new(name).expect("valid name"),
        email: None,
        phone: None,
        aadhaar_number: aadhaar.map(|a| AadhaarNumber::new(a).expect("valid aadhaar")),
        role: Role::Citizen,
        password: "s3cret".to_owned(),
    }
}

#[tokio::test]
async fn registration_stores_only_a_hash() {
    let service = service();
    let user = service
        .register(registration("Asha Rao", None))
        .await
        .expect("registers");
    assert!(!user.password_hash().contains("s3cret"));
    assert!(!user.is_verified());
    assert_eq!(user.role(), Role::Citizen);
}

#[tokio::test]
async fn registered_credentials_authenticate() {
    let service = service();
    service
        .register(registration("Asha Rao", None))
        .await
        .expect("registers");

    let name = FullName::new("Asha Rao").expect("valid name");
    let user = service
        .authenticate(&name, "s3cret")
        .await
        .expect("authenticates");
    assert_eq!(user.full_name().as_ref(), "Asha Rao");

    let err = service
        .authenticate(&name, "wrong")
        .await
        .expect_err("bad password");
    assert_eq!(err.code, ErrorCode::Unauthorized);
}

#[tokio::test]
async fn unknown_user_fails_with_uniform_message() {
    let service = service();
    let name = FullName::new("Nobody").expect("valid name");
    let err = service
        .authenticate(&name, "s3cret")
        .await
        .expect_err("unknown user");
    assert_eq!(err.code, ErrorCode::Unauthorized);
    assert_eq!(err.message, "invalid full name or password");
}

#[tokio::test]
async fn duplicate_login_key_conflicts() {
    let service = service();
    service
        .register(registration("Asha Rao", None))
        .await
        .expect("first registration");
    let err = service
        .register(registration("Asha Rao", None))
        .await
        .expect_err("duplicate name");
    assert_eq!(err.code, ErrorCode::Conflict);
}

#[tokio::test]
async fn empty_password_is_rejected() {
    let service = service();
    let request = RegistrationRequest {
        password: String::new(),
        ..registration("Asha Rao", None)
    };
    let err = service.register(request).await.expect_err("no password");
    assert_eq!(err.code, ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let service = service();
    let request = RegistrationRequest {
        email: Some("not-an-address".to_owned()),
        ..registration("Asha Rao", None)
    };
    let err = service.register(request).await.expect_err("bad email");
    assert_eq!(err.code, ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn verification_flips_the_flag_idempotently() {
    let service = service();
    service
        .register(registration("Asha Rao", Some("123456789012")))
        .await
        .expect("registers");

    let aadhaar = AadhaarNumber::new("123456789012").expect("valid aadhaar");
    let once = service
        .verify_identity(&aadhaar, MOCK_OTP_CODE)
        .await
        .expect("verifies");
    assert!(once.is_verified());

    // Re-verifying an already verified user is a no-op success.
    let twice = service
        .verify_identity(&aadhaar, MOCK_OTP_CODE)
        .await
        .expect("verifies again");
    assert!(twice.is_verified());
}

#[tokio::test]
async fn wrong_proof_leaves_user_unverified() {
    let service = service();
    service
        .register(registration("Asha Rao", Some("123456789012")))
        .await
        .expect("registers");

    let aadhaar = AadhaarNumber::new("123456789012").expect("valid aadhaar");
    let err = service
        .verify_identity(&aadhaar, "000000")
        .await
        .expect_err("wrong code");
    assert_eq!(err.code, ErrorCode::InvalidRequest);

    let name = FullName::new("Asha Rao").expect("valid name");
    let user = service
        .authenticate(&name, "s3cret")
        .await
        .expect("authenticates");
    assert!(!user.is_verified());
}

#[tokio::test]
async fn unknown_aadhaar_is_not_found() {
    let service = service();
    let aadhaar = AadhaarNumber::new("999999999999").expect("valid aadhaar");
    let err = service
        .verify_identity(&aadhaar, MOCK_OTP_CODE)
        .await
        .expect_err("no such claim");
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn invalid_proof_never_touches_the_store() {
    struct NoneShallPass;
    impl ProofVerifier for NoneShallPass {
        fn verify(&self, _claim: &AadhaarNumber, _proof: &str) -> bool {
            false
        }
    }

    let mut users = MockUserRepository::new();
    users.expect_find_by_aadhaar().times(0);
    users.expect_mark_verified().times(0);

    let service = IdentityService::new(Arc::new(users), Argon2PasswordHasher, NoneShallPass);
    let aadhaar = AadhaarNumber::new("123456789012").expect("valid aadhaar");
    let err = service
        .verify_identity(&aadhaar, "123456")
        .await
        .expect_err("proof rejected");
    assert_eq!(err.code, ErrorCode::InvalidRequest);
}
