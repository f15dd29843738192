//! Pluggable identity-proof verification capability.
//!
//! The shipped implementation accepts a fixed one-time code; a production
//! deployment swaps in a real OTP provider without touching the identity
//! service.

use crate::domain::user::AadhaarNumber;

/// Checks an identity-proof code against a claimed national-id number.
pub trait ProofVerifier: Send + Sync {
    /// Whether `proof` is a valid code for `claim`.
    fn verify(&self, claim: &AadhaarNumber, proof: &str) -> bool;
}

/// Default one-time code accepted by [`MockOtpVerifier`].
pub const MOCK_OTP_CODE: &str = "123456";

/// Mock verifier accepting a single fixed code for every claim.
#[derive(Debug, Clone)]
pub struct MockOtpVerifier {
    code: String,
}

impl MockOtpVerifier {
    /// Verifier accepting the given code.
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl Default for MockOtpVerifier {
    fn default() -> Self {
        Self::new(MOCK_OTP_CODE)
    }
}

impl ProofVerifier for MockOtpVerifier {
    fn verify(&self, _claim: &AadhaarNumber, proof: &str) -> bool {
        proof == self.code
    }
}

/// Verifier rejecting every proof, for tests exercising the failure path.
#[derive(Debug, Default, Clone, Copy)]
pub struct RejectAllVerifier;

impl ProofVerifier for RejectAllVerifier {
    fn verify(&self, _claim: &AadhaarNumber, _proof: &str) -> bool {
        false
    }
}
