//! Hexagon ports: driven persistence/capability traits and the driving
//! use-case traits implemented by the domain services.

mod macros;

pub mod announcement_feed;
pub mod announcement_repository;
pub mod identity_gateway;
pub mod password_hasher;
pub mod proof_verifier;
pub mod report_lifecycle;
pub mod report_repository;
pub mod user_repository;

pub(crate) use macros::define_port_error;

pub use announcement_feed::AnnouncementFeed;
pub use announcement_repository::{
    AnnouncementRepository, AnnouncementRepositoryError, FixtureAnnouncementRepository,
};
pub use identity_gateway::{IdentityGateway, RegistrationRequest};
pub use password_hasher::{Argon2PasswordHasher, PasswordHashError, PasswordHasher};
pub use proof_verifier::{MockOtpVerifier, ProofVerifier, RejectAllVerifier, MOCK_OTP_CODE};
pub use report_lifecycle::ReportLifecycle;
pub use report_repository::{FixtureReportRepository, ReportRepository, ReportRepositoryError};
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};

#[cfg(test)]
pub use announcement_feed::MockAnnouncementFeed;
#[cfg(test)]
pub use identity_gateway::MockIdentityGateway;
#[cfg(test)]
pub use report_lifecycle::MockReportLifecycle;
#[cfg(test)]
pub use report_repository::MockReportRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
