//! Shared fixtures for HTTP handler tests.

use std::sync::Arc;

use actix_web::{web, App};

use crate::domain::ports::{Argon2PasswordHasher, MockOtpVerifier};
use crate::domain::{AnnouncementService, IdentityService, ReportService};
use crate::inbound::http::auth::JwtCodec;
use crate::inbound::http::routes;
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::InMemoryStore;

/// Signing secret used by every handler test.
pub const TEST_JWT_SECRET: &[u8] = b"handler-test-secret";

/// Fully wired state over a fresh in-memory store.
pub fn test_state() -> HttpState {
    let store = Arc::new(InMemoryStore::default());
    HttpState {
        identity: Arc::new(IdentityService::new(
            Arc::clone(&store),
            Argon2PasswordHasher,
            MockOtpVerifier::default(),
        )),
        reports: Arc::new(ReportService::new(Arc::clone(&store))),
        announcements: Arc::new(AnnouncementService::new(store)),
    }
}

/// Test application exposing the full API surface over the given state.
pub fn test_app_with(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(JwtCodec::new(TEST_JWT_SECRET)))
        .wrap(crate::middleware::Trace)
        .configure(routes::configure)
}
