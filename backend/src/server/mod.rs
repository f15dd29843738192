//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};

#[cfg(debug_assertions)]
use utoipa::OpenApi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{Argon2PasswordHasher, MockOtpVerifier};
use crate::domain::{AnnouncementService, IdentityService, ReportService};
use crate::inbound::http::auth::JwtCodec;
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::routes;
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::persistence::InMemoryStore;

/// Wire the domain services over a shared in-memory store.
///
/// All three repositories point at the same store so a user deletion can
/// clear owner references on reports under one lock.
fn build_http_state(config: &ServerConfig) -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    HttpState {
        identity: Arc::new(IdentityService::new(
            Arc::clone(&store),
            Argon2PasswordHasher,
            MockOtpVerifier::new(config.otp_code.clone()),
        )),
        reports: Arc::new(ReportService::new(Arc::clone(&store))),
        announcements: Arc::new(AnnouncementService::new(store)),
    }
}

#[cfg(debug_assertions)]
async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ApiDoc::openapi())
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    codec: web::Data<JwtCodec>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        codec,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(codec)
        .wrap(Trace)
        .configure(routes::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.route("/api-docs/openapi.json", web::get().to(openapi_json));

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let codec = web::Data::new(JwtCodec::with_ttls(
        &config.jwt_secret,
        config.access_ttl,
        config.refresh_ttl,
    ));

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            codec: codec.clone(),
        })
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
