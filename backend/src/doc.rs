//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every HTTP endpoint and the wire schemas they
//! exchange. The generated document is served at `/api-docs/openapi.json`
//! in debug builds and can be dumped by external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Category, Error, ErrorCode, Priority, ReportStatus};
use crate::domain::user::Role;
use crate::inbound::http::announcements::{AnnouncementResponse, PublishAnnouncementRequest};
use crate::inbound::http::auth::TokenPair;
use crate::inbound::http::reports::{CreateReportRequest, ReportResponse, UpdateReportRequest};
use crate::inbound::http::users::{
    AccessResponse, RefreshRequest, RegisterRequest, TokenRequest, UserResponse,
    VerifyAadhaarRequest,
};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /api/token."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Nagrik backend API",
        description = "Civic-issue reporting: geotagged reports, role-gated triage, \
                       identity verification, and announcements."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::issue_tokens,
        crate::inbound::http::users::refresh_token,
        crate::inbound::http::users::verify_aadhaar,
        crate::inbound::http::reports::create_report,
        crate::inbound::http::reports::list_reports,
        crate::inbound::http::reports::get_report,
        crate::inbound::http::reports::patch_report,
        crate::inbound::http::reports::put_report,
        crate::inbound::http::reports::delete_report,
        crate::inbound::http::announcements::list_announcements,
        crate::inbound::http::announcements::publish_announcement,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        Category,
        ReportStatus,
        Priority,
        RegisterRequest,
        UserResponse,
        TokenRequest,
        TokenPair,
        RefreshRequest,
        AccessResponse,
        VerifyAadhaarRequest,
        CreateReportRequest,
        UpdateReportRequest,
        ReportResponse,
        PublishAnnouncementRequest,
        AnnouncementResponse,
    )),
    tags(
        (name = "users", description = "Registration, tokens, and identity verification"),
        (name = "reports", description = "Report lifecycle and triage"),
        (name = "announcements", description = "Broadcast feed"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
