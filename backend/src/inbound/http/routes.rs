//! Route registration for the `/api` surface.

use actix_web::web;

use crate::inbound::http::{announcements, reports, users};

/// Mount every API handler under the `/api` scope.
///
/// Health probes and the OpenAPI document are mounted by the server,
/// outside this scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(users::register)
            .service(users::issue_tokens)
            .service(users::refresh_token)
            .service(users::verify_aadhaar)
            .service(reports::create_report)
            .service(reports::list_reports)
            .service(reports::get_report)
            .service(reports::patch_report)
            .service(reports::put_report)
            .service(reports::delete_report)
            .service(announcements::list_announcements)
            .service(announcements::publish_announcement),
    );
}
