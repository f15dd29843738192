//! Report API handlers.
//!
//! ```text
//! POST /api/reports {"category":"other","description":"...","latitude":12.9,"longitude":77.6}
//! GET /api/reports
//! PATCH /api/reports/42 {"status":"in_progress"}
//! ```

use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Category, Report, ReportDraft, ReportPatch, ReportStatus};
use crate::domain::Error;
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Creation body for `POST /api/reports`.
///
/// No status field is accepted: every report starts `pending` regardless of
/// what the client sends.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateReportRequest {
    pub category: Category,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Partial update body for `PATCH`/`PUT /api/reports/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateReportRequest {
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: Option<ReportStatus>,
}

impl From<UpdateReportRequest> for ReportPatch {
    fn from(value: UpdateReportRequest) -> Self {
        Self {
            category: value.category,
            description: value.description,
            latitude: value.latitude,
            longitude: value.longitude,
            address: value.address,
            image: value.image,
            status: value.status,
        }
    }
}

/// Report representation returned by the API.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ReportResponse {
    pub id: i64,
    pub owner: Option<i64>,
    pub category: Category,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub image: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        Self {
            id: report.id(),
            owner: report.owner(),
            category: report.category(),
            description: report.description().to_owned(),
            latitude: report.coordinates().latitude(),
            longitude: report.coordinates().longitude(),
            address: report.address().map(str::to_owned),
            image: report.image().map(str::to_owned),
            status: report.status(),
            created_at: report.created_at(),
        }
    }
}

/// Submit a new report.
///
/// Authentication is optional: an authenticated caller becomes the owner,
/// an anonymous submission is stored without one.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportRequest,
    responses(
        (status = 201, description = "Report created in pending status", body = ReportResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid bearer token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["reports"],
    operation_id = "createReport"
)]
#[post("/reports")]
pub async fn create_report(
    state: web::Data<HttpState>,
    auth: AuthContext,
    payload: web::Json<CreateReportRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let report = state
        .reports
        .create(
            ReportDraft {
                category: payload.category,
                description: payload.description,
                latitude: payload.latitude,
                longitude: payload.longitude,
                address: payload.address,
                image: payload.image,
            },
            auth.actor()?,
        )
        .await?;
    Ok(HttpResponse::Created().json(ReportResponse::from(report)))
}

/// List every report, newest first.
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "Reports in descending creation order", body = [ReportResponse]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["reports"],
    operation_id = "listReports",
    security([])
)]
#[get("/reports")]
pub async fn list_reports(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<ReportResponse>>> {
    let reports = state.reports.list().await?;
    Ok(web::Json(
        reports.into_iter().map(ReportResponse::from).collect(),
    ))
}

/// Fetch one report by id.
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(("id" = i64, Path, description = "Report identifier")),
    responses(
        (status = 200, description = "Report", body = ReportResponse),
        (status = 404, description = "No such report", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["reports"],
    operation_id = "getReport",
    security([])
)]
#[get("/reports/{id}")]
pub async fn get_report(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<web::Json<ReportResponse>> {
    let report = state.reports.get(id.into_inner()).await?;
    Ok(web::Json(ReportResponse::from(report)))
}

async fn apply_update(
    state: &HttpState,
    auth: &AuthContext,
    id: i64,
    payload: UpdateReportRequest,
) -> ApiResult<web::Json<ReportResponse>> {
    let report = state
        .reports
        .update(id, ReportPatch::from(payload), auth.actor()?)
        .await?;
    Ok(web::Json(ReportResponse::from(report)))
}

/// Partially update a report.
///
/// A patch touching `status` requires a district-leader bearer token and is
/// rejected as a whole otherwise; none of its fields are applied.
#[utoipa::path(
    patch,
    path = "/api/reports/{id}",
    params(("id" = i64, Path, description = "Report identifier")),
    request_body = UpdateReportRequest,
    responses(
        (status = 200, description = "Updated report", body = ReportResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid bearer token", body = Error),
        (status = 403, description = "Status change without district-leader role", body = Error),
        (status = 404, description = "No such report", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["reports"],
    operation_id = "patchReport"
)]
#[patch("/reports/{id}")]
pub async fn patch_report(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<i64>,
    payload: web::Json<UpdateReportRequest>,
) -> ApiResult<web::Json<ReportResponse>> {
    apply_update(&state, &auth, id.into_inner(), payload.into_inner()).await
}

/// Update a report; same semantics as `PATCH`, kept for client parity.
#[utoipa::path(
    put,
    path = "/api/reports/{id}",
    params(("id" = i64, Path, description = "Report identifier")),
    request_body = UpdateReportRequest,
    responses(
        (status = 200, description = "Updated report", body = ReportResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid bearer token", body = Error),
        (status = 403, description = "Status change without district-leader role", body = Error),
        (status = 404, description = "No such report", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["reports"],
    operation_id = "putReport"
)]
#[put("/reports/{id}")]
pub async fn put_report(
    state: web::Data<HttpState>,
    auth: AuthContext,
    id: web::Path<i64>,
    payload: web::Json<UpdateReportRequest>,
) -> ApiResult<web::Json<ReportResponse>> {
    apply_update(&state, &auth, id.into_inner(), payload.into_inner()).await
}

/// Delete a report.
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    params(("id" = i64, Path, description = "Report identifier")),
    responses(
        (status = 204, description = "Report deleted"),
        (status = 404, description = "No such report", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["reports"],
    operation_id = "deleteReport"
)]
#[delete("/reports/{id}")]
pub async fn delete_report(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.reports.delete(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "reports_tests.rs"]
mod tests;
