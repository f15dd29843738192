//! Announcement feed handlers.

use actix_web::{get, post, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Announcement, Error, NewAnnouncement, Priority};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Publication body for `POST /api/announcements`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PublishAnnouncementRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
}

/// Announcement representation returned by the API.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AnnouncementResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub date: DateTime<Utc>,
}

impl From<Announcement> for AnnouncementResponse {
    fn from(announcement: Announcement) -> Self {
        Self {
            id: announcement.id(),
            title: announcement.title().to_owned(),
            description: announcement.description().to_owned(),
            priority: announcement.priority(),
            date: announcement.date(),
        }
    }
}

/// List announcements, newest first.
#[utoipa::path(
    get,
    path = "/api/announcements",
    responses(
        (status = 200, description = "Announcements in descending publication order", body = [AnnouncementResponse]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["announcements"],
    operation_id = "listAnnouncements",
    security([])
)]
#[get("/announcements")]
pub async fn list_announcements(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<AnnouncementResponse>>> {
    let announcements = state.announcements.list().await?;
    Ok(web::Json(
        announcements
            .into_iter()
            .map(AnnouncementResponse::from)
            .collect(),
    ))
}

/// Publish a new announcement.
#[utoipa::path(
    post,
    path = "/api/announcements",
    request_body = PublishAnnouncementRequest,
    responses(
        (status = 201, description = "Announcement published", body = AnnouncementResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["announcements"],
    operation_id = "publishAnnouncement"
)]
#[post("/announcements")]
pub async fn publish_announcement(
    state: web::Data<HttpState>,
    payload: web::Json<PublishAnnouncementRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let announcement = state
        .announcements
        .publish(NewAnnouncement {
            title: payload.title,
            description: payload.description,
            priority: payload.priority,
        })
        .await?;
    Ok(HttpResponse::Created().json(AnnouncementResponse::from(announcement)))
}
