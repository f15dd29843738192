//! Announcement feed service: append and list, no invariants beyond ordering.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::announcement::{Announcement, NewAnnouncement};
use crate::domain::ports::{AnnouncementFeed, AnnouncementRepository, AnnouncementRepositoryError};
use crate::domain::Error;

fn map_repository_error(error: AnnouncementRepositoryError) -> Error {
    match error {
        AnnouncementRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("announcement store unavailable: {message}"))
        }
        AnnouncementRepositoryError::Query { message } => {
            Error::internal(format!("announcement store error: {message}"))
        }
    }
}

/// Feed service over the announcement store.
#[derive(Clone)]
pub struct AnnouncementService<R> {
    announcements: Arc<R>,
}

impl<R> AnnouncementService<R> {
    /// Create the service over an announcement repository.
    pub fn new(announcements: Arc<R>) -> Self {
        Self { announcements }
    }
}

#[async_trait]
impl<R> AnnouncementFeed for AnnouncementService<R>
where
    R: AnnouncementRepository,
{
    async fn publish(&self, announcement: NewAnnouncement) -> Result<Announcement, Error> {
        if announcement.title.trim().is_empty() {
            return Err(Error::invalid_request("title must not be empty")
                .with_details(json!({ "field": "title", "code": "missing_field" })));
        }
        if announcement.description.trim().is_empty() {
            return Err(Error::invalid_request("description must not be empty")
                .with_details(json!({ "field": "description", "code": "missing_field" })));
        }
        self.announcements
            .insert(announcement)
            .await
            .map_err(map_repository_error)
    }

    async fn list(&self) -> Result<Vec<Announcement>, Error> {
        self.announcements
            .list()
            .await
            .map_err(map_repository_error)
    }
}
