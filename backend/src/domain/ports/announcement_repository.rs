//! Port for the append-only announcement feed.

use async_trait::async_trait;

use crate::domain::announcement::{Announcement, NewAnnouncement};

use super::define_port_error;

define_port_error! {
    /// Errors raised by announcement repository adapters.
    pub enum AnnouncementRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "announcement repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "announcement repository query failed: {message}",
    }
}

/// Port for appending to and reading the broadcast feed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    /// Append an announcement, stamping its publication date.
    async fn insert(
        &self,
        announcement: NewAnnouncement,
    ) -> Result<Announcement, AnnouncementRepositoryError>;

    /// List announcements by publication date, newest first.
    async fn list(&self) -> Result<Vec<Announcement>, AnnouncementRepositoryError>;
}

/// Fixture implementation for tests without a feed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnnouncementRepository;

#[async_trait]
impl AnnouncementRepository for FixtureAnnouncementRepository {
    async fn insert(
        &self,
        _announcement: NewAnnouncement,
    ) -> Result<Announcement, AnnouncementRepositoryError> {
        Err(AnnouncementRepositoryError::query(
            "fixture repository is empty",
        ))
    }

    async fn list(&self) -> Result<Vec<Announcement>, AnnouncementRepositoryError> {
        Ok(Vec::new())
    }
}
