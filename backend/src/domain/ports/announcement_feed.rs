//! Driving port for the broadcast announcement feed.

use async_trait::async_trait;

use crate::domain::announcement::{Announcement, NewAnnouncement};
use crate::domain::Error;

/// Feed operations consumed by the HTTP adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnouncementFeed: Send + Sync {
    /// Publish a broadcast to all users.
    async fn publish(&self, announcement: NewAnnouncement) -> Result<Announcement, Error>;

    /// List broadcasts, newest first.
    async fn list(&self) -> Result<Vec<Announcement>, Error>;
}
