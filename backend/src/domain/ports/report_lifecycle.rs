//! Driving port for the report lifecycle state machine.

use async_trait::async_trait;

use crate::domain::report::{Report, ReportDraft, ReportPatch};
use crate::domain::user::Actor;
use crate::domain::Error;

/// Report operations consumed by the HTTP adapter.
///
/// `actor` is the authenticated principal, absent for anonymous callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportLifecycle: Send + Sync {
    /// Create a report with `status` forced to pending and ownership
    /// attributed to the actor when present.
    async fn create(&self, draft: ReportDraft, actor: Option<Actor>) -> Result<Report, Error>;

    /// Apply a partial update.
    ///
    /// A patch touching `status` requires a district-leader actor; on a
    /// failed gate the whole update is rejected with no field changes.
    async fn update(
        &self,
        id: i64,
        patch: ReportPatch,
        actor: Option<Actor>,
    ) -> Result<Report, Error>;

    /// Fetch a single report.
    async fn get(&self, id: i64) -> Result<Report, Error>;

    /// List all reports, newest first.
    async fn list(&self) -> Result<Vec<Report>, Error>;

    /// Delete a report. Ungated, mirroring the generic store surface.
    async fn delete(&self, id: i64) -> Result<(), Error>;
}
