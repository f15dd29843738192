//! Port for report persistence and listing.

use async_trait::async_trait;

use crate::domain::report::{NewReport, Report, ReportPatch};

use super::define_port_error;

define_port_error! {
    /// Errors raised by report repository adapters.
    pub enum ReportRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "report repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "report repository query failed: {message}",
    }
}

/// Port for writing and reading reports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Persist a new report and assign its sequential identifier.
    async fn insert(&self, report: NewReport) -> Result<Report, ReportRepositoryError>;

    /// Find a report by identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<Report>, ReportRepositoryError>;

    /// Apply every supplied patch field in a single atomic write.
    ///
    /// Returns `None` when the report does not exist. Either the whole field
    /// set is written or none of it is.
    async fn apply_patch(
        &self,
        id: i64,
        patch: ReportPatch,
    ) -> Result<Option<Report>, ReportRepositoryError>;

    /// List all reports ordered by `created_at` descending, ties broken by
    /// identifier descending.
    ///
    /// Each call re-queries current store contents; it is not a snapshot.
    async fn list(&self) -> Result<Vec<Report>, ReportRepositoryError>;

    /// Remove a report. Returns whether a record was removed.
    async fn delete(&self, id: i64) -> Result<bool, ReportRepositoryError>;
}

/// Fixture implementation for tests that never touch report persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReportRepository;

#[async_trait]
impl ReportRepository for FixtureReportRepository {
    async fn insert(&self, _report: NewReport) -> Result<Report, ReportRepositoryError> {
        Err(ReportRepositoryError::query("fixture repository is empty"))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Report>, ReportRepositoryError> {
        Ok(None)
    }

    async fn apply_patch(
        &self,
        _id: i64,
        _patch: ReportPatch,
    ) -> Result<Option<Report>, ReportRepositoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<Report>, ReportRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _id: i64) -> Result<bool, ReportRepositoryError> {
        Ok(false)
    }
}
