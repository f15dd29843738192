//! Report lifecycle service: creation defaults and role-gated status
//! transitions.
//!
//! This is the core state machine. Creation always lands in `pending`; any
//! status mutation afterwards requires a district-leader actor, and a patch
//! failing that gate is rejected wholesale so no partial write ever lands.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{ReportLifecycle, ReportRepository, ReportRepositoryError};
use crate::domain::report::{
    validate_latitude, validate_longitude, Coordinates, NewReport, Report, ReportDraft,
    ReportPatch, ReportStatus, ReportValidationError,
};
use crate::domain::user::{Actor, Role};
use crate::domain::Error;

fn map_repository_error(error: ReportRepositoryError) -> Error {
    match error {
        ReportRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("report store unavailable: {message}"))
        }
        ReportRepositoryError::Query { message } => {
            Error::internal(format!("report store error: {message}"))
        }
    }
}

fn field_error(field: &str, err: &ReportValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": field, "code": "invalid_value" }))
}

fn validate_description(description: &str) -> Result<(), Error> {
    if description.trim().is_empty() {
        return Err(field_error(
            "description",
            &ReportValidationError::EmptyDescription,
        ));
    }
    Ok(())
}

/// Lifecycle service over the report store.
#[derive(Clone)]
pub struct ReportService<R> {
    reports: Arc<R>,
}

impl<R> ReportService<R> {
    /// Create the service over a report repository.
    pub fn new(reports: Arc<R>) -> Self {
        Self { reports }
    }
}

impl<R> ReportService<R> {
    fn check_status_gate(patch: &ReportPatch, actor: Option<Actor>) -> Result<(), Error> {
        if !patch.touches_status() {
            return Ok(());
        }
        match actor.map(|a| a.role) {
            Some(Role::DistrictLeader) => Ok(()),
            // The whole patch is rejected, not just the status field.
            Some(Role::Citizen) | None => Err(Error::forbidden(
                "only district leaders may change report status",
            )),
        }
    }

    fn validate_patch(patch: &ReportPatch) -> Result<(), Error> {
        if let Some(description) = patch.description.as_deref() {
            validate_description(description)?;
        }
        if let Some(latitude) = patch.latitude {
            validate_latitude(latitude).map_err(|err| field_error("latitude", &err))?;
        }
        if let Some(longitude) = patch.longitude {
            validate_longitude(longitude).map_err(|err| field_error("longitude", &err))?;
        }
        Ok(())
    }
}

#[async_trait]
impl<R> ReportLifecycle for ReportService<R>
where
    R: ReportRepository,
{
    async fn create(&self, draft: ReportDraft, actor: Option<Actor>) -> Result<Report, Error> {
        validate_description(&draft.description)?;
        let coordinates = Coordinates::new(draft.latitude, draft.longitude)
            .map_err(|err| field_error("coordinates", &err))?;

        let report = self
            .reports
            .insert(NewReport {
                // Authenticated callers are always attributed.
                owner: actor.map(|a| a.user_id),
                category: draft.category,
                description: draft.description,
                coordinates,
                address: draft.address,
                image: draft.image,
                // A client-supplied status never reaches this point; creation
                // starts every report in pending.
                status: ReportStatus::Pending,
            })
            .await
            .map_err(map_repository_error)?;

        info!(
            report_id = report.id(),
            category = %report.category(),
            owner = ?report.owner(),
            "report created"
        );
        Ok(report)
    }

    async fn update(
        &self,
        id: i64,
        patch: ReportPatch,
        actor: Option<Actor>,
    ) -> Result<Report, Error> {
        Self::check_status_gate(&patch, actor)?;
        Self::validate_patch(&patch)?;

        let to_status = patch.status;
        let report = self
            .reports
            .apply_patch(id, patch)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("report {id} not found")))?;

        if let Some(status) = to_status {
            info!(report_id = id, status = %status, "report status changed");
        }
        Ok(report)
    }

    async fn get(&self, id: i64) -> Result<Report, Error> {
        self.reports
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("report {id} not found")))
    }

    async fn list(&self) -> Result<Vec<Report>, Error> {
        self.reports.list().await.map_err(map_repository_error)
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        let removed = self
            .reports
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(Error::not_found(format!("report {id} not found")));
        }
        info!(report_id = id, "report deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "report_service_tests.rs"]
mod tests;
