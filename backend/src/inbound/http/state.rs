//! Shared application state for the HTTP adapter.

use std::sync::Arc;

use crate::domain::ports::{AnnouncementFeed, IdentityGateway, ReportLifecycle};

/// Driving-port handles injected into every handler.
///
/// Handlers depend on the port traits only, so the wiring in `server`
/// decides which adapters back them.
#[derive(Clone)]
pub struct HttpState {
    pub identity: Arc<dyn IdentityGateway>,
    pub reports: Arc<dyn ReportLifecycle>,
    pub announcements: Arc<dyn AnnouncementFeed>,
}
