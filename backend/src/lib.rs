//! Backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface for tooling.
pub use doc::ApiDoc;
/// Trace middleware attaching a per-request trace id.
pub use middleware::Trace;
