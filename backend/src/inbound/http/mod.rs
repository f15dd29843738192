//! HTTP inbound adapter exposing REST endpoints.

pub mod announcements;
pub mod auth;
pub mod error;
pub mod health;
pub mod reports;
pub mod routes;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
