//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use chrono::Duration;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) jwt_secret: Vec<u8>,
    pub(crate) otp_code: String,
    pub(crate) access_ttl: Duration,
    pub(crate) refresh_ttl: Duration,
}

impl ServerConfig {
    /// Construct a server configuration with default token lifetimes.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, jwt_secret: Vec<u8>, otp_code: impl Into<String>) -> Self {
        Self {
            bind_addr,
            jwt_secret,
            otp_code: otp_code.into(),
            access_ttl: Duration::minutes(15),
            refresh_ttl: Duration::days(7),
        }
    }

    /// Override the token lifetimes.
    #[must_use]
    pub fn with_token_ttls(mut self, access: Duration, refresh: Duration) -> Self {
        self.access_ttl = access;
        self.refresh_ttl = refresh;
        self
    }

    /// The socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
