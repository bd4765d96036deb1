//! HTTP server configuration object.

use std::net::SocketAddr;

use carlot::settings::{ApiKey, Environment};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) environment: Environment,
    pub(crate) api_key: Option<ApiKey>,
}

impl ServerConfig {
    /// Construct a server configuration without API key protection.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, environment: Environment) -> Self {
        Self {
            bind_addr,
            environment,
            api_key: None,
        }
    }

    /// Require `key` on the record routes; `None` leaves them open.
    #[must_use]
    pub fn with_api_key(mut self, key: Option<ApiKey>) -> Self {
        self.api_key = key;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
