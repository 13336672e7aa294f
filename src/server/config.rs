//! Environment-driven server configuration.

use std::env;
use std::net::SocketAddr;

/// Settings read once at startup.
///
/// `DATABASE_URL` is optional: without it the server runs on in-memory
/// fixture repositories, which is intended for local development only.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) database_url: Option<String>,
}

impl ServerConfig {
    pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

    /// Read `BIND_ADDR` and `DATABASE_URL` from the environment.
    pub fn from_env() -> std::io::Result<Self> {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| Self::DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_addr
            .parse()
            .map_err(|err| std::io::Error::other(format!("invalid BIND_ADDR {bind_addr}: {err}")))?;
        let database_url = env::var("DATABASE_URL").ok();
        Ok(Self {
            bind_addr,
            database_url,
        })
    }

    pub fn new(bind_addr: SocketAddr, database_url: Option<String>) -> Self {
        Self {
            bind_addr,
            database_url,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }
}
