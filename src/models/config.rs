//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Shared secret for session cookies and identity tokens. At least 64 bytes.
    pub secret: String,
    /// Base URL of the service that writes clinical history summaries.
    pub summary_service_url: String,
}
