//! Application configuration loaded from environment variables.

use common::TenantId;
use uuid::Uuid;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `TENANT_ID` — UUID of the tenant gyms are created under
///   (default: the nil UUID)
/// - `LOGIN_URL` — sign-in link embedded in the welcome email
///   (default: `"http://localhost:3000/login"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub tenant_id: TenantId,
    pub login_url: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            tenant_id: std::env::var("TENANT_ID")
                .ok()
                .and_then(|t| Uuid::parse_str(&t).ok())
                .map(TenantId::from_uuid)
                .unwrap_or_else(|| TenantId::from_uuid(Uuid::nil())),
            login_url: std::env::var("LOGIN_URL")
                .unwrap_or_else(|_| "http://localhost:3000/login".to_string()),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            tenant_id: TenantId::from_uuid(Uuid::nil()),
            login_url: "http://localhost:3000/login".to_string(),
        }
    }
}
