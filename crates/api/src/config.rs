use galaxy_core::credentials::{self, ConnectionString};
use galaxy_core::CredentialError;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In deployment,
/// override via environment variables; the database endpoint additionally
/// accepts a structured service credential document.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3030`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Direct driver endpoint URL; takes precedence over the service
    /// binding when set and non-empty.
    pub database_url: Option<String>,
    /// Name of the bound service inside the credential document.
    pub service_name: String,
    /// Raw structured credential document (`VCAP_SERVICES` shape).
    pub vcap_services: Option<String>,
    /// Select the binding's TLS port and require TLS on the wire.
    pub use_ssl: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default              |
    /// |------------------------|----------------------|
    /// | `HOST`                 | `0.0.0.0`            |
    /// | `PORT`                 | `3030`               |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                 |
    /// | `DATABASE_URL`         | (unset)              |
    /// | `SERVICE_NAME`         | `timeseriesdatabase` |
    /// | `VCAP_SERVICES`        | (unset)              |
    /// | `USE_SSL`              | `false`              |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3030".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty());

        let service_name =
            std::env::var("SERVICE_NAME").unwrap_or_else(|_| "timeseriesdatabase".into());

        let vcap_services = std::env::var("VCAP_SERVICES").ok();

        let use_ssl = std::env::var("USE_SSL")
            .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            host,
            port,
            request_timeout_secs,
            database_url,
            service_name,
            vcap_services,
            use_ssl,
        }
    }

    /// Resolve the database endpoint from this configuration.
    ///
    /// Fails deterministically, before any connection attempt, when neither
    /// the direct endpoint nor the service binding is usable.
    pub fn resolve_endpoint(&self) -> Result<ConnectionString, CredentialError> {
        credentials::resolve(
            self.database_url.as_deref(),
            self.vcap_services.as_deref(),
            &self.service_name,
            self.use_ssl,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 30,
            database_url: None,
            service_name: "timeseriesdatabase".to_string(),
            vcap_services: None,
            use_ssl: false,
        }
    }

    #[test]
    fn direct_endpoint_resolves() {
        let config = ServerConfig {
            database_url: Some("sqlite::memory:".to_string()),
            ..base_config()
        };
        assert_eq!(
            config.resolve_endpoint().unwrap().as_str(),
            "sqlite::memory:"
        );
    }

    #[test]
    fn missing_endpoint_fails_before_connecting() {
        assert!(base_config().resolve_endpoint().is_err());
    }
}
