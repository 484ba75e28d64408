use crate::regional::{Geography, UnknownGeography};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_STACK_AI_BASE_URL: &str = "https://api.stack-ai.com/inference/v0/run";
pub const DEFAULT_REPORT_TIMEOUT_SECS: u64 = 120;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the engine and its HTTP surface.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub default_geography: Geography,
    /// `None` when report generation credentials are not provided.
    pub report: Option<ReportServiceConfig>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let default_geography = match non_empty_var("CRA_DEFAULT_GEOGRAPHY") {
            Some(raw) => raw.parse().map_err(ConfigError::UnknownGeography)?,
            None => Geography::HomesteadCra,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            default_geography,
            report: ReportServiceConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Credentials and endpoint for the Stack AI report flow.
#[derive(Clone)]
pub struct ReportServiceConfig {
    pub api_key: String,
    pub org_id: String,
    pub flow_id: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ReportServiceConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let (Some(api_key), Some(flow)) = (
            non_empty_var("STACK_AI_API_KEY"),
            non_empty_var("STACK_AI_FLOW_ID"),
        ) else {
            return Ok(None);
        };

        let (org_id, flow_id) = match flow.split_once('/') {
            Some((org, flow_id)) => (org.trim().to_string(), flow_id.trim().to_string()),
            None => {
                let org = non_empty_var("STACK_AI_ORG_ID").ok_or(ConfigError::MissingOrgId)?;
                (org, flow)
            }
        };
        if org_id.is_empty() || flow_id.is_empty() {
            return Err(ConfigError::MissingOrgId);
        }

        let base_url = non_empty_var("STACK_AI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_STACK_AI_BASE_URL.to_string());

        let timeout_secs = match non_empty_var("STACK_AI_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout { value: raw })?,
            None => DEFAULT_REPORT_TIMEOUT_SECS,
        };

        Ok(Some(Self {
            api_key,
            org_id,
            flow_id,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }))
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.org_id,
            self.flow_id
        )
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for ReportServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportServiceConfig")
            .field("api_key", &"<redacted>")
            .field("org_id", &self.org_id)
            .field("flow_id", &self.flow_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    UnknownGeography(UnknownGeography),
    MissingOrgId,
    InvalidTimeout { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::UnknownGeography(err) => write!(f, "CRA_DEFAULT_GEOGRAPHY: {err}"),
            ConfigError::MissingOrgId => write!(
                f,
                "STACK_AI_ORG_ID is required unless STACK_AI_FLOW_ID is 'org_id/flow_id'"
            ),
            ConfigError::InvalidTimeout { value } => write!(
                f,
                "STACK_AI_TIMEOUT_SECS must be a positive number of seconds, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::UnknownGeography(err) => Some(err),
            ConfigError::InvalidPort
            | ConfigError::MissingOrgId
            | ConfigError::InvalidTimeout { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "CRA_DEFAULT_GEOGRAPHY",
            "STACK_AI_API_KEY",
            "STACK_AI_FLOW_ID",
            "STACK_AI_ORG_ID",
            "STACK_AI_BASE_URL",
            "STACK_AI_TIMEOUT_SECS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.default_geography, Geography::HomesteadCra);
        assert!(config.report.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn splits_combined_flow_id() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("STACK_AI_API_KEY", "secret");
        env::set_var("STACK_AI_FLOW_ID", "org-123/flow-456");
        env::set_var("STACK_AI_TIMEOUT_SECS", "30");

        let report = AppConfig::load()
            .expect("config loads")
            .report
            .expect("report service configured");
        assert_eq!(
            report.endpoint(),
            "https://api.stack-ai.com/inference/v0/run/org-123/flow-456"
        );
        assert_eq!(report.timeout, Duration::from_secs(30));
        assert!(!format!("{report:?}").contains("secret"));
        reset_env();
    }

    #[test]
    fn bare_flow_id_requires_org() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("STACK_AI_API_KEY", "secret");
        env::set_var("STACK_AI_FLOW_ID", "flow-456");
        assert!(matches!(AppConfig::load(), Err(ConfigError::MissingOrgId)));

        env::set_var("STACK_AI_ORG_ID", "org-123");
        let report = AppConfig::load()
            .expect("config loads")
            .report
            .expect("report service configured");
        assert_eq!(report.org_id, "org-123");
        assert_eq!(report.flow_id, "flow-456");
        reset_env();
    }

    #[test]
    fn rejects_unknown_default_geography() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CRA_DEFAULT_GEOGRAPHY", "atlantis");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::UnknownGeography(_))
        ));

        env::set_var("CRA_DEFAULT_GEOGRAPHY", "florida_statewide");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.default_geography, Geography::FloridaStatewide);
        reset_env();
    }
}
