use std::env;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Address of a single Lattice service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceEndpoint {
    pub host: String,
    pub port: u16,
    pub use_tls: bool,
}

impl Default for ServiceEndpoint {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 9000,
            use_tls: false,
        }
    }
}

impl ServiceEndpoint {
    /// The `host:port` pair for this endpoint.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The full base URL for this endpoint, honoring the TLS flag.
    pub fn base_url(&self) -> String {
        let scheme = if self.use_tls { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}

/// Configuration for the Lattice SDK.
///
/// Holds one endpoint per platform service plus the shared authentication
/// and timeout settings every client uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    pub observe: ServiceEndpoint,
    pub runtime: ServiceEndpoint,
    pub prompt: ServiceEndpoint,
    pub datasets: ServiceEndpoint,
    pub eval: ServiceEndpoint,
    pub deploy: ServiceEndpoint,

    /// API key sent as a bearer token on every request, when set.
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    pub timeout: f64,
    /// Connection timeout in seconds.
    pub connect_timeout: f64,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            observe: endpoint("localhost", 9000, false),
            runtime: endpoint("localhost", 9001, false),
            prompt: endpoint("localhost", 9002, false),
            datasets: endpoint("localhost", 9003, false),
            eval: endpoint("localhost", 9004, false),
            deploy: endpoint("localhost", 9005, false),
            api_key: None,
            timeout: 30.0,
            connect_timeout: 10.0,
        }
    }
}

fn endpoint(host: &str, port: u16, use_tls: bool) -> ServiceEndpoint {
    ServiceEndpoint {
        host: host.to_string(),
        port,
        use_tls,
    }
}

impl LatticeConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables:
    /// - `LATTICE_HOST`: default host for all services
    /// - `LATTICE_OBSERVE_HOST`, `LATTICE_OBSERVE_PORT`: observe service
    /// - `LATTICE_RUNTIME_HOST`, `LATTICE_RUNTIME_PORT`: runtime service
    /// - `LATTICE_PROMPT_HOST`, `LATTICE_PROMPT_PORT`: prompt service
    /// - `LATTICE_DATASETS_HOST`, `LATTICE_DATASETS_PORT`: datasets service
    /// - `LATTICE_EVAL_HOST`, `LATTICE_EVAL_PORT`: eval service
    /// - `LATTICE_DEPLOY_HOST`, `LATTICE_DEPLOY_PORT`: deploy service
    /// - `LATTICE_API_KEY`: API key for authentication
    /// - `LATTICE_TIMEOUT`, `LATTICE_CONNECT_TIMEOUT`: timeouts in seconds
    /// - `LATTICE_USE_TLS`: whether to use TLS (true/false)
    pub fn from_env() -> Result<Self, ConfigError> {
        let default_host = env::var("LATTICE_HOST").unwrap_or_else(|_| "localhost".to_string());
        let use_tls = env::var("LATTICE_USE_TLS")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            observe: endpoint_from_env("OBSERVE", 9000, &default_host, use_tls)?,
            runtime: endpoint_from_env("RUNTIME", 9001, &default_host, use_tls)?,
            prompt: endpoint_from_env("PROMPT", 9002, &default_host, use_tls)?,
            datasets: endpoint_from_env("DATASETS", 9003, &default_host, use_tls)?,
            eval: endpoint_from_env("EVAL", 9004, &default_host, use_tls)?,
            deploy: endpoint_from_env("DEPLOY", 9005, &default_host, use_tls)?,
            api_key: env::var("LATTICE_API_KEY").ok(),
            timeout: seconds_from_env("LATTICE_TIMEOUT", 30.0)?,
            connect_timeout: seconds_from_env("LATTICE_CONNECT_TIMEOUT", 10.0)?,
        })
    }
}

fn endpoint_from_env(
    name: &str,
    default_port: u16,
    default_host: &str,
    use_tls: bool,
) -> Result<ServiceEndpoint, ConfigError> {
    let host_var = format!("LATTICE_{name}_HOST");
    let port_var = format!("LATTICE_{name}_PORT");

    let host = env::var(&host_var).unwrap_or_else(|_| default_host.to_string());
    let port = match env::var(&port_var) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            name: port_var,
            reason: format!("{value:?} is not a valid port number"),
        })?,
        Err(_) => default_port,
    };

    Ok(ServiceEndpoint { host, port, use_tls })
}

fn seconds_from_env(name: &str, default: f64) -> Result<f64, ConfigError> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            reason: format!("{value:?} is not a valid number of seconds"),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_address_and_base_url() {
        let endpoint = ServiceEndpoint {
            host: "observe.lattice.dev".to_string(),
            port: 9000,
            use_tls: false,
        };
        assert_eq!(endpoint.address(), "observe.lattice.dev:9000");
        assert_eq!(endpoint.base_url(), "http://observe.lattice.dev:9000");

        let secure = ServiceEndpoint {
            use_tls: true,
            ..endpoint
        };
        assert_eq!(secure.base_url(), "https://observe.lattice.dev:9000");
    }

    #[test]
    fn default_config_assigns_one_port_per_service() {
        let config = LatticeConfig::default();
        assert_eq!(config.observe.port, 9000);
        assert_eq!(config.runtime.port, 9001);
        assert_eq!(config.prompt.port, 9002);
        assert_eq!(config.datasets.port, 9003);
        assert_eq!(config.eval.port, 9004);
        assert_eq!(config.deploy.port, 9005);
        assert_eq!(config.timeout, 30.0);
        assert_eq!(config.connect_timeout, 10.0);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn from_env_reads_overrides() {
        // Single env-touching test so parallel test threads never race on
        // process environment.
        env::set_var("LATTICE_HOST", "lattice.internal");
        env::set_var("LATTICE_RUNTIME_PORT", "7001");
        env::set_var("LATTICE_API_KEY", "sk-test");

        let config = LatticeConfig::from_env().unwrap();
        assert_eq!(config.runtime.host, "lattice.internal");
        assert_eq!(config.runtime.port, 7001);
        assert_eq!(config.observe.host, "lattice.internal");
        assert_eq!(config.observe.port, 9000);
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));

        env::set_var("LATTICE_DEPLOY_PORT", "not-a-port");
        let result = LatticeConfig::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        env::remove_var("LATTICE_HOST");
        env::remove_var("LATTICE_RUNTIME_PORT");
        env::remove_var("LATTICE_API_KEY");
        env::remove_var("LATTICE_DEPLOY_PORT");
    }
}
