// Configuration Management
//
// This crate handles all configuration resolution for the Lattice SDK.
// It provides:
// - Endpoint and timeout configuration structs
// - Environment variable resolution
// - Optional YAML file loading
//
// This keeps configuration concerns separate from the client logic.

use std::path::Path;
use thiserror::Error;

pub mod types;

// Re-export all configuration types
pub use types::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found. Tried paths: {paths}")]
    FileNotFound { paths: String },

    #[error("Failed to read configuration file: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {source}")]
    ParseError {
        #[from]
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

/// File-based configuration loading
impl LatticeConfig {
    /// Load configuration from a YAML file. Every field is optional; anything
    /// missing falls back to the defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: LatticeConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        let config_paths = ["lattice.yaml", "config/lattice.yaml"];

        for path in &config_paths {
            if std::path::Path::new(path).exists() {
                return Self::load_from_file(path);
            }
        }

        Err(ConfigError::FileNotFound {
            paths: config_paths.join(", "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_from_file_applies_defaults_for_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "runtime:\n  host: runtime.internal\n  port: 7001\ntimeout: 5.0\n"
        )
        .unwrap();

        let config = LatticeConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.runtime.host, "runtime.internal");
        assert_eq!(config.runtime.port, 7001);
        assert_eq!(config.timeout, 5.0);
        // Untouched sections keep their defaults.
        assert_eq!(config.prompt.port, 9002);
        assert_eq!(config.connect_timeout, 10.0);
    }

    #[test]
    fn load_from_file_rejects_malformed_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "runtime: [not, a, mapping").unwrap();

        let result = LatticeConfig::load_from_file(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }
}
