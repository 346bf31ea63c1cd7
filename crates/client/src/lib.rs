//! Typed clients for the Lattice platform services.
//!
//! One client per service (observe, runtime, prompt, datasets, eval,
//! deploy), each marshaling typed requests into wire messages, performing
//! one remote call, and unmarshaling responses back into domain models.
//! [`LatticeClient`] bundles all six behind lazily constructed accessors.
//!
//! # Usage
//!
//! ```rust,ignore
//! use client::LatticeClient;
//! use config::LatticeConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = LatticeClient::new(LatticeConfig::from_env()?);
//!
//!     let prompt = client
//!         .prompts()
//!         .create("summarizer", Default::default())
//!         .await?;
//!     println!("created {}", prompt.id);
//!
//!     // Lookups return None for missing resources instead of failing.
//!     if client.prompts().get("missing", None).await?.is_none() {
//!         println!("no such prompt");
//!     }
//!     Ok(())
//! }
//! ```

mod channel;
mod error;
pub mod services;
mod sse;
mod wire;

use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::Duration;

use config::{ConfigError, LatticeConfig};
use tokio::net::TcpStream;

pub use channel::ClientSettings;
pub use error::{ClientError, RemoteCode, Result};
pub use services::{
    DatasetsClient, DeployClient, EvalClient, ObserveClient, PromptClient, RuntimeClient,
};

/// How long a health probe waits for a connection.
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Entry point to the Lattice platform.
///
/// Each service client is constructed on first access and reused afterwards.
/// [`close`](LatticeClient::close) tears every constructed client down and
/// resets the slots; dropping the facade releases everything as well.
pub struct LatticeClient {
    config: LatticeConfig,
    observe: OnceLock<ObserveClient>,
    runtime: OnceLock<RuntimeClient>,
    prompts: OnceLock<PromptClient>,
    datasets: OnceLock<DatasetsClient>,
    eval: OnceLock<EvalClient>,
    deploy: OnceLock<DeployClient>,
}

impl LatticeClient {
    pub fn new(config: LatticeConfig) -> Self {
        Self {
            config,
            observe: OnceLock::new(),
            runtime: OnceLock::new(),
            prompts: OnceLock::new(),
            datasets: OnceLock::new(),
            eval: OnceLock::new(),
            deploy: OnceLock::new(),
        }
    }

    /// Build a client from `LATTICE_*` environment variables.
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(LatticeConfig::from_env()?))
    }

    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    fn settings(&self) -> ClientSettings {
        ClientSettings::from_config(&self.config)
    }

    pub fn observe(&self) -> &ObserveClient {
        self.observe
            .get_or_init(|| ObserveClient::new(self.config.observe.clone(), self.settings()))
    }

    pub fn runtime(&self) -> &RuntimeClient {
        self.runtime
            .get_or_init(|| RuntimeClient::new(self.config.runtime.clone(), self.settings()))
    }

    pub fn prompts(&self) -> &PromptClient {
        self.prompts
            .get_or_init(|| PromptClient::new(self.config.prompt.clone(), self.settings()))
    }

    pub fn datasets(&self) -> &DatasetsClient {
        self.datasets
            .get_or_init(|| DatasetsClient::new(self.config.datasets.clone(), self.settings()))
    }

    pub fn eval(&self) -> &EvalClient {
        self.eval
            .get_or_init(|| EvalClient::new(self.config.eval.clone(), self.settings()))
    }

    pub fn deploy(&self) -> &DeployClient {
        self.deploy
            .get_or_init(|| DeployClient::new(self.config.deploy.clone(), self.settings()))
    }

    /// Close every constructed service client and reset the slots.
    /// Idempotent; clients are rebuilt on next access.
    pub fn close(&mut self) {
        if let Some(client) = self.observe.take() {
            client.close();
        }
        if let Some(client) = self.runtime.take() {
            client.close();
        }
        if let Some(client) = self.prompts.take() {
            client.close();
        }
        if let Some(client) = self.datasets.take() {
            client.close();
        }
        if let Some(client) = self.eval.take() {
            client.close();
        }
        if let Some(client) = self.deploy.take() {
            client.close();
        }
    }

    /// Probe every configured endpoint and report reachability.
    ///
    /// Each probe is a bounded TCP connect; any failure, including a
    /// timeout, becomes `false`. This never returns an error.
    pub async fn health_check(&self) -> HashMap<&'static str, bool> {
        let services = [
            ("observe", &self.config.observe),
            ("runtime", &self.config.runtime),
            ("prompt", &self.config.prompt),
            ("datasets", &self.config.datasets),
            ("eval", &self.config.eval),
            ("deploy", &self.config.deploy),
        ];

        let mut results = HashMap::new();
        for (name, endpoint) in services {
            let reachable = matches!(
                tokio::time::timeout(PROBE_TIMEOUT, TcpStream::connect(endpoint.address())).await,
                Ok(Ok(_))
            );
            results.insert(name, reachable);
        }
        results
    }
}

impl Default for LatticeClient {
    fn default() -> Self {
        Self::new(LatticeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_twice_is_a_noop() {
        let mut client = LatticeClient::default();
        // Touch two sub-clients so close has something to tear down.
        let _ = client.prompts();
        let _ = client.runtime();

        client.close();
        client.close();

        // Accessors reconstruct after close.
        let _ = client.prompts();
    }
}
