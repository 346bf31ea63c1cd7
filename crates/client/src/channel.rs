//! Lazily-connected HTTP channel shared by all service clients.

use std::sync::Mutex;
use std::time::Duration;

use config::{LatticeConfig, ServiceEndpoint};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ClientError, RemoteCode, Result};
use crate::sse::SseStream;
use crate::wire::WireError;

/// Per-client settings resolved from [`config::LatticeConfig`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl ClientSettings {
    pub fn from_config(config: &LatticeConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs_f64(config.timeout),
            connect_timeout: Duration::from_secs_f64(config.connect_timeout),
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::from_config(&LatticeConfig::default())
    }
}

/// One endpoint's connection state.
///
/// The HTTP client is built on first use and reused for every subsequent
/// call. Racing callers all pass through the mutex, so exactly one handle
/// is ever created. `close` drops the handle; the next call recreates it.
pub(crate) struct Channel {
    endpoint: ServiceEndpoint,
    settings: ClientSettings,
    slot: Mutex<Option<Client>>,
}

impl Channel {
    pub(crate) fn new(endpoint: ServiceEndpoint, settings: ClientSettings) -> Self {
        Self {
            endpoint,
            settings,
            slot: Mutex::new(None),
        }
    }

    fn handle(&self) -> Result<Client> {
        let mut slot = self.slot.lock().expect("channel lock poisoned");
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }
        let client = Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .build()
            .map_err(|e| ClientError::Transport {
                message: e.to_string(),
            })?;
        *slot = Some(client.clone());
        Ok(client)
    }

    /// Drop the HTTP client. Idempotent; a later call recreates it.
    pub(crate) fn close(&self) {
        self.slot.lock().expect("channel lock poisoned").take();
    }

    fn map_call_error(&self, error: reqwest::Error) -> ClientError {
        if error.is_timeout() {
            ClientError::Timeout {
                seconds: self.settings.timeout.as_secs_f64(),
            }
        } else {
            ClientError::Transport {
                message: error.to_string(),
            }
        }
    }

    async fn send<Req: Serialize>(
        &self,
        method: &str,
        body: &Req,
        accept_sse: bool,
    ) -> Result<reqwest::Response> {
        let client = self.handle()?;
        let url = format!("{}/{}", self.endpoint.base_url(), method);
        debug!(%url, "sending request");

        let mut request = client.post(&url).timeout(self.settings.timeout).json(body);
        if let Some(key) = &self.settings.api_key {
            request = request.bearer_auth(key);
        }
        if accept_sse {
            request = request.header(reqwest::header::ACCEPT, "text/event-stream");
        }

        let response = request.send().await.map_err(|e| self.map_call_error(e))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let (code, message) = match serde_json::from_str::<WireError>(&body) {
                Ok(err) if !err.code.is_empty() => (RemoteCode::parse(&err.code), err.message),
                _ => (RemoteCode::from_http_status(status), body),
            };
            warn!(%url, %code, "remote call failed");
            return Err(ClientError::Remote { code, message });
        }
        Ok(response)
    }

    /// One request/response round trip.
    pub(crate) async fn unary<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        method: &str,
        body: &Req,
    ) -> Result<Resp> {
        let response = self.send(method, body, false).await?;
        let bytes = response.bytes().await.map_err(|e| self.map_call_error(e))?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode {
            message: e.to_string(),
        })
    }

    /// One request followed by a server-side stream of frames.
    pub(crate) async fn server_stream<Req, Resp>(
        &self,
        method: &str,
        body: &Req,
    ) -> Result<SseStream<Resp>>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let response = self.send(method, body, true).await?;
        Ok(SseStream::new(
            Box::pin(response.bytes_stream()),
            self.settings.timeout.as_secs_f64(),
        ))
    }
}
