//! Client for the runtime service.

use std::pin::Pin;
use std::task::{Context, Poll};

use config::ServiceEndpoint;
use futures_core::Stream;
use models::runtime::{CompletionParams, CompletionResponse, EmbedResponse, Model, Provider};

use crate::channel::{Channel, ClientSettings};
use crate::error::{ClientError, Result};
use crate::sse::SseStream;
use crate::wire::runtime as wire;

const SERVICE: &str = "lattice.runtime.v1.RuntimeService";

/// Options for [`RuntimeClient::embed`].
#[derive(Debug, Clone, Default)]
pub struct EmbedOptions {
    pub model: String,
    pub provider: String,
}

/// Client for the runtime service.
pub struct RuntimeClient {
    channel: Channel,
}

impl RuntimeClient {
    pub fn new(endpoint: ServiceEndpoint, settings: ClientSettings) -> Self {
        Self {
            channel: Channel::new(endpoint, settings),
        }
    }

    /// Release the underlying connection. Idempotent; the next call
    /// reconnects.
    pub fn close(&self) {
        self.channel.close();
    }

    /// Generate a completion.
    pub async fn complete(&self, params: CompletionParams) -> Result<CompletionResponse> {
        let request = wire::CompleteRequest {
            params: wire::completion_params_to_wire(&params),
        };
        let response: wire::CompleteResponse = self
            .channel
            .unary(&format!("{SERVICE}/Complete"), &request)
            .await?;
        Ok(wire::completion_response_from_wire(response))
    }

    /// Generate a streaming completion.
    ///
    /// The returned stream yields content fragments as the service produces
    /// them. It is finite and forward-only; consuming it twice requires a
    /// new request.
    pub async fn complete_stream(&self, params: CompletionParams) -> Result<CompletionStream> {
        let request = wire::CompleteStreamRequest {
            params: wire::completion_params_to_wire(&params),
        };
        let frames: SseStream<wire::CompleteStreamResponse> = self
            .channel
            .server_stream(&format!("{SERVICE}/CompleteStream"), &request)
            .await?;
        Ok(CompletionStream { inner: frames })
    }

    /// List available models, optionally filtered by provider.
    pub async fn list_models(&self, provider: &str) -> Result<Vec<Model>> {
        let request = wire::ListModelsRequest {
            provider: provider.to_string(),
        };
        let response: wire::ListModelsResponse = self
            .channel
            .unary(&format!("{SERVICE}/ListModels"), &request)
            .await?;
        Ok(response
            .models
            .into_iter()
            .map(wire::model_from_wire)
            .collect())
    }

    /// List available providers.
    pub async fn list_providers(&self) -> Result<Vec<Provider>> {
        let request = wire::ListProvidersRequest {};
        let response: wire::ListProvidersResponse = self
            .channel
            .unary(&format!("{SERVICE}/ListProviders"), &request)
            .await?;
        Ok(response
            .providers
            .into_iter()
            .map(wire::provider_from_wire)
            .collect())
    }

    /// Embed a batch of texts.
    pub async fn embed(&self, texts: Vec<String>, options: EmbedOptions) -> Result<EmbedResponse> {
        let request = wire::EmbedRequest {
            texts,
            model: options.model,
            provider: options.provider,
        };
        let response: wire::EmbedResponse = self
            .channel
            .unary(&format!("{SERVICE}/Embed"), &request)
            .await?;
        Ok(wire::embed_response_from_wire(response))
    }
}

/// Lazy stream of completion content fragments.
///
/// Only non-empty content fragments surface; every other frame kind is
/// skipped.
pub struct CompletionStream {
    inner: SseStream<wire::CompleteStreamResponse>,
}

impl Stream for CompletionStream {
    type Item = Result<String, ClientError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(frame))) => {
                    if frame.content.is_empty() {
                        continue;
                    }
                    return Poll::Ready(Some(Ok(frame.content)));
                }
                Poll::Ready(Some(Err(e))) => return Poll::Ready(Some(Err(e))),
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
