//! Wire schema for the runtime service.

use models::common::Metadata;
use models::runtime as domain;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CompletionParams {
    pub model: String,
    pub messages: Vec<Message>,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub stop_sequences: Vec<String>,
    pub provider: String,
    pub routing_strategy: String,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CompleteRequest {
    pub params: CompletionParams,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CompleteResponse {
    pub id: String,
    pub content: String,
    pub model: String,
    pub provider: String,
    pub usage: Usage,
    pub latency_ms: f64,
    pub finish_reason: String,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CompleteStreamRequest {
    pub params: CompletionParams,
}

/// One fragment of a streaming completion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CompleteStreamResponse {
    pub content: String,
    pub finish_reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListModelsRequest {
    pub provider: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Model {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub context_window: u32,
    pub max_output_tokens: u32,
    pub supports_vision: bool,
    pub supports_function_calling: bool,
    pub cost_per_input_token: f64,
    pub cost_per_output_token: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListModelsResponse {
    pub models: Vec<Model>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListProvidersRequest {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Provider {
    pub id: String,
    pub name: String,
    pub models: Vec<Model>,
    pub is_available: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListProvidersResponse {
    pub providers: Vec<Provider>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct EmbedRequest {
    pub texts: Vec<String>,
    pub model: String,
    pub provider: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Embedding {
    pub values: Vec<f32>,
    pub dimensions: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct EmbedResponse {
    pub embeddings: Vec<Embedding>,
    pub model: String,
    pub provider: String,
    pub usage: Usage,
}

pub(crate) fn routing_strategy_to_wire(strategy: domain::RoutingStrategy) -> &'static str {
    match strategy {
        domain::RoutingStrategy::Unspecified => "ROUTING_STRATEGY_UNSPECIFIED",
        domain::RoutingStrategy::Cost => "ROUTING_STRATEGY_COST",
        domain::RoutingStrategy::Latency => "ROUTING_STRATEGY_LATENCY",
        domain::RoutingStrategy::Quality => "ROUTING_STRATEGY_QUALITY",
    }
}

pub(crate) fn routing_strategy_from_wire(value: &str) -> domain::RoutingStrategy {
    match value {
        "ROUTING_STRATEGY_COST" => domain::RoutingStrategy::Cost,
        "ROUTING_STRATEGY_LATENCY" => domain::RoutingStrategy::Latency,
        "ROUTING_STRATEGY_QUALITY" => domain::RoutingStrategy::Quality,
        _ => domain::RoutingStrategy::Unspecified,
    }
}

pub(crate) fn completion_params_to_wire(params: &domain::CompletionParams) -> CompletionParams {
    CompletionParams {
        model: params.model.clone(),
        messages: params
            .messages
            .iter()
            .map(|m| Message {
                role: m.role.clone(),
                content: m.content.clone(),
            })
            .collect(),
        system_prompt: params.system_prompt.clone(),
        max_tokens: params.max_tokens,
        temperature: params.temperature,
        top_p: params.top_p,
        stop_sequences: params.stop_sequences.clone(),
        provider: params.provider.clone(),
        routing_strategy: routing_strategy_to_wire(params.routing_strategy).to_string(),
        metadata: params.metadata.clone(),
    }
}

pub(crate) fn usage_from_wire(usage: Usage) -> domain::Usage {
    domain::Usage {
        prompt_tokens: usage.prompt_tokens,
        completion_tokens: usage.completion_tokens,
        total_tokens: usage.total_tokens,
    }
}

pub(crate) fn completion_response_from_wire(response: CompleteResponse) -> domain::CompletionResponse {
    domain::CompletionResponse {
        id: response.id,
        content: response.content,
        model: response.model,
        provider: response.provider,
        usage: usage_from_wire(response.usage),
        latency_ms: response.latency_ms,
        finish_reason: response.finish_reason,
        metadata: response.metadata,
    }
}

pub(crate) fn model_from_wire(model: Model) -> domain::Model {
    domain::Model {
        id: model.id,
        name: model.name,
        provider: model.provider,
        context_window: model.context_window,
        max_output_tokens: model.max_output_tokens,
        supports_vision: model.supports_vision,
        supports_function_calling: model.supports_function_calling,
        cost_per_input_token: model.cost_per_input_token,
        cost_per_output_token: model.cost_per_output_token,
    }
}

pub(crate) fn provider_from_wire(provider: Provider) -> domain::Provider {
    domain::Provider {
        id: provider.id,
        name: provider.name,
        models: provider.models.into_iter().map(model_from_wire).collect(),
        is_available: provider.is_available,
    }
}

pub(crate) fn embed_response_from_wire(response: EmbedResponse) -> domain::EmbedResponse {
    domain::EmbedResponse {
        embeddings: response
            .embeddings
            .into_iter()
            .map(|e| domain::Embedding {
                values: e.values,
                dimensions: e.dimensions,
            })
            .collect(),
        model: response.model,
        provider: response.provider,
        usage: usage_from_wire(response.usage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routing_strategy_round_trips() {
        let strategies = [
            domain::RoutingStrategy::Unspecified,
            domain::RoutingStrategy::Cost,
            domain::RoutingStrategy::Latency,
            domain::RoutingStrategy::Quality,
        ];
        for strategy in strategies {
            assert_eq!(
                routing_strategy_from_wire(routing_strategy_to_wire(strategy)),
                strategy
            );
        }
        assert_eq!(
            routing_strategy_from_wire("ROUTING_STRATEGY_VIBES"),
            domain::RoutingStrategy::Unspecified
        );
    }

    #[test]
    fn stream_frames_tolerate_missing_fields() {
        let frame: CompleteStreamResponse = serde_json::from_str("{}").unwrap();
        assert!(frame.content.is_empty());

        let frame: CompleteStreamResponse =
            serde_json::from_str(r#"{"content":"hi","finish_reason":"stop"}"#).unwrap();
        assert_eq!(frame.content, "hi");
        assert_eq!(frame.finish_reason, "stop");
    }
}
