//! Models for the runtime service.

use serde::{Deserialize, Serialize};

use crate::common::Metadata;

/// Strategy for routing requests to providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingStrategy {
    #[default]
    Unspecified,
    Cost,
    Latency,
    Quality,
}

/// A message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// system, user, assistant
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Parameters for a completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionParams {
    pub model: String,
    pub messages: Vec<Message>,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub stop_sequences: Vec<String>,
    /// Pin the request to a specific provider (e.g. openai, anthropic).
    pub provider: String,
    pub routing_strategy: RoutingStrategy,
    pub metadata: Metadata,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            model: String::new(),
            messages: Vec::new(),
            system_prompt: String::new(),
            max_tokens: 1024,
            temperature: 0.7,
            top_p: 1.0,
            stop_sequences: Vec::new(),
            provider: String::new(),
            routing_strategy: RoutingStrategy::Unspecified,
            metadata: Metadata::new(),
        }
    }
}

/// Token usage information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Response from a completion request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
    pub provider: String,
    pub usage: Usage,
    pub latency_ms: f64,
    pub finish_reason: String,
    pub metadata: Metadata,
}

/// Information about an available model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
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

/// Information about an LLM provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub models: Vec<Model>,
    pub is_available: bool,
}

/// A single embedding vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    pub values: Vec<f32>,
    pub dimensions: u32,
}

/// Response from an embedding request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedResponse {
    pub embeddings: Vec<Embedding>,
    pub model: String,
    pub provider: String,
    pub usage: Usage,
}
