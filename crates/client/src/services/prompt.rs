//! Client for the prompt service.

use config::ServiceEndpoint;
use models::common::{Metadata, Page};
use models::prompt::{Prompt, PromptMessage, PromptVariable, PromptVersion, VersionDiff};

use crate::channel::{Channel, ClientSettings};
use crate::error::Result;
use crate::wire::prompt as wire;

const SERVICE: &str = "lattice.prompt.v1.PromptService";

/// Options for [`PromptClient::create`].
#[derive(Debug, Clone)]
pub struct CreatePromptOptions {
    /// URL-safe identifier; the service derives one from the name if empty.
    pub slug: String,
    pub description: String,
    /// Template with `{{variable}}` placeholders.
    pub template: String,
    pub system_prompt: String,
    pub messages: Vec<PromptMessage>,
    pub variables: Vec<PromptVariable>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub tags: Vec<String>,
    pub metadata: Metadata,
}

impl Default for CreatePromptOptions {
    fn default() -> Self {
        Self {
            slug: String::new(),
            description: String::new(),
            template: String::new(),
            system_prompt: String::new(),
            messages: Vec::new(),
            variables: Vec::new(),
            model: String::new(),
            temperature: 0.7,
            max_tokens: 1024,
            tags: Vec::new(),
            metadata: Metadata::new(),
        }
    }
}

/// Options for [`PromptClient::update`]. Unset fields keep their current
/// value server-side.
#[derive(Debug, Clone, Default)]
pub struct UpdatePromptOptions {
    pub template: Option<String>,
    pub system_prompt: Option<String>,
    pub messages: Option<Vec<PromptMessage>>,
    pub variables: Option<Vec<PromptVariable>>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub commit_message: String,
}

/// Filters for [`PromptClient::list`].
#[derive(Debug, Clone)]
pub struct ListPromptsOptions {
    pub tags: Vec<String>,
    /// Matches against name and description.
    pub search: String,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ListPromptsOptions {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            search: String::new(),
            limit: 100,
            offset: 0,
        }
    }
}

/// Client for the prompt service.
pub struct PromptClient {
    channel: Channel,
}

impl PromptClient {
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

    /// Create a new prompt. The returned prompt carries the server-assigned
    /// id, slug, and timestamps.
    pub async fn create(
        &self,
        name: impl Into<String>,
        options: CreatePromptOptions,
    ) -> Result<Prompt> {
        let request = wire::CreatePromptRequest {
            name: name.into(),
            slug: options.slug,
            description: options.description,
            template: options.template,
            system_prompt: options.system_prompt,
            messages: options.messages.iter().map(wire::message_to_wire).collect(),
            variables: options
                .variables
                .iter()
                .map(wire::variable_to_wire)
                .collect(),
            model: options.model,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            tags: options.tags,
            metadata: options.metadata,
        };
        let response: wire::CreatePromptResponse = self
            .channel
            .unary(&format!("{SERVICE}/CreatePrompt"), &request)
            .await?;
        Ok(wire::prompt_from_wire(response.prompt))
    }

    /// Get a prompt by id or slug, or `None` if it does not exist.
    pub async fn get(&self, id_or_slug: &str, version: Option<u32>) -> Result<Option<Prompt>> {
        let request = wire::GetPromptRequest {
            id: id_or_slug.to_string(),
            version: version.unwrap_or(0),
        };
        let result: Result<wire::GetPromptResponse> = self
            .channel
            .unary(&format!("{SERVICE}/GetPrompt"), &request)
            .await;
        match result {
            Ok(response) => Ok(Some(wire::prompt_from_wire(response.prompt))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Update a prompt, creating a new version.
    pub async fn update(&self, id: &str, options: UpdatePromptOptions) -> Result<Prompt> {
        let request = wire::UpdatePromptRequest {
            id: id.to_string(),
            template: options.template.unwrap_or_default(),
            system_prompt: options.system_prompt.unwrap_or_default(),
            messages: options
                .messages
                .unwrap_or_default()
                .iter()
                .map(wire::message_to_wire)
                .collect(),
            variables: options
                .variables
                .unwrap_or_default()
                .iter()
                .map(wire::variable_to_wire)
                .collect(),
            model: options.model.unwrap_or_default(),
            temperature: options.temperature.unwrap_or(0.0),
            max_tokens: options.max_tokens.unwrap_or(0),
            commit_message: options.commit_message,
        };
        let response: wire::UpdatePromptResponse = self
            .channel
            .unary(&format!("{SERVICE}/UpdatePrompt"), &request)
            .await?;
        Ok(wire::prompt_from_wire(response.prompt))
    }

    /// Delete a prompt.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let request = wire::DeletePromptRequest { id: id.to_string() };
        let response: wire::DeletePromptResponse = self
            .channel
            .unary(&format!("{SERVICE}/DeletePrompt"), &request)
            .await?;
        Ok(response.success)
    }

    /// List prompts, one page at a time.
    pub async fn list(&self, options: ListPromptsOptions) -> Result<Page<Prompt>> {
        let request = wire::ListPromptsRequest {
            tags: options.tags,
            search: options.search,
            limit: options.limit,
            offset: options.offset,
        };
        let response: wire::ListPromptsResponse = self
            .channel
            .unary(&format!("{SERVICE}/ListPrompts"), &request)
            .await?;
        Ok(Page {
            items: response
                .prompts
                .into_iter()
                .map(wire::prompt_from_wire)
                .collect(),
            total_count: response.total_count,
            limit: options.limit,
            offset: options.offset,
        })
    }

    /// Get a specific version of a prompt, or `None` if it does not exist.
    pub async fn get_version(&self, id: &str, version: u32) -> Result<Option<PromptVersion>> {
        let request = wire::GetPromptVersionRequest {
            id: id.to_string(),
            version,
        };
        let result: Result<wire::GetPromptVersionResponse> = self
            .channel
            .unary(&format!("{SERVICE}/GetPromptVersion"), &request)
            .await;
        match result {
            Ok(response) => Ok(Some(wire::version_from_wire(response.version))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// List all versions of a prompt.
    pub async fn list_versions(&self, id: &str) -> Result<Vec<PromptVersion>> {
        let request = wire::ListVersionsRequest { id: id.to_string() };
        let response: wire::ListVersionsResponse = self
            .channel
            .unary(&format!("{SERVICE}/ListVersions"), &request)
            .await?;
        Ok(response
            .versions
            .into_iter()
            .map(wire::version_from_wire)
            .collect())
    }

    /// Field-level diff between two versions of a prompt.
    pub async fn compare_versions(
        &self,
        id: &str,
        version_a: u32,
        version_b: u32,
    ) -> Result<Vec<VersionDiff>> {
        let request = wire::CompareVersionsRequest {
            prompt_id: id.to_string(),
            version_a,
            version_b,
        };
        let response: wire::CompareVersionsResponse = self
            .channel
            .unary(&format!("{SERVICE}/CompareVersions"), &request)
            .await?;
        Ok(response.diffs.into_iter().map(wire::diff_from_wire).collect())
    }
}
