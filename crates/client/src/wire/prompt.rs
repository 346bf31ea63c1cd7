//! Wire schema for the prompt service.

use chrono::{DateTime, Utc};
use models::common::Metadata;
use models::prompt as domain;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct PromptVariable {
    pub name: String,
    pub description: String,
    pub default_value: String,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct PromptMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct PromptVersion {
    pub version: u32,
    pub template: String,
    pub system_prompt: String,
    pub messages: Vec<PromptMessage>,
    pub variables: Vec<PromptVariable>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub commit_message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Prompt {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub current_version: u32,
    pub versions: Vec<PromptVersion>,
    pub tags: Vec<String>,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub created_by: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CreatePromptRequest {
    pub name: String,
    pub slug: String,
    pub description: String,
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

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CreatePromptResponse {
    pub prompt: Prompt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetPromptRequest {
    pub id: String,
    /// 0 selects the current version.
    pub version: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetPromptResponse {
    pub prompt: Prompt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct UpdatePromptRequest {
    pub id: String,
    pub template: String,
    pub system_prompt: String,
    pub messages: Vec<PromptMessage>,
    pub variables: Vec<PromptVariable>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub commit_message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct UpdatePromptResponse {
    pub prompt: Prompt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct DeletePromptRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct DeletePromptResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListPromptsRequest {
    pub tags: Vec<String>,
    pub search: String,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListPromptsResponse {
    pub prompts: Vec<Prompt>,
    pub total_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetPromptVersionRequest {
    pub id: String,
    pub version: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetPromptVersionResponse {
    pub version: PromptVersion,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListVersionsRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListVersionsResponse {
    pub versions: Vec<PromptVersion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CompareVersionsRequest {
    pub prompt_id: String,
    pub version_a: u32,
    pub version_b: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct VersionDiff {
    pub field: String,
    pub old_value: String,
    pub new_value: String,
    pub diff_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CompareVersionsResponse {
    pub diffs: Vec<VersionDiff>,
}

pub(crate) fn message_to_wire(message: &domain::PromptMessage) -> PromptMessage {
    PromptMessage {
        role: message.role.clone(),
        content: message.content.clone(),
    }
}

pub(crate) fn variable_to_wire(variable: &domain::PromptVariable) -> PromptVariable {
    PromptVariable {
        name: variable.name.clone(),
        description: variable.description.clone(),
        default_value: variable.default_value.clone(),
        required: variable.required,
    }
}

pub(crate) fn version_from_wire(version: PromptVersion) -> domain::PromptVersion {
    domain::PromptVersion {
        version: version.version,
        template: version.template,
        system_prompt: version.system_prompt,
        messages: version
            .messages
            .into_iter()
            .map(|m| domain::PromptMessage {
                role: m.role,
                content: m.content,
            })
            .collect(),
        variables: version
            .variables
            .into_iter()
            .map(|v| domain::PromptVariable {
                name: v.name,
                description: v.description,
                default_value: v.default_value,
                required: v.required,
            })
            .collect(),
        model: version.model,
        temperature: version.temperature,
        max_tokens: version.max_tokens,
        created_at: version.created_at,
        created_by: version.created_by,
        commit_message: version.commit_message,
    }
}

pub(crate) fn prompt_from_wire(prompt: Prompt) -> domain::Prompt {
    domain::Prompt {
        id: prompt.id,
        name: prompt.name,
        slug: prompt.slug,
        description: prompt.description,
        current_version: prompt.current_version,
        versions: prompt.versions.into_iter().map(version_from_wire).collect(),
        tags: prompt.tags,
        metadata: prompt.metadata,
        created_at: prompt.created_at,
        updated_at: prompt.updated_at,
        created_by: prompt.created_by,
    }
}

pub(crate) fn diff_from_wire(diff: VersionDiff) -> domain::VersionDiff {
    domain::VersionDiff {
        field: diff.field,
        old_value: diff.old_value,
        new_value: diff.new_value,
        diff_type: diff.diff_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_decodes_with_absent_timestamps() {
        let prompt: Prompt = serde_json::from_str(
            r#"{"id":"prm_1","name":"greeter","current_version":1,
                "versions":[{"version":1,"template":"Hello {{name}}!"}]}"#,
        )
        .unwrap();
        let prompt = prompt_from_wire(prompt);

        assert_eq!(prompt.id, "prm_1");
        assert!(prompt.created_at.is_none());
        assert!(prompt.updated_at.is_none());
        assert_eq!(prompt.versions.len(), 1);
        assert!(prompt.versions[0].created_at.is_none());
        assert_eq!(prompt.versions[0].template, "Hello {{name}}!");
    }
}
