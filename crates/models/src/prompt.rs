//! Models for the prompt service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::Metadata;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("prompt version {0} not found")]
    VersionNotFound(u32),
}

/// A variable used in a prompt template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptVariable {
    pub name: String,
    pub description: String,
    pub default_value: String,
    pub required: bool,
}

impl Default for PromptVariable {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            default_value: String::new(),
            required: true,
        }
    }
}

/// A message in a prompt template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    /// system, user, assistant
    pub role: String,
    pub content: String,
}

/// A specific version of a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptVersion {
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

impl Default for PromptVersion {
    fn default() -> Self {
        Self {
            version: 0,
            template: String::new(),
            system_prompt: String::new(),
            messages: Vec::new(),
            variables: Vec::new(),
            model: String::new(),
            temperature: 0.7,
            max_tokens: 1024,
            created_at: None,
            created_by: String::new(),
            commit_message: String::new(),
        }
    }
}

/// A prompt with its current and historical versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
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

impl Prompt {
    /// Look up a version by number, defaulting to the current version.
    pub fn version(&self, version: Option<u32>) -> Option<&PromptVersion> {
        let target = version.unwrap_or(self.current_version);
        self.versions.iter().find(|v| v.version == target)
    }

    /// The version `current_version` points at, if it exists.
    pub fn latest(&self) -> Option<&PromptVersion> {
        self.version(None)
    }

    /// Render the selected version's template, substituting `{{name}}`
    /// placeholders with the supplied values. Placeholders without a
    /// matching variable are left verbatim.
    pub fn render(
        &self,
        variables: &Metadata,
        version: Option<u32>,
    ) -> Result<String, PromptError> {
        let v = self
            .version(version)
            .ok_or(PromptError::VersionNotFound(
                version.unwrap_or(self.current_version),
            ))?;

        let mut rendered = v.template.clone();
        for (name, value) in variables {
            rendered = rendered.replace(&format!("{{{{{name}}}}}"), value);
        }
        Ok(rendered)
    }
}

/// One field-level difference between two prompt versions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionDiff {
    pub field: String,
    pub old_value: String,
    pub new_value: String,
    /// added, removed, modified
    pub diff_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt_with_template(template: &str) -> Prompt {
        Prompt {
            id: "prm_1".to_string(),
            name: "greeter".to_string(),
            slug: "greeter".to_string(),
            description: String::new(),
            current_version: 2,
            versions: vec![
                PromptVersion {
                    version: 1,
                    template: "old {{name}}".to_string(),
                    ..PromptVersion::default()
                },
                PromptVersion {
                    version: 2,
                    template: template.to_string(),
                    ..PromptVersion::default()
                },
            ],
            tags: Vec::new(),
            metadata: Metadata::new(),
            created_at: None,
            updated_at: None,
            created_by: String::new(),
        }
    }

    #[test]
    fn render_substitutes_placeholders() {
        let prompt = prompt_with_template("Hello {{name}}!");
        let mut vars = Metadata::new();
        vars.insert("name".to_string(), "World".to_string());

        assert_eq!(prompt.render(&vars, None).unwrap(), "Hello World!");
    }

    #[test]
    fn render_leaves_unmatched_placeholders_verbatim() {
        let prompt = prompt_with_template("Hello {{name}}!");
        let rendered = prompt.render(&Metadata::new(), None).unwrap();
        assert_eq!(rendered, "Hello {{name}}!");
    }

    #[test]
    fn render_selects_explicit_version() {
        let prompt = prompt_with_template("Hello {{name}}!");
        let mut vars = Metadata::new();
        vars.insert("name".to_string(), "World".to_string());

        assert_eq!(prompt.render(&vars, Some(1)).unwrap(), "old World");
        assert_eq!(
            prompt.render(&vars, Some(9)),
            Err(PromptError::VersionNotFound(9))
        );
    }

    #[test]
    fn latest_follows_current_version() {
        let prompt = prompt_with_template("Hello {{name}}!");
        assert_eq!(prompt.latest().map(|v| v.version), Some(2));

        let mut dangling = prompt;
        dangling.current_version = 7;
        assert!(dangling.latest().is_none());
    }
}
