//! Models for the datasets service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{Metadata, Payload};

/// Source of an example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExampleSource {
    #[default]
    Unspecified,
    Manual,
    Generated,
    Production,
    Imported,
}

/// A field in the dataset schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    /// string, number, boolean, json, array
    #[serde(rename = "type")]
    pub type_: String,
    pub description: String,
    pub required: bool,
}

impl Default for SchemaField {
    fn default() -> Self {
        Self {
            name: String::new(),
            type_: String::new(),
            description: String::new(),
            required: true,
        }
    }
}

/// Schema defining the structure of examples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSchema {
    pub input_fields: Vec<SchemaField>,
    pub expected_output_fields: Vec<SchemaField>,
}

/// Input for creating an example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleInput {
    pub input: Payload,
    pub expected_output: Payload,
    pub metadata: Metadata,
    pub source: ExampleSource,
}

impl Default for ExampleInput {
    fn default() -> Self {
        Self {
            input: Payload::new(),
            expected_output: Payload::new(),
            metadata: Metadata::new(),
            source: ExampleSource::Manual,
        }
    }
}

/// A single example in a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub id: String,
    pub dataset_id: String,
    pub input: Payload,
    pub expected_output: Payload,
    pub metadata: Metadata,
    pub source: ExampleSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A dataset containing examples for evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub name: String,
    pub description: String,
    pub prompt_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<DatasetSchema>,
    pub example_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub metadata: Metadata,
    pub version: u32,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
