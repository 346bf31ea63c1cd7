//! Wire schema for the datasets service.

use chrono::{DateTime, Utc};
use models::common::{Metadata, Payload};
use models::datasets as domain;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SchemaField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub description: String,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct DatasetSchema {
    pub input_fields: Vec<SchemaField>,
    pub expected_output_fields: Vec<SchemaField>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ExampleInput {
    pub input: Payload,
    pub expected_output: Payload,
    pub metadata: Metadata,
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Example {
    pub id: String,
    pub dataset_id: String,
    pub input: Payload,
    pub expected_output: Payload,
    pub metadata: Metadata,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Dataset {
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

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CreateDatasetRequest {
    pub name: String,
    pub description: String,
    pub prompt_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<DatasetSchema>,
    pub tags: Vec<String>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CreateDatasetResponse {
    pub dataset: Dataset,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetDatasetRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetDatasetResponse {
    pub dataset: Dataset,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct UpdateDatasetRequest {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct UpdateDatasetResponse {
    pub dataset: Dataset,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct DeleteDatasetRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct DeleteDatasetResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListDatasetsRequest {
    pub prompt_id: String,
    pub tags: Vec<String>,
    pub search: String,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListDatasetsResponse {
    pub datasets: Vec<Dataset>,
    pub total_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AddExamplesRequest {
    pub dataset_id: String,
    pub examples: Vec<ExampleInput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AddExamplesResponse {
    pub examples: Vec<Example>,
    pub added_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetExamplesRequest {
    pub dataset_id: String,
    pub limit: u32,
    pub offset: u32,
    pub shuffle: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetExamplesResponse {
    pub examples: Vec<Example>,
    pub total_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct RemoveExamplesRequest {
    pub dataset_id: String,
    pub example_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct RemoveExamplesResponse {
    pub removed_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GenerateExamplesRequest {
    pub dataset_id: String,
    pub count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GenerateExamplesResponse {
    pub examples: Vec<Example>,
    pub generated_count: u32,
}

pub(crate) fn example_source_to_wire(source: domain::ExampleSource) -> &'static str {
    match source {
        domain::ExampleSource::Unspecified => "EXAMPLE_SOURCE_UNSPECIFIED",
        domain::ExampleSource::Manual => "EXAMPLE_SOURCE_MANUAL",
        domain::ExampleSource::Generated => "EXAMPLE_SOURCE_GENERATED",
        domain::ExampleSource::Production => "EXAMPLE_SOURCE_PRODUCTION",
        domain::ExampleSource::Imported => "EXAMPLE_SOURCE_IMPORTED",
    }
}

pub(crate) fn example_source_from_wire(value: &str) -> domain::ExampleSource {
    match value {
        "EXAMPLE_SOURCE_MANUAL" => domain::ExampleSource::Manual,
        "EXAMPLE_SOURCE_GENERATED" => domain::ExampleSource::Generated,
        "EXAMPLE_SOURCE_PRODUCTION" => domain::ExampleSource::Production,
        "EXAMPLE_SOURCE_IMPORTED" => domain::ExampleSource::Imported,
        _ => domain::ExampleSource::Unspecified,
    }
}

pub(crate) fn schema_to_wire(schema: &domain::DatasetSchema) -> DatasetSchema {
    DatasetSchema {
        input_fields: schema.input_fields.iter().map(field_to_wire).collect(),
        expected_output_fields: schema
            .expected_output_fields
            .iter()
            .map(field_to_wire)
            .collect(),
    }
}

fn field_to_wire(field: &domain::SchemaField) -> SchemaField {
    SchemaField {
        name: field.name.clone(),
        type_: field.type_.clone(),
        description: field.description.clone(),
        required: field.required,
    }
}

fn field_from_wire(field: SchemaField) -> domain::SchemaField {
    domain::SchemaField {
        name: field.name,
        type_: field.type_,
        description: field.description,
        required: field.required,
    }
}

pub(crate) fn schema_from_wire(schema: DatasetSchema) -> domain::DatasetSchema {
    domain::DatasetSchema {
        input_fields: schema.input_fields.into_iter().map(field_from_wire).collect(),
        expected_output_fields: schema
            .expected_output_fields
            .into_iter()
            .map(field_from_wire)
            .collect(),
    }
}

pub(crate) fn example_input_to_wire(example: &domain::ExampleInput) -> ExampleInput {
    ExampleInput {
        input: example.input.clone(),
        expected_output: example.expected_output.clone(),
        metadata: example.metadata.clone(),
        source: example_source_to_wire(example.source).to_string(),
    }
}

pub(crate) fn example_from_wire(example: Example) -> domain::Example {
    domain::Example {
        id: example.id,
        dataset_id: example.dataset_id,
        input: example.input,
        expected_output: example.expected_output,
        metadata: example.metadata,
        source: example_source_from_wire(&example.source),
        created_at: example.created_at,
    }
}

pub(crate) fn dataset_from_wire(dataset: Dataset) -> domain::Dataset {
    domain::Dataset {
        id: dataset.id,
        name: dataset.name,
        description: dataset.description,
        prompt_id: dataset.prompt_id,
        schema: dataset.schema.map(schema_from_wire),
        example_count: dataset.example_count,
        last_updated: dataset.last_updated,
        tags: dataset.tags,
        metadata: dataset.metadata,
        version: dataset.version,
        created_by: dataset.created_by,
        created_at: dataset.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_source_round_trips() {
        let sources = [
            domain::ExampleSource::Unspecified,
            domain::ExampleSource::Manual,
            domain::ExampleSource::Generated,
            domain::ExampleSource::Production,
            domain::ExampleSource::Imported,
        ];
        for source in sources {
            assert_eq!(
                example_source_from_wire(example_source_to_wire(source)),
                source
            );
        }
        assert_eq!(
            example_source_from_wire("EXAMPLE_SOURCE_DREAMED"),
            domain::ExampleSource::Unspecified
        );
    }

    #[test]
    fn absent_schema_stays_absent() {
        let dataset: Dataset =
            serde_json::from_str(r#"{"id":"ds_1","name":"golden"}"#).unwrap();
        let dataset = dataset_from_wire(dataset);
        assert!(dataset.schema.is_none());

        let dataset: Dataset = serde_json::from_str(
            r#"{"id":"ds_2","name":"typed","schema":
                {"input_fields":[{"name":"question","type":"string","required":true}]}}"#,
        )
        .unwrap();
        let dataset = dataset_from_wire(dataset);
        let schema = dataset.schema.unwrap();
        assert_eq!(schema.input_fields.len(), 1);
        assert_eq!(schema.input_fields[0].type_, "string");
    }

    #[test]
    fn example_payloads_round_trip_as_json_objects() {
        let mut input = Payload::new();
        input.insert("question".to_string(), serde_json::json!("2+2?"));
        input.insert("difficulty".to_string(), serde_json::json!(3));

        let example = domain::ExampleInput {
            input: input.clone(),
            ..domain::ExampleInput::default()
        };
        let wire = example_input_to_wire(&example);
        let json = serde_json::to_string(&wire).unwrap();
        let decoded: ExampleInput = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.input, input);
        assert_eq!(decoded.source, "EXAMPLE_SOURCE_MANUAL");
    }
}
