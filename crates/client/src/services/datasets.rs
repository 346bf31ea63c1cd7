//! Client for the datasets service.

use config::ServiceEndpoint;
use models::common::{Metadata, Page};
use models::datasets::{Dataset, DatasetSchema, Example, ExampleInput};

use crate::channel::{Channel, ClientSettings};
use crate::error::Result;
use crate::wire::datasets as wire;

const SERVICE: &str = "lattice.datasets.v1.DatasetsService";

/// Options for [`DatasetsClient::create`].
#[derive(Debug, Clone, Default)]
pub struct CreateDatasetOptions {
    pub description: String,
    /// Id of the prompt this dataset exercises.
    pub prompt_id: String,
    pub schema: Option<DatasetSchema>,
    pub tags: Vec<String>,
    pub metadata: Metadata,
}

/// Options for [`DatasetsClient::update`].
#[derive(Debug, Clone, Default)]
pub struct UpdateDatasetOptions {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub metadata: Metadata,
}

/// Filters for [`DatasetsClient::list`].
#[derive(Debug, Clone)]
pub struct ListDatasetsOptions {
    pub prompt_id: String,
    pub tags: Vec<String>,
    pub search: String,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ListDatasetsOptions {
    fn default() -> Self {
        Self {
            prompt_id: String::new(),
            tags: Vec::new(),
            search: String::new(),
            limit: 100,
            offset: 0,
        }
    }
}

/// Options for [`DatasetsClient::get_examples`].
#[derive(Debug, Clone)]
pub struct GetExamplesOptions {
    pub limit: u32,
    pub offset: u32,
    pub shuffle: bool,
}

impl Default for GetExamplesOptions {
    fn default() -> Self {
        Self {
            limit: 100,
            offset: 0,
            shuffle: false,
        }
    }
}

/// Examples echoed back by an add operation.
#[derive(Debug, Clone)]
pub struct AddedExamples {
    pub examples: Vec<Example>,
    pub added_count: u32,
}

/// Examples produced by a generate operation.
#[derive(Debug, Clone)]
pub struct GeneratedExamples {
    pub examples: Vec<Example>,
    pub generated_count: u32,
}

/// Client for the datasets service.
pub struct DatasetsClient {
    channel: Channel,
}

impl DatasetsClient {
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

    /// Create a new dataset.
    pub async fn create(
        &self,
        name: impl Into<String>,
        options: CreateDatasetOptions,
    ) -> Result<Dataset> {
        let request = wire::CreateDatasetRequest {
            name: name.into(),
            description: options.description,
            prompt_id: options.prompt_id,
            schema: options.schema.as_ref().map(wire::schema_to_wire),
            tags: options.tags,
            metadata: options.metadata,
        };
        let response: wire::CreateDatasetResponse = self
            .channel
            .unary(&format!("{SERVICE}/CreateDataset"), &request)
            .await?;
        Ok(wire::dataset_from_wire(response.dataset))
    }

    /// Get a dataset by id, or `None` if it does not exist.
    pub async fn get(&self, id: &str) -> Result<Option<Dataset>> {
        let request = wire::GetDatasetRequest { id: id.to_string() };
        let result: Result<wire::GetDatasetResponse> = self
            .channel
            .unary(&format!("{SERVICE}/GetDataset"), &request)
            .await;
        match result {
            Ok(response) => Ok(Some(wire::dataset_from_wire(response.dataset))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Update a dataset's descriptive fields.
    pub async fn update(&self, id: &str, options: UpdateDatasetOptions) -> Result<Dataset> {
        let request = wire::UpdateDatasetRequest {
            id: id.to_string(),
            name: options.name,
            description: options.description,
            tags: options.tags,
            metadata: options.metadata,
        };
        let response: wire::UpdateDatasetResponse = self
            .channel
            .unary(&format!("{SERVICE}/UpdateDataset"), &request)
            .await?;
        Ok(wire::dataset_from_wire(response.dataset))
    }

    /// Delete a dataset.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let request = wire::DeleteDatasetRequest { id: id.to_string() };
        let response: wire::DeleteDatasetResponse = self
            .channel
            .unary(&format!("{SERVICE}/DeleteDataset"), &request)
            .await?;
        Ok(response.success)
    }

    /// List datasets, one page at a time.
    pub async fn list(&self, options: ListDatasetsOptions) -> Result<Page<Dataset>> {
        let request = wire::ListDatasetsRequest {
            prompt_id: options.prompt_id,
            tags: options.tags,
            search: options.search,
            limit: options.limit,
            offset: options.offset,
        };
        let response: wire::ListDatasetsResponse = self
            .channel
            .unary(&format!("{SERVICE}/ListDatasets"), &request)
            .await?;
        Ok(Page {
            items: response
                .datasets
                .into_iter()
                .map(wire::dataset_from_wire)
                .collect(),
            total_count: response.total_count,
            limit: options.limit,
            offset: options.offset,
        })
    }

    /// Add examples to a dataset.
    pub async fn add_examples(
        &self,
        dataset_id: &str,
        examples: Vec<ExampleInput>,
    ) -> Result<AddedExamples> {
        let request = wire::AddExamplesRequest {
            dataset_id: dataset_id.to_string(),
            examples: examples.iter().map(wire::example_input_to_wire).collect(),
        };
        let response: wire::AddExamplesResponse = self
            .channel
            .unary(&format!("{SERVICE}/AddExamples"), &request)
            .await?;
        Ok(AddedExamples {
            examples: response
                .examples
                .into_iter()
                .map(wire::example_from_wire)
                .collect(),
            added_count: response.added_count,
        })
    }

    /// Fetch examples from a dataset, one page at a time.
    pub async fn get_examples(
        &self,
        dataset_id: &str,
        options: GetExamplesOptions,
    ) -> Result<Page<Example>> {
        let request = wire::GetExamplesRequest {
            dataset_id: dataset_id.to_string(),
            limit: options.limit,
            offset: options.offset,
            shuffle: options.shuffle,
        };
        let response: wire::GetExamplesResponse = self
            .channel
            .unary(&format!("{SERVICE}/GetExamples"), &request)
            .await?;
        Ok(Page {
            items: response
                .examples
                .into_iter()
                .map(wire::example_from_wire)
                .collect(),
            total_count: response.total_count,
            limit: options.limit,
            offset: options.offset,
        })
    }

    /// Remove examples; returns how many the service deleted.
    pub async fn remove_examples(&self, dataset_id: &str, example_ids: Vec<String>) -> Result<u32> {
        let request = wire::RemoveExamplesRequest {
            dataset_id: dataset_id.to_string(),
            example_ids,
        };
        let response: wire::RemoveExamplesResponse = self
            .channel
            .unary(&format!("{SERVICE}/RemoveExamples"), &request)
            .await?;
        Ok(response.removed_count)
    }

    /// Ask the service to synthesize examples for a dataset.
    pub async fn generate_examples(
        &self,
        dataset_id: &str,
        count: u32,
    ) -> Result<GeneratedExamples> {
        let request = wire::GenerateExamplesRequest {
            dataset_id: dataset_id.to_string(),
            count,
        };
        let response: wire::GenerateExamplesResponse = self
            .channel
            .unary(&format!("{SERVICE}/GenerateExamples"), &request)
            .await?;
        Ok(GeneratedExamples {
            examples: response
                .examples
                .into_iter()
                .map(wire::example_from_wire)
                .collect(),
            generated_count: response.generated_count,
        })
    }
}
