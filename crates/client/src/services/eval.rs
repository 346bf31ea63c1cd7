//! Client for the eval service.

use config::ServiceEndpoint;
use models::common::{Metadata, Page};
use models::eval::{
    EvalConfig, EvalResult, EvalRun, EvalRunStatus, Evaluator, ExampleComparison, RunComparison,
};

use crate::channel::{Channel, ClientSettings};
use crate::error::Result;
use crate::wire::eval as wire;

const SERVICE: &str = "lattice.eval.v1.EvalService";

/// Options for [`EvalClient::create_run`].
#[derive(Debug, Clone, Default)]
pub struct CreateEvalRunOptions {
    pub description: String,
    pub prompt_id: String,
    pub prompt_version: u32,
    pub dataset_id: String,
    pub config: Option<EvalConfig>,
    pub metadata: Metadata,
}

/// Filters for [`EvalClient::list_runs`].
#[derive(Debug, Clone)]
pub struct ListEvalRunsOptions {
    pub prompt_id: String,
    pub dataset_id: String,
    pub status: EvalRunStatus,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ListEvalRunsOptions {
    fn default() -> Self {
        Self {
            prompt_id: String::new(),
            dataset_id: String::new(),
            status: EvalRunStatus::Unspecified,
            limit: 100,
            offset: 0,
        }
    }
}

/// Filters for [`EvalClient::get_results`].
#[derive(Debug, Clone)]
pub struct GetEvalResultsOptions {
    pub failed_only: bool,
    pub limit: u32,
    pub offset: u32,
}

impl Default for GetEvalResultsOptions {
    fn default() -> Self {
        Self {
            failed_only: false,
            limit: 100,
            offset: 0,
        }
    }
}

/// Result of comparing two runs.
#[derive(Debug, Clone)]
pub struct RunComparisonResult {
    pub run_a: RunComparison,
    pub run_b: RunComparison,
    pub examples: Vec<ExampleComparison>,
}

/// Client for the eval service.
pub struct EvalClient {
    channel: Channel,
}

impl EvalClient {
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

    /// Create and start an evaluation run.
    pub async fn create_run(
        &self,
        name: impl Into<String>,
        options: CreateEvalRunOptions,
    ) -> Result<EvalRun> {
        let request = wire::CreateEvalRunRequest {
            name: name.into(),
            description: options.description,
            prompt_id: options.prompt_id,
            prompt_version: options.prompt_version,
            dataset_id: options.dataset_id,
            config: options.config.as_ref().map(wire::eval_config_to_wire),
            metadata: options.metadata,
        };
        let response: wire::CreateEvalRunResponse = self
            .channel
            .unary(&format!("{SERVICE}/CreateEvalRun"), &request)
            .await?;
        Ok(wire::run_from_wire(response.eval_run))
    }

    /// Get an evaluation run by id, or `None` if it does not exist.
    pub async fn get_run(&self, id: &str) -> Result<Option<EvalRun>> {
        let request = wire::GetEvalRunRequest { id: id.to_string() };
        let result: Result<wire::GetEvalRunResponse> = self
            .channel
            .unary(&format!("{SERVICE}/GetEvalRun"), &request)
            .await;
        match result {
            Ok(response) => Ok(Some(wire::run_from_wire(response.eval_run))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// List evaluation runs, one page at a time.
    pub async fn list_runs(&self, options: ListEvalRunsOptions) -> Result<Page<EvalRun>> {
        let request = wire::ListEvalRunsRequest {
            prompt_id: options.prompt_id,
            dataset_id: options.dataset_id,
            status: wire::run_status_to_wire(options.status).to_string(),
            limit: options.limit,
            offset: options.offset,
        };
        let response: wire::ListEvalRunsResponse = self
            .channel
            .unary(&format!("{SERVICE}/ListEvalRuns"), &request)
            .await?;
        Ok(Page {
            items: response
                .eval_runs
                .into_iter()
                .map(wire::run_from_wire)
                .collect(),
            total_count: response.total_count,
            limit: options.limit,
            offset: options.offset,
        })
    }

    /// Request cancellation of a run. Whether this transitions the run,
    /// no-ops, or fails is decided by the service.
    pub async fn cancel_run(&self, id: &str) -> Result<EvalRun> {
        let request = wire::CancelEvalRunRequest { id: id.to_string() };
        let response: wire::CancelEvalRunResponse = self
            .channel
            .unary(&format!("{SERVICE}/CancelEvalRun"), &request)
            .await?;
        Ok(wire::run_from_wire(response.eval_run))
    }

    /// Fetch per-example results for a run, one page at a time.
    pub async fn get_results(
        &self,
        eval_run_id: &str,
        options: GetEvalResultsOptions,
    ) -> Result<Page<EvalResult>> {
        let request = wire::GetEvalResultsRequest {
            eval_run_id: eval_run_id.to_string(),
            failed_only: options.failed_only,
            limit: options.limit,
            offset: options.offset,
        };
        let response: wire::GetEvalResultsResponse = self
            .channel
            .unary(&format!("{SERVICE}/GetEvalResults"), &request)
            .await?;
        Ok(Page {
            items: response
                .results
                .into_iter()
                .map(wire::result_from_wire)
                .collect(),
            total_count: response.total_count,
            limit: options.limit,
            offset: options.offset,
        })
    }

    /// Compare two evaluation runs.
    pub async fn compare_runs(&self, run_id_a: &str, run_id_b: &str) -> Result<RunComparisonResult> {
        let request = wire::CompareRunsRequest {
            run_id_a: run_id_a.to_string(),
            run_id_b: run_id_b.to_string(),
        };
        let response: wire::CompareRunsResponse = self
            .channel
            .unary(&format!("{SERVICE}/CompareRuns"), &request)
            .await?;
        Ok(RunComparisonResult {
            run_a: wire::comparison_from_wire(response.run_a),
            run_b: wire::comparison_from_wire(response.run_b),
            examples: response
                .examples
                .into_iter()
                .map(wire::example_comparison_from_wire)
                .collect(),
        })
    }

    /// List the evaluator types the service offers.
    pub async fn list_evaluators(&self) -> Result<Vec<Evaluator>> {
        let request = wire::ListEvaluatorsRequest {};
        let response: wire::ListEvaluatorsResponse = self
            .channel
            .unary(&format!("{SERVICE}/ListEvaluators"), &request)
            .await?;
        Ok(response
            .evaluators
            .into_iter()
            .map(wire::evaluator_from_wire)
            .collect())
    }
}
