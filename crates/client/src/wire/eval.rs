//! Wire schema for the eval service.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use models::common::{Metadata, Payload};
use models::eval as domain;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct EvaluatorConfig {
    #[serde(rename = "type")]
    pub type_: String,
    pub name: String,
    pub params: Metadata,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct EvalConfig {
    pub evaluators: Vec<EvaluatorConfig>,
    pub provider: String,
    pub model: String,
    pub concurrency: u32,
    pub sample_size: u32,
    pub shuffle: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct EvaluatorResult {
    pub evaluator_type: String,
    pub score: f64,
    pub passed: bool,
    pub explanation: String,
    pub details: Metadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct EvalResult {
    pub id: String,
    pub eval_run_id: String,
    pub example_id: String,
    pub input: Payload,
    pub expected_output: Payload,
    pub actual_output: Payload,
    pub evaluator_results: HashMap<String, EvaluatorResult>,
    pub overall_score: f64,
    pub passed: bool,
    pub latency_ms: f64,
    pub tokens_used: u32,
    pub cost_usd: f64,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct EvalSummary {
    pub overall_score: f64,
    pub scores_by_evaluator: HashMap<String, f64>,
    pub passed_count: u32,
    pub failed_count: u32,
    pub pass_rate: f64,
    pub total_cost_usd: f64,
    pub total_tokens: u32,
    pub avg_latency_ms: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct EvalRun {
    pub id: String,
    pub name: String,
    pub description: String,
    pub prompt_id: String,
    pub prompt_version: u32,
    pub dataset_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<EvalConfig>,
    pub status: String,
    pub error_message: String,
    pub total_examples: u32,
    pub completed_examples: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<EvalSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CreateEvalRunRequest {
    pub name: String,
    pub description: String,
    pub prompt_id: String,
    pub prompt_version: u32,
    pub dataset_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<EvalConfig>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CreateEvalRunResponse {
    pub eval_run: EvalRun,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetEvalRunRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetEvalRunResponse {
    pub eval_run: EvalRun,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListEvalRunsRequest {
    pub prompt_id: String,
    pub dataset_id: String,
    pub status: String,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListEvalRunsResponse {
    pub eval_runs: Vec<EvalRun>,
    pub total_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CancelEvalRunRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CancelEvalRunResponse {
    pub eval_run: EvalRun,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetEvalResultsRequest {
    pub eval_run_id: String,
    pub failed_only: bool,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetEvalResultsResponse {
    pub results: Vec<EvalResult>,
    pub total_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CompareRunsRequest {
    pub run_id_a: String,
    pub run_id_b: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct RunComparison {
    pub run_id: String,
    pub prompt_version: String,
    pub overall_score: f64,
    pub pass_rate: f64,
    pub avg_latency_ms: f64,
    pub total_cost_usd: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ExampleComparison {
    pub example_id: String,
    pub score_a: f64,
    pub score_b: f64,
    pub score_diff: f64,
    pub regression: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CompareRunsResponse {
    pub run_a: RunComparison,
    pub run_b: RunComparison,
    pub examples: Vec<ExampleComparison>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListEvaluatorsRequest {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct EvaluatorParam {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub description: String,
    pub required: bool,
    pub default_value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Evaluator {
    #[serde(rename = "type")]
    pub type_: String,
    pub name: String,
    pub description: String,
    pub params: Vec<EvaluatorParam>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListEvaluatorsResponse {
    pub evaluators: Vec<Evaluator>,
}

pub(crate) fn run_status_to_wire(status: domain::EvalRunStatus) -> &'static str {
    match status {
        domain::EvalRunStatus::Unspecified => "EVAL_RUN_STATUS_UNSPECIFIED",
        domain::EvalRunStatus::Pending => "EVAL_RUN_STATUS_PENDING",
        domain::EvalRunStatus::Running => "EVAL_RUN_STATUS_RUNNING",
        domain::EvalRunStatus::Completed => "EVAL_RUN_STATUS_COMPLETED",
        domain::EvalRunStatus::Failed => "EVAL_RUN_STATUS_FAILED",
        domain::EvalRunStatus::Cancelled => "EVAL_RUN_STATUS_CANCELLED",
    }
}

pub(crate) fn run_status_from_wire(value: &str) -> domain::EvalRunStatus {
    match value {
        "EVAL_RUN_STATUS_PENDING" => domain::EvalRunStatus::Pending,
        "EVAL_RUN_STATUS_RUNNING" => domain::EvalRunStatus::Running,
        "EVAL_RUN_STATUS_COMPLETED" => domain::EvalRunStatus::Completed,
        "EVAL_RUN_STATUS_FAILED" => domain::EvalRunStatus::Failed,
        "EVAL_RUN_STATUS_CANCELLED" => domain::EvalRunStatus::Cancelled,
        _ => domain::EvalRunStatus::Unspecified,
    }
}

pub(crate) fn eval_config_to_wire(config: &domain::EvalConfig) -> EvalConfig {
    EvalConfig {
        evaluators: config
            .evaluators
            .iter()
            .map(|e| EvaluatorConfig {
                type_: e.type_.clone(),
                name: e.name.clone(),
                params: e.params.clone(),
                weight: e.weight,
            })
            .collect(),
        provider: config.provider.clone(),
        model: config.model.clone(),
        concurrency: config.concurrency,
        sample_size: config.sample_size,
        shuffle: config.shuffle,
    }
}

fn eval_config_from_wire(config: EvalConfig) -> domain::EvalConfig {
    domain::EvalConfig {
        evaluators: config
            .evaluators
            .into_iter()
            .map(|e| domain::EvaluatorConfig {
                type_: e.type_,
                name: e.name,
                params: e.params,
                weight: e.weight,
            })
            .collect(),
        provider: config.provider,
        model: config.model,
        concurrency: config.concurrency,
        sample_size: config.sample_size,
        shuffle: config.shuffle,
    }
}

fn summary_from_wire(summary: EvalSummary) -> domain::EvalSummary {
    domain::EvalSummary {
        overall_score: summary.overall_score,
        scores_by_evaluator: summary.scores_by_evaluator,
        passed_count: summary.passed_count,
        failed_count: summary.failed_count,
        pass_rate: summary.pass_rate,
        total_cost_usd: summary.total_cost_usd,
        total_tokens: summary.total_tokens,
        avg_latency_ms: summary.avg_latency_ms,
    }
}

pub(crate) fn run_from_wire(run: EvalRun) -> domain::EvalRun {
    domain::EvalRun {
        id: run.id,
        name: run.name,
        description: run.description,
        prompt_id: run.prompt_id,
        prompt_version: run.prompt_version,
        dataset_id: run.dataset_id,
        config: run.config.map(eval_config_from_wire),
        status: run_status_from_wire(&run.status),
        error_message: run.error_message,
        total_examples: run.total_examples,
        completed_examples: run.completed_examples,
        summary: run.summary.map(summary_from_wire),
        created_at: run.created_at,
        started_at: run.started_at,
        completed_at: run.completed_at,
        created_by: run.created_by,
        metadata: run.metadata,
    }
}

pub(crate) fn result_from_wire(result: EvalResult) -> domain::EvalResult {
    domain::EvalResult {
        id: result.id,
        eval_run_id: result.eval_run_id,
        example_id: result.example_id,
        input: result.input,
        expected_output: result.expected_output,
        actual_output: result.actual_output,
        evaluator_results: result
            .evaluator_results
            .into_iter()
            .map(|(name, r)| {
                (
                    name,
                    domain::EvaluatorResult {
                        evaluator_type: r.evaluator_type,
                        score: r.score,
                        passed: r.passed,
                        explanation: r.explanation,
                        details: r.details,
                    },
                )
            })
            .collect(),
        overall_score: result.overall_score,
        passed: result.passed,
        latency_ms: result.latency_ms,
        tokens_used: result.tokens_used,
        cost_usd: result.cost_usd,
        error: result.error,
    }
}

pub(crate) fn comparison_from_wire(comparison: RunComparison) -> domain::RunComparison {
    domain::RunComparison {
        run_id: comparison.run_id,
        prompt_version: comparison.prompt_version,
        overall_score: comparison.overall_score,
        pass_rate: comparison.pass_rate,
        avg_latency_ms: comparison.avg_latency_ms,
        total_cost_usd: comparison.total_cost_usd,
    }
}

pub(crate) fn example_comparison_from_wire(
    comparison: ExampleComparison,
) -> domain::ExampleComparison {
    domain::ExampleComparison {
        example_id: comparison.example_id,
        score_a: comparison.score_a,
        score_b: comparison.score_b,
        score_diff: comparison.score_diff,
        regression: comparison.regression,
    }
}

pub(crate) fn evaluator_from_wire(evaluator: Evaluator) -> domain::Evaluator {
    domain::Evaluator {
        type_: evaluator.type_,
        name: evaluator.name,
        description: evaluator.description,
        params: evaluator
            .params
            .into_iter()
            .map(|p| domain::EvaluatorParam {
                name: p.name,
                type_: p.type_,
                description: p.description,
                required: p.required,
                default_value: p.default_value,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_status_round_trips() {
        let statuses = [
            domain::EvalRunStatus::Unspecified,
            domain::EvalRunStatus::Pending,
            domain::EvalRunStatus::Running,
            domain::EvalRunStatus::Completed,
            domain::EvalRunStatus::Failed,
            domain::EvalRunStatus::Cancelled,
        ];
        for status in statuses {
            assert_eq!(run_status_from_wire(run_status_to_wire(status)), status);
        }
        assert_eq!(
            run_status_from_wire("EVAL_RUN_STATUS_PAUSED"),
            domain::EvalRunStatus::Unspecified
        );
    }

    #[test]
    fn run_decodes_without_config_or_summary() {
        let run: EvalRun = serde_json::from_str(
            r#"{"id":"run_1","name":"nightly","status":"EVAL_RUN_STATUS_RUNNING",
                "total_examples":4,"completed_examples":1}"#,
        )
        .unwrap();
        let run = run_from_wire(run);
        assert!(run.config.is_none());
        assert!(run.summary.is_none());
        assert_eq!(run.status, domain::EvalRunStatus::Running);
        assert_eq!(run.progress(), 25.0);
    }
}
