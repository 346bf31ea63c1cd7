//! Models for the eval service.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{Metadata, Payload};

/// Status of an evaluation run.
///
/// Runs move `Pending -> Running -> {Completed, Failed, Cancelled}`; the
/// last three are terminal. Transitions happen server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalRunStatus {
    #[default]
    Unspecified,
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

/// Configuration for a single evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// exact_match, semantic_similarity, llm_judge, ...
    #[serde(rename = "type")]
    pub type_: String,
    pub name: String,
    pub params: Metadata,
    pub weight: f64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            type_: String::new(),
            name: String::new(),
            params: Metadata::new(),
            weight: 1.0,
        }
    }
}

/// Configuration for an evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    pub evaluators: Vec<EvaluatorConfig>,
    pub provider: String,
    pub model: String,
    pub concurrency: u32,
    /// 0 = all examples
    pub sample_size: u32,
    pub shuffle: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            evaluators: Vec::new(),
            provider: String::new(),
            model: String::new(),
            concurrency: 1,
            sample_size: 0,
            shuffle: false,
        }
    }
}

/// Result from a single evaluator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorResult {
    pub evaluator_type: String,
    /// 0-1
    pub score: f64,
    pub passed: bool,
    pub explanation: String,
    pub details: Metadata,
}

/// Result for a single example.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalResult {
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

/// Summary statistics for an evaluation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalSummary {
    pub overall_score: f64,
    pub scores_by_evaluator: HashMap<String, f64>,
    pub passed_count: u32,
    pub failed_count: u32,
    pub pass_rate: f64,
    pub total_cost_usd: f64,
    pub total_tokens: u32,
    pub avg_latency_ms: f64,
}

/// An evaluation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalRun {
    pub id: String,
    pub name: String,
    pub description: String,
    pub prompt_id: String,
    pub prompt_version: u32,
    pub dataset_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<EvalConfig>,
    pub status: EvalRunStatus,
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

impl EvalRun {
    /// Completion progress as a percentage. Zero when no examples exist.
    pub fn progress(&self) -> f64 {
        if self.total_examples == 0 {
            return 0.0;
        }
        f64::from(self.completed_examples) / f64::from(self.total_examples) * 100.0
    }
}

/// Parameter definition for an evaluator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorParam {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub description: String,
    pub required: bool,
    pub default_value: String,
}

/// An available evaluator type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluator {
    #[serde(rename = "type")]
    pub type_: String,
    pub name: String,
    pub description: String,
    pub params: Vec<EvaluatorParam>,
}

/// Summary of one run inside a comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunComparison {
    pub run_id: String,
    pub prompt_version: String,
    pub overall_score: f64,
    pub pass_rate: f64,
    pub avg_latency_ms: f64,
    pub total_cost_usd: f64,
}

/// Comparison of a single example across two runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExampleComparison {
    pub example_id: String,
    pub score_a: f64,
    pub score_b: f64,
    pub score_diff: f64,
    pub regression: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_zero_without_examples() {
        let run = EvalRun {
            completed_examples: 3,
            total_examples: 0,
            ..EvalRun::default()
        };
        assert_eq!(run.progress(), 0.0);
    }

    #[test]
    fn progress_is_a_percentage() {
        let run = EvalRun {
            completed_examples: 1,
            total_examples: 4,
            ..EvalRun::default()
        };
        assert_eq!(run.progress(), 25.0);
    }
}
