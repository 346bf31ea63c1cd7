//! Models for the deploy service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::Metadata;

/// Status of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    #[default]
    Unspecified,
    PendingApproval,
    PendingGates,
    GatesFailed,
    InProgress,
    Completed,
    RolledBack,
    Cancelled,
    Failed,
}

/// Type of deployment strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentType {
    #[default]
    Unspecified,
    Immediate,
    Gradual,
    Canary,
    BlueGreen,
}

/// Strategy for deploying a new version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentStrategy {
    #[serde(rename = "type")]
    pub type_: DeploymentType,
    pub initial_percentage: u32,
    pub increment: u32,
    pub interval_seconds: u32,
    pub auto_rollback: bool,
    pub rollback_threshold: f64,
}

impl Default for DeploymentStrategy {
    fn default() -> Self {
        Self {
            type_: DeploymentType::Immediate,
            initial_percentage: 0,
            increment: 0,
            interval_seconds: 0,
            auto_rollback: false,
            rollback_threshold: 0.0,
        }
    }
}

/// Progress of a gradual rollout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolloutProgress {
    pub current_percentage: u32,
    pub target_percentage: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_increment_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_increment_at: Option<DateTime<Utc>>,
}

impl Default for RolloutProgress {
    fn default() -> Self {
        Self {
            current_percentage: 0,
            target_percentage: 100,
            last_increment_at: None,
            next_increment_at: None,
        }
    }
}

/// A condition in a quality gate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GateCondition {
    /// eval_score, latency, cost, custom
    #[serde(rename = "type")]
    pub type_: String,
    /// gte, lte, eq
    pub operator: String,
    pub threshold: f64,
    pub eval_run_id: String,
    pub dataset_id: String,
}

/// Result of evaluating a condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionResult {
    #[serde(rename = "type")]
    pub type_: String,
    pub expected: f64,
    pub actual: f64,
    pub passed: bool,
}

/// Result of evaluating a quality gate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityGateResult {
    pub gate_id: String,
    pub gate_name: String,
    pub passed: bool,
    pub message: String,
    pub condition_results: Vec<ConditionResult>,
}

/// A quality gate configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityGate {
    pub id: String,
    pub name: String,
    pub prompt_id: String,
    pub conditions: Vec<GateCondition>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: String,
}

/// Real-time metrics for a deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentMetrics {
    pub avg_latency_ms: f64,
    pub error_rate: f64,
    pub quality_score: f64,
    pub request_count: u32,
}

/// A deployment of a prompt version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: String,
    pub prompt_id: String,
    pub from_version: u32,
    pub to_version: u32,
    pub environment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<DeploymentStrategy>,
    pub status: DeploymentStatus,
    pub status_message: String,
    pub gate_results: Vec<QualityGateResult>,
    pub gates_passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollout: Option<RolloutProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub approved_by: String,
    pub metadata: Metadata,
}

impl Deployment {
    /// Whether the deployment is still moving through the pipeline.
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            DeploymentStatus::PendingApproval
                | DeploymentStatus::PendingGates
                | DeploymentStatus::InProgress
        )
    }

    /// Whether the deployment has reached a terminal state, successful or
    /// not. `Unspecified` is neither active nor complete; the two
    /// predicates are not exhaustive complements.
    pub fn is_complete(&self) -> bool {
        matches!(
            self.status,
            DeploymentStatus::Completed
                | DeploymentStatus::RolledBack
                | DeploymentStatus::Cancelled
                | DeploymentStatus::Failed
                | DeploymentStatus::GatesFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unspecified_is_neither_active_nor_complete() {
        let deployment = Deployment::default();
        assert_eq!(deployment.status, DeploymentStatus::Unspecified);
        assert!(!deployment.is_active());
        assert!(!deployment.is_complete());
    }

    #[test]
    fn active_and_complete_partition_the_remaining_statuses() {
        let active = [
            DeploymentStatus::PendingApproval,
            DeploymentStatus::PendingGates,
            DeploymentStatus::InProgress,
        ];
        let complete = [
            DeploymentStatus::Completed,
            DeploymentStatus::RolledBack,
            DeploymentStatus::Cancelled,
            DeploymentStatus::Failed,
            DeploymentStatus::GatesFailed,
        ];

        for status in active {
            let d = Deployment {
                status,
                ..Deployment::default()
            };
            assert!(d.is_active(), "{status:?} should be active");
            assert!(!d.is_complete());
        }
        for status in complete {
            let d = Deployment {
                status,
                ..Deployment::default()
            };
            assert!(d.is_complete(), "{status:?} should be complete");
            assert!(!d.is_active());
        }
    }
}
