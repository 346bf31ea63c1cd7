//! Wire schema for the deploy service.

use chrono::{DateTime, Utc};
use models::common::Metadata;
use models::deploy as domain;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct DeploymentStrategy {
    #[serde(rename = "type")]
    pub type_: String,
    pub initial_percentage: u32,
    pub increment: u32,
    pub interval_seconds: u32,
    pub auto_rollback: bool,
    pub rollback_threshold: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct RolloutProgress {
    pub current_percentage: u32,
    pub target_percentage: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_increment_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_increment_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GateCondition {
    #[serde(rename = "type")]
    pub type_: String,
    pub operator: String,
    pub threshold: f64,
    pub eval_run_id: String,
    pub dataset_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ConditionResult {
    #[serde(rename = "type")]
    pub type_: String,
    pub expected: f64,
    pub actual: f64,
    pub passed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct QualityGateResult {
    pub gate_id: String,
    pub gate_name: String,
    pub passed: bool,
    pub message: String,
    pub condition_results: Vec<ConditionResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct QualityGate {
    pub id: String,
    pub name: String,
    pub prompt_id: String,
    pub conditions: Vec<GateCondition>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Deployment {
    pub id: String,
    pub prompt_id: String,
    pub from_version: u32,
    pub to_version: u32,
    pub environment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<DeploymentStrategy>,
    pub status: String,
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

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CreateDeploymentRequest {
    pub prompt_id: String,
    pub to_version: u32,
    pub environment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<DeploymentStrategy>,
    pub skip_approval: bool,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CreateDeploymentResponse {
    pub deployment: Deployment,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetDeploymentRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetDeploymentResponse {
    pub deployment: Deployment,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListDeploymentsRequest {
    pub prompt_id: String,
    pub environment: String,
    pub status: String,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListDeploymentsResponse {
    pub deployments: Vec<Deployment>,
    pub total_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ApproveDeploymentRequest {
    pub id: String,
    pub comment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ApproveDeploymentResponse {
    pub deployment: Deployment,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct RollbackDeploymentRequest {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct RollbackDeploymentResponse {
    pub deployment: Deployment,
    pub rollback_deployment: Deployment,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CancelDeploymentRequest {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CancelDeploymentResponse {
    pub deployment: Deployment,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetDeploymentStatusRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetDeploymentStatusResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollout: Option<RolloutProgress>,
    pub gate_results: Vec<QualityGateResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CreateQualityGateRequest {
    pub name: String,
    pub prompt_id: String,
    pub conditions: Vec<GateCondition>,
    pub required: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CreateQualityGateResponse {
    pub quality_gate: QualityGate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListQualityGatesRequest {
    pub prompt_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ListQualityGatesResponse {
    pub quality_gates: Vec<QualityGate>,
}

pub(crate) fn deployment_type_to_wire(type_: domain::DeploymentType) -> &'static str {
    match type_ {
        domain::DeploymentType::Unspecified => "DEPLOYMENT_TYPE_UNSPECIFIED",
        domain::DeploymentType::Immediate => "DEPLOYMENT_TYPE_IMMEDIATE",
        domain::DeploymentType::Gradual => "DEPLOYMENT_TYPE_GRADUAL",
        domain::DeploymentType::Canary => "DEPLOYMENT_TYPE_CANARY",
        domain::DeploymentType::BlueGreen => "DEPLOYMENT_TYPE_BLUE_GREEN",
    }
}

pub(crate) fn deployment_type_from_wire(value: &str) -> domain::DeploymentType {
    match value {
        "DEPLOYMENT_TYPE_IMMEDIATE" => domain::DeploymentType::Immediate,
        "DEPLOYMENT_TYPE_GRADUAL" => domain::DeploymentType::Gradual,
        "DEPLOYMENT_TYPE_CANARY" => domain::DeploymentType::Canary,
        "DEPLOYMENT_TYPE_BLUE_GREEN" => domain::DeploymentType::BlueGreen,
        _ => domain::DeploymentType::Unspecified,
    }
}

pub(crate) fn deployment_status_to_wire(status: domain::DeploymentStatus) -> &'static str {
    match status {
        domain::DeploymentStatus::Unspecified => "DEPLOYMENT_STATUS_UNSPECIFIED",
        domain::DeploymentStatus::PendingApproval => "DEPLOYMENT_STATUS_PENDING_APPROVAL",
        domain::DeploymentStatus::PendingGates => "DEPLOYMENT_STATUS_PENDING_GATES",
        domain::DeploymentStatus::GatesFailed => "DEPLOYMENT_STATUS_GATES_FAILED",
        domain::DeploymentStatus::InProgress => "DEPLOYMENT_STATUS_IN_PROGRESS",
        domain::DeploymentStatus::Completed => "DEPLOYMENT_STATUS_COMPLETED",
        domain::DeploymentStatus::RolledBack => "DEPLOYMENT_STATUS_ROLLED_BACK",
        domain::DeploymentStatus::Cancelled => "DEPLOYMENT_STATUS_CANCELLED",
        domain::DeploymentStatus::Failed => "DEPLOYMENT_STATUS_FAILED",
    }
}

pub(crate) fn deployment_status_from_wire(value: &str) -> domain::DeploymentStatus {
    match value {
        "DEPLOYMENT_STATUS_PENDING_APPROVAL" => domain::DeploymentStatus::PendingApproval,
        "DEPLOYMENT_STATUS_PENDING_GATES" => domain::DeploymentStatus::PendingGates,
        "DEPLOYMENT_STATUS_GATES_FAILED" => domain::DeploymentStatus::GatesFailed,
        "DEPLOYMENT_STATUS_IN_PROGRESS" => domain::DeploymentStatus::InProgress,
        "DEPLOYMENT_STATUS_COMPLETED" => domain::DeploymentStatus::Completed,
        "DEPLOYMENT_STATUS_ROLLED_BACK" => domain::DeploymentStatus::RolledBack,
        "DEPLOYMENT_STATUS_CANCELLED" => domain::DeploymentStatus::Cancelled,
        "DEPLOYMENT_STATUS_FAILED" => domain::DeploymentStatus::Failed,
        _ => domain::DeploymentStatus::Unspecified,
    }
}

pub(crate) fn strategy_to_wire(strategy: &domain::DeploymentStrategy) -> DeploymentStrategy {
    DeploymentStrategy {
        type_: deployment_type_to_wire(strategy.type_).to_string(),
        initial_percentage: strategy.initial_percentage,
        increment: strategy.increment,
        interval_seconds: strategy.interval_seconds,
        auto_rollback: strategy.auto_rollback,
        rollback_threshold: strategy.rollback_threshold,
    }
}

fn strategy_from_wire(strategy: DeploymentStrategy) -> domain::DeploymentStrategy {
    domain::DeploymentStrategy {
        type_: deployment_type_from_wire(&strategy.type_),
        initial_percentage: strategy.initial_percentage,
        increment: strategy.increment,
        interval_seconds: strategy.interval_seconds,
        auto_rollback: strategy.auto_rollback,
        rollback_threshold: strategy.rollback_threshold,
    }
}

pub(crate) fn rollout_from_wire(rollout: RolloutProgress) -> domain::RolloutProgress {
    domain::RolloutProgress {
        current_percentage: rollout.current_percentage,
        target_percentage: rollout.target_percentage,
        last_increment_at: rollout.last_increment_at,
        next_increment_at: rollout.next_increment_at,
    }
}

pub(crate) fn condition_to_wire(condition: &domain::GateCondition) -> GateCondition {
    GateCondition {
        type_: condition.type_.clone(),
        operator: condition.operator.clone(),
        threshold: condition.threshold,
        eval_run_id: condition.eval_run_id.clone(),
        dataset_id: condition.dataset_id.clone(),
    }
}

fn condition_from_wire(condition: GateCondition) -> domain::GateCondition {
    domain::GateCondition {
        type_: condition.type_,
        operator: condition.operator,
        threshold: condition.threshold,
        eval_run_id: condition.eval_run_id,
        dataset_id: condition.dataset_id,
    }
}

pub(crate) fn gate_result_from_wire(result: QualityGateResult) -> domain::QualityGateResult {
    domain::QualityGateResult {
        gate_id: result.gate_id,
        gate_name: result.gate_name,
        passed: result.passed,
        message: result.message,
        condition_results: result
            .condition_results
            .into_iter()
            .map(|c| domain::ConditionResult {
                type_: c.type_,
                expected: c.expected,
                actual: c.actual,
                passed: c.passed,
            })
            .collect(),
    }
}

pub(crate) fn gate_from_wire(gate: QualityGate) -> domain::QualityGate {
    domain::QualityGate {
        id: gate.id,
        name: gate.name,
        prompt_id: gate.prompt_id,
        conditions: gate.conditions.into_iter().map(condition_from_wire).collect(),
        required: gate.required,
        created_at: gate.created_at,
        created_by: gate.created_by,
    }
}

pub(crate) fn deployment_from_wire(deployment: Deployment) -> domain::Deployment {
    domain::Deployment {
        id: deployment.id,
        prompt_id: deployment.prompt_id,
        from_version: deployment.from_version,
        to_version: deployment.to_version,
        environment: deployment.environment,
        strategy: deployment.strategy.map(strategy_from_wire),
        status: deployment_status_from_wire(&deployment.status),
        status_message: deployment.status_message,
        gate_results: deployment
            .gate_results
            .into_iter()
            .map(gate_result_from_wire)
            .collect(),
        gates_passed: deployment.gates_passed,
        rollout: deployment.rollout.map(rollout_from_wire),
        created_at: deployment.created_at,
        started_at: deployment.started_at,
        completed_at: deployment.completed_at,
        created_by: deployment.created_by,
        approved_by: deployment.approved_by,
        metadata: deployment.metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_type_round_trips() {
        let types = [
            domain::DeploymentType::Unspecified,
            domain::DeploymentType::Immediate,
            domain::DeploymentType::Gradual,
            domain::DeploymentType::Canary,
            domain::DeploymentType::BlueGreen,
        ];
        for type_ in types {
            assert_eq!(
                deployment_type_from_wire(deployment_type_to_wire(type_)),
                type_
            );
        }
        assert_eq!(
            deployment_type_from_wire("DEPLOYMENT_TYPE_YOLO"),
            domain::DeploymentType::Unspecified
        );
    }

    #[test]
    fn deployment_status_round_trips() {
        let statuses = [
            domain::DeploymentStatus::Unspecified,
            domain::DeploymentStatus::PendingApproval,
            domain::DeploymentStatus::PendingGates,
            domain::DeploymentStatus::GatesFailed,
            domain::DeploymentStatus::InProgress,
            domain::DeploymentStatus::Completed,
            domain::DeploymentStatus::RolledBack,
            domain::DeploymentStatus::Cancelled,
            domain::DeploymentStatus::Failed,
        ];
        for status in statuses {
            assert_eq!(
                deployment_status_from_wire(deployment_status_to_wire(status)),
                status
            );
        }
        assert_eq!(
            deployment_status_from_wire("DEPLOYMENT_STATUS_PAUSED"),
            domain::DeploymentStatus::Unspecified
        );
    }

    #[test]
    fn deployment_decodes_optional_sections() {
        let deployment: Deployment = serde_json::from_str(
            r#"{"id":"dep_1","prompt_id":"prm_1","to_version":3,
                "status":"DEPLOYMENT_STATUS_IN_PROGRESS",
                "strategy":{"type":"DEPLOYMENT_TYPE_GRADUAL","increment":10},
                "rollout":{"current_percentage":30,"target_percentage":100}}"#,
        )
        .unwrap();
        let deployment = deployment_from_wire(deployment);

        assert_eq!(deployment.status, domain::DeploymentStatus::InProgress);
        assert!(deployment.is_active());
        let strategy = deployment.strategy.unwrap();
        assert_eq!(strategy.type_, domain::DeploymentType::Gradual);
        assert_eq!(strategy.increment, 10);
        let rollout = deployment.rollout.unwrap();
        assert_eq!(rollout.current_percentage, 30);
        assert!(rollout.last_increment_at.is_none());

        let bare: Deployment = serde_json::from_str(r#"{"id":"dep_2"}"#).unwrap();
        let bare = deployment_from_wire(bare);
        assert!(bare.strategy.is_none());
        assert!(bare.rollout.is_none());
        assert!(!bare.is_active());
        assert!(!bare.is_complete());
    }
}
