//! Client for the deploy service.

use config::ServiceEndpoint;
use models::common::{Metadata, Page};
use models::deploy::{
    Deployment, DeploymentStatus, DeploymentStrategy, GateCondition, QualityGate,
    QualityGateResult, RolloutProgress,
};

use crate::channel::{Channel, ClientSettings};
use crate::error::Result;
use crate::wire::deploy as wire;

const SERVICE: &str = "lattice.deploy.v1.DeployService";

/// Options for [`DeployClient::create`].
#[derive(Debug, Clone)]
pub struct CreateDeploymentOptions {
    pub environment: String,
    pub strategy: Option<DeploymentStrategy>,
    pub skip_approval: bool,
    pub metadata: Metadata,
}

impl Default for CreateDeploymentOptions {
    fn default() -> Self {
        Self {
            environment: "production".to_string(),
            strategy: None,
            skip_approval: false,
            metadata: Metadata::new(),
        }
    }
}

/// Filters for [`DeployClient::list`].
#[derive(Debug, Clone)]
pub struct ListDeploymentsOptions {
    pub prompt_id: String,
    pub environment: String,
    pub status: DeploymentStatus,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ListDeploymentsOptions {
    fn default() -> Self {
        Self {
            prompt_id: String::new(),
            environment: String::new(),
            status: DeploymentStatus::Unspecified,
            limit: 100,
            offset: 0,
        }
    }
}

/// Options for [`DeployClient::create_quality_gate`].
#[derive(Debug, Clone)]
pub struct CreateQualityGateOptions {
    pub conditions: Vec<GateCondition>,
    pub required: bool,
}

impl Default for CreateQualityGateOptions {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
            required: true,
        }
    }
}

/// Outcome of a rollback: the deployment that was rolled back and the new
/// deployment created to carry the rollback.
#[derive(Debug, Clone)]
pub struct RollbackResult {
    pub deployment: Deployment,
    pub rollback: Deployment,
}

/// Point-in-time view of a deployment's progress.
#[derive(Debug, Clone)]
pub struct DeploymentStatusInfo {
    pub status: DeploymentStatus,
    pub rollout: Option<RolloutProgress>,
    pub gate_results: Vec<QualityGateResult>,
}

/// Client for the deploy service.
pub struct DeployClient {
    channel: Channel,
}

impl DeployClient {
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

    /// Create a new deployment of a prompt version.
    pub async fn create(
        &self,
        prompt_id: &str,
        to_version: u32,
        options: CreateDeploymentOptions,
    ) -> Result<Deployment> {
        let request = wire::CreateDeploymentRequest {
            prompt_id: prompt_id.to_string(),
            to_version,
            environment: options.environment,
            strategy: options.strategy.as_ref().map(wire::strategy_to_wire),
            skip_approval: options.skip_approval,
            metadata: options.metadata,
        };
        let response: wire::CreateDeploymentResponse = self
            .channel
            .unary(&format!("{SERVICE}/CreateDeployment"), &request)
            .await?;
        Ok(wire::deployment_from_wire(response.deployment))
    }

    /// Get a deployment by id, or `None` if it does not exist.
    pub async fn get(&self, id: &str) -> Result<Option<Deployment>> {
        let request = wire::GetDeploymentRequest { id: id.to_string() };
        let result: Result<wire::GetDeploymentResponse> = self
            .channel
            .unary(&format!("{SERVICE}/GetDeployment"), &request)
            .await;
        match result {
            Ok(response) => Ok(Some(wire::deployment_from_wire(response.deployment))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// List deployments, one page at a time.
    pub async fn list(&self, options: ListDeploymentsOptions) -> Result<Page<Deployment>> {
        let request = wire::ListDeploymentsRequest {
            prompt_id: options.prompt_id,
            environment: options.environment,
            status: wire::deployment_status_to_wire(options.status).to_string(),
            limit: options.limit,
            offset: options.offset,
        };
        let response: wire::ListDeploymentsResponse = self
            .channel
            .unary(&format!("{SERVICE}/ListDeployments"), &request)
            .await?;
        Ok(Page {
            items: response
                .deployments
                .into_iter()
                .map(wire::deployment_from_wire)
                .collect(),
            total_count: response.total_count,
            limit: options.limit,
            offset: options.offset,
        })
    }

    /// Approve a deployment that is pending approval.
    pub async fn approve(&self, id: &str, comment: &str) -> Result<Deployment> {
        let request = wire::ApproveDeploymentRequest {
            id: id.to_string(),
            comment: comment.to_string(),
        };
        let response: wire::ApproveDeploymentResponse = self
            .channel
            .unary(&format!("{SERVICE}/ApproveDeployment"), &request)
            .await?;
        Ok(wire::deployment_from_wire(response.deployment))
    }

    /// Roll back a deployment. Returns both the rolled-back deployment and
    /// the new deployment the service created to carry the rollback.
    pub async fn rollback(&self, id: &str, reason: &str) -> Result<RollbackResult> {
        let request = wire::RollbackDeploymentRequest {
            id: id.to_string(),
            reason: reason.to_string(),
        };
        let response: wire::RollbackDeploymentResponse = self
            .channel
            .unary(&format!("{SERVICE}/RollbackDeployment"), &request)
            .await?;
        Ok(RollbackResult {
            deployment: wire::deployment_from_wire(response.deployment),
            rollback: wire::deployment_from_wire(response.rollback_deployment),
        })
    }

    /// Cancel a pending or in-progress deployment.
    pub async fn cancel(&self, id: &str, reason: &str) -> Result<Deployment> {
        let request = wire::CancelDeploymentRequest {
            id: id.to_string(),
            reason: reason.to_string(),
        };
        let response: wire::CancelDeploymentResponse = self
            .channel
            .unary(&format!("{SERVICE}/CancelDeployment"), &request)
            .await?;
        Ok(wire::deployment_from_wire(response.deployment))
    }

    /// Real-time deployment status: current state, rollout progress, and
    /// gate results.
    pub async fn get_status(&self, id: &str) -> Result<DeploymentStatusInfo> {
        let request = wire::GetDeploymentStatusRequest { id: id.to_string() };
        let response: wire::GetDeploymentStatusResponse = self
            .channel
            .unary(&format!("{SERVICE}/GetDeploymentStatus"), &request)
            .await?;
        Ok(DeploymentStatusInfo {
            status: wire::deployment_status_from_wire(&response.status),
            rollout: response.rollout.map(wire::rollout_from_wire),
            gate_results: response
                .gate_results
                .into_iter()
                .map(wire::gate_result_from_wire)
                .collect(),
        })
    }

    /// Create a quality gate for a prompt.
    pub async fn create_quality_gate(
        &self,
        name: impl Into<String>,
        prompt_id: &str,
        options: CreateQualityGateOptions,
    ) -> Result<QualityGate> {
        let request = wire::CreateQualityGateRequest {
            name: name.into(),
            prompt_id: prompt_id.to_string(),
            conditions: options.conditions.iter().map(wire::condition_to_wire).collect(),
            required: options.required,
        };
        let response: wire::CreateQualityGateResponse = self
            .channel
            .unary(&format!("{SERVICE}/CreateQualityGate"), &request)
            .await?;
        Ok(wire::gate_from_wire(response.quality_gate))
    }

    /// List the quality gates configured for a prompt.
    pub async fn list_quality_gates(&self, prompt_id: &str) -> Result<Vec<QualityGate>> {
        let request = wire::ListQualityGatesRequest {
            prompt_id: prompt_id.to_string(),
        };
        let response: wire::ListQualityGatesResponse = self
            .channel
            .unary(&format!("{SERVICE}/ListQualityGates"), &request)
            .await?;
        Ok(response
            .quality_gates
            .into_iter()
            .map(wire::gate_from_wire)
            .collect())
    }
}
