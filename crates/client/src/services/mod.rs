//! One client per Lattice service.

mod datasets;
mod deploy;
mod eval;
mod observe;
mod prompt;
mod runtime;

pub use datasets::{
    AddedExamples, CreateDatasetOptions, DatasetsClient, GeneratedExamples, GetExamplesOptions,
    ListDatasetsOptions, UpdateDatasetOptions,
};
pub use deploy::{
    CreateDeploymentOptions, CreateQualityGateOptions, DeployClient, DeploymentStatusInfo,
    ListDeploymentsOptions, RollbackResult,
};
pub use eval::{
    CreateEvalRunOptions, EvalClient, GetEvalResultsOptions, ListEvalRunsOptions,
    RunComparisonResult,
};
pub use observe::{ObserveClient, QueryMetricsOptions, QueryTracesOptions};
pub use prompt::{CreatePromptOptions, ListPromptsOptions, PromptClient, UpdatePromptOptions};
pub use runtime::{CompletionStream, EmbedOptions, RuntimeClient};
