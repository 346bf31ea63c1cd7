//! Domain models for the Lattice platform services.
//!
//! Every type here is a plain value object: validated field sets, defaults,
//! and a handful of derived read-only properties. Nothing in this crate
//! talks to the network; the `client` crate converts these models to and
//! from the wire schema.

pub mod common;
pub mod datasets;
pub mod deploy;
pub mod eval;
pub mod observe;
pub mod prompt;
pub mod runtime;

// Re-export the types callers touch most often.
pub use common::{Metadata, Page, Payload};
pub use datasets::{Dataset, Example, ExampleInput, ExampleSource};
pub use deploy::{Deployment, DeploymentStatus, DeploymentStrategy, QualityGate};
pub use eval::{EvalRun, EvalRunStatus};
pub use observe::{Span, SpanKind, SpanStatus, Trace};
pub use prompt::{Prompt, PromptError, PromptVersion};
pub use runtime::{CompletionParams, CompletionResponse, Message};
