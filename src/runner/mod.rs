//! Run orchestration: steps, then verification, then the report.

pub mod provision;
pub mod report;
pub mod verify;
pub mod workflow;

pub use provision::{provision, ProvisionResult};
pub use report::{banner, print_report, tilde_path, Banner};
pub use verify::{catalog, ToolCheck, ToolLocation, ToolSpec, VerificationReport, Verifier};
pub use workflow::{RunReport, WorkflowRunner};
