//! The install steps, in the order they run.
//!
//! Every step follows the same pattern: probe, skip if present, act
//! otherwise, and describe the result as a [`StepOutcome`]. Steps return
//! `Err` only for unexpected conditions; the runner converts those into
//! failed outcomes as well, so nothing a step does can abort the process.
//!
//! # Example
//!
//! ```
//! use kitup::steps::standard_steps;
//!
//! let names: Vec<_> = standard_steps().iter().map(|s| s.name()).collect();
//! assert_eq!(names[0], "Command Line Tools");
//! assert_eq!(names.len(), 7);
//! ```

pub mod assistant;
pub mod clt;
pub mod context;
pub mod editor;
pub mod git_identity;
pub mod outcome;
pub mod package_manager;
pub mod packages;
pub mod path_fixup;

#[cfg(test)]
pub(crate) mod testing;

pub use assistant::AssistantCli;
pub use clt::CommandLineTools;
pub use context::StepContext;
pub use editor::EditorApp;
pub use git_identity::GitIdentity;
pub use outcome::{StepOutcome, StepStatus};
pub use package_manager::PackageManager;
pub use packages::PackageBatch;
pub use path_fixup::PathFixup;

use crate::error::Result;
use crate::ui::UserInterface;

/// One check-then-act provisioning step.
pub trait InstallStep {
    /// Display name used in progress output and the summary table.
    fn name(&self) -> &'static str;

    /// Probe, act if needed, and report what happened.
    fn run(&self, ctx: &StepContext<'_>, ui: &mut dyn UserInterface) -> Result<StepOutcome>;
}

/// The seven provisioning steps in execution order.
pub fn standard_steps() -> Vec<Box<dyn InstallStep>> {
    vec![
        Box::new(CommandLineTools),
        Box::new(PackageManager),
        Box::new(PackageBatch),
        Box::new(EditorApp),
        Box::new(AssistantCli),
        Box::new(GitIdentity),
        Box::new(PathFixup),
    ]
}
