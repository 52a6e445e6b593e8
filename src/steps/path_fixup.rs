//! Final PATH safety net.

use crate::error::Result;
use crate::shell::LineStatus;
use crate::ui::UserInterface;

use super::{InstallStep, StepContext, StepOutcome};

const NAME: &str = "PATH fixup";

/// Ensures the assistant bin directory export is in the startup file even
/// when the assistant step failed before adding it.
pub struct PathFixup;

impl InstallStep for PathFixup {
    fn name(&self) -> &'static str {
        NAME
    }

    fn run(&self, ctx: &StepContext<'_>, ui: &mut dyn UserInterface) -> Result<StepOutcome> {
        let line = ctx.host.assistant_path_line();
        match ctx.ensure_startup_line(ui, &line)? {
            LineStatus::Appended => {
                ui.success(&format!("Added PATH entry to {}", ctx.startup.path().display()));
                Ok(StepOutcome::completed(NAME, "PATH entry added"))
            }
            LineStatus::AlreadyPresent => {
                ui.success("PATH already configured");
                Ok(StepOutcome::present(NAME, "PATH entry present"))
            }
        }
    }
}
