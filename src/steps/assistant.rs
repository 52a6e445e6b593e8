//! Claude Code assistant CLI.

use crate::error::Result;
use crate::shell::{CommandSpec, LineStatus};
use crate::ui::UserInterface;

use super::{InstallStep, StepContext, StepOutcome};

const NAME: &str = "Claude Code";

/// Runs the assistant's install script on every run and puts its bin
/// directory on PATH.
///
/// The upstream installer is idempotent and also upgrades, so there is no
/// presence check.
pub struct AssistantCli;

impl InstallStep for AssistantCli {
    fn name(&self) -> &'static str {
        NAME
    }

    fn run(&self, ctx: &StepContext<'_>, ui: &mut dyn UserInterface) -> Result<StepOutcome> {
        let url = &ctx.settings.assistant.install_url;
        let script = ctx.fetch_script(ui, url)?;
        let spec = CommandSpec::new("bash")
            .stdin(script)
            .described_as(format!("curl -fsSL {} | bash", url));

        let result = ctx.execute(ui, &spec)?;
        if !result.success {
            ui.error("Claude Code installer failed");
            return Ok(StepOutcome::failed(
                NAME,
                format!("installer exited with {:?}", result.exit_code),
            ));
        }
        ui.success("Claude Code installed");

        let line = ctx.host.assistant_path_line();
        let detail = match ctx.ensure_startup_line(ui, &line)? {
            LineStatus::Appended => {
                ui.message(&format!(
                    "  Added {} to PATH in {}",
                    ctx.host.assistant_bin_dir().display(),
                    ctx.startup.path().display()
                ));
                "installed, PATH entry added"
            }
            LineStatus::AlreadyPresent => "installed, PATH entry present",
        };

        Ok(StepOutcome::completed(NAME, detail))
    }
}
