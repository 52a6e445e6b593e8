//! Xcode Command Line Tools.

use crate::error::Result;
use crate::shell::CommandSpec;
use crate::ui::UserInterface;

use super::{InstallStep, StepContext, StepOutcome};

const NAME: &str = "Command Line Tools";

/// Installs the Xcode Command Line Tools through Apple's GUI installer.
///
/// `xcode-select --install` only opens a dialog and returns, so the step
/// waits for the operator to confirm the installer finished before
/// checking again.
pub struct CommandLineTools;

/// Exits 0 once the tools are installed.
pub fn probe_command() -> CommandSpec {
    CommandSpec::new("xcode-select").arg("-p")
}

fn installed(ctx: &StepContext<'_>) -> bool {
    match ctx.runner.capture(&probe_command()) {
        Ok(result) => result.success,
        Err(e) => {
            tracing::debug!("xcode-select probe failed: {}", e);
            false
        }
    }
}

impl InstallStep for CommandLineTools {
    fn name(&self) -> &'static str {
        NAME
    }

    fn run(&self, ctx: &StepContext<'_>, ui: &mut dyn UserInterface) -> Result<StepOutcome> {
        if installed(ctx) {
            ui.success("Command Line Tools already installed");
            return Ok(StepOutcome::present(NAME, "already installed"));
        }

        let install = CommandSpec::new("xcode-select").arg("--install");
        let result = ctx.execute(ui, &install)?;
        if !result.success {
            tracing::warn!(
                "xcode-select --install exited with {:?}; waiting for the installer anyway",
                result.exit_code
            );
        }

        if ctx.dry_run {
            return Ok(StepOutcome::completed(NAME, "would install"));
        }

        ui.input(
            "clt_installed",
            "Press Enter when the Command Line Tools installer has finished",
            Some(""),
        )?;

        if installed(ctx) {
            ui.success("Command Line Tools installed");
            Ok(StepOutcome::completed(NAME, "installed"))
        } else {
            ui.error("Command Line Tools still not detected (xcode-select -p failed)");
            Ok(StepOutcome::failed(NAME, "still not detected after install"))
        }
    }
}
