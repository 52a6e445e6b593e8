//! Homebrew bootstrap.

use crate::error::Result;
use crate::shell::{CommandSpec, LineStatus};
use crate::ui::UserInterface;

use super::{InstallStep, StepContext, StepOutcome};

const NAME: &str = "Homebrew";

/// Installs Homebrew from its official install script and makes sure new
/// shells activate it.
///
/// Later steps never rely on the activation line; they call `brew` by the
/// absolute path from [`HostEnvironment::brew_bin`](crate::environment::HostEnvironment::brew_bin).
pub struct PackageManager;

impl InstallStep for PackageManager {
    fn name(&self) -> &'static str {
        NAME
    }

    fn run(&self, ctx: &StepContext<'_>, ui: &mut dyn UserInterface) -> Result<StepOutcome> {
        let brew = ctx.host.brew_bin();
        let present = ctx.presence.exists("brew") || ctx.presence.path_exists(&brew);

        if present {
            ui.success("Homebrew already installed");
        } else {
            let script = ctx.fetch_script(ui, &ctx.settings.package_manager.install_url)?;
            let mut spec = CommandSpec::new("/bin/bash")
                .arg("-c")
                .arg(script)
                .described_as(format!(
                    "/bin/bash -c \"$(curl -fsSL {})\"",
                    ctx.settings.package_manager.install_url
                ));
            if !ui.is_interactive() {
                spec = spec.env("NONINTERACTIVE", "1");
            }

            let result = ctx.execute(ui, &spec)?;
            if !result.success {
                ui.error("Homebrew install script failed");
                return Ok(StepOutcome::failed(
                    NAME,
                    format!("install script exited with {:?}", result.exit_code),
                ));
            }
            ui.success(&format!("Homebrew installed at {}", ctx.host.brew_prefix.display()));
        }

        let line = ctx.host.brew_activation_line();
        let activation = match ctx.ensure_startup_line(ui, &line)? {
            LineStatus::Appended => {
                ui.message(&format!(
                    "  Added Homebrew to {}",
                    ctx.startup.path().display()
                ));
                "activation added"
            }
            LineStatus::AlreadyPresent => "activation present",
        };

        Ok(if present {
            StepOutcome::present(NAME, format!("already installed, {}", activation))
        } else {
            StepOutcome::completed(NAME, format!("installed, {}", activation))
        })
    }
}
