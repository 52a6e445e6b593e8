//! Homebrew formula batch.

use crate::error::Result;
use crate::requirements::PackageKind;
use crate::shell::CommandSpec;
use crate::ui::UserInterface;

use super::{InstallStep, StepContext, StepOutcome};

const NAME: &str = "CLI packages";

/// Installs each configured formula that Homebrew does not already list.
///
/// Every failed package counts as one failure. In fail-fast mode the batch
/// stops at the first failure.
pub struct PackageBatch;

impl InstallStep for PackageBatch {
    fn name(&self) -> &'static str {
        NAME
    }

    fn run(&self, ctx: &StepContext<'_>, ui: &mut dyn UserInterface) -> Result<StepOutcome> {
        let brew = ctx.host.brew_bin();
        let mut installed = Vec::new();
        let mut failed = Vec::new();
        let mut present = 0;

        for package in &ctx.settings.packages {
            if ctx
                .presence
                .package_installed(&brew, package, PackageKind::Formula)
            {
                ui.success(&format!("{} already installed", package));
                present += 1;
                continue;
            }

            let spec = CommandSpec::new(brew.display().to_string())
                .args(["install", package.as_str()]);
            let ok = match ctx.execute(ui, &spec) {
                Ok(result) => result.success,
                Err(e) => {
                    tracing::warn!("{} could not run: {}", spec.display(), e);
                    false
                }
            };

            if ok {
                ui.success(&format!("{} installed", package));
                installed.push(package.as_str());
            } else {
                ui.error(&format!("{} failed to install", package));
                failed.push(package.as_str());
                if ctx.mode.aborts_on_failure() {
                    break;
                }
            }
        }

        if !failed.is_empty() {
            return Ok(StepOutcome::partial(
                NAME,
                failed.len(),
                format!("failed: {}", failed.join(", ")),
            ));
        }
        if installed.is_empty() {
            return Ok(StepOutcome::present(
                NAME,
                format!("{} already installed", present),
            ));
        }
        Ok(StepOutcome::completed(
            NAME,
            format!("installed: {}", installed.join(", ")),
        ))
    }
}
