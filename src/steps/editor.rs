//! Visual Studio Code.

use crate::error::Result;
use crate::requirements::PackageKind;
use crate::shell::CommandSpec;
use crate::ui::UserInterface;

use super::{InstallStep, StepContext, StepOutcome};

const NAME: &str = "Visual Studio Code";

/// Installs the editor as a Homebrew cask.
///
/// The editor counts as present when either its application bundle exists
/// or its launcher resolves on the search path. Homebrew's cask database
/// only decides between a fresh install and a reinstall: a cask that
/// Homebrew lists but whose app is gone needs `reinstall`, which the
/// operator must confirm.
pub struct EditorApp;

impl InstallStep for EditorApp {
    fn name(&self) -> &'static str {
        NAME
    }

    fn run(&self, ctx: &StepContext<'_>, ui: &mut dyn UserInterface) -> Result<StepOutcome> {
        let editor = &ctx.settings.editor;

        if ctx.presence.path_exists(&editor.app_path) || ctx.presence.exists(&editor.command) {
            ui.success("Visual Studio Code already installed");
            return Ok(StepOutcome::present(NAME, "already installed"));
        }

        let brew = ctx.host.brew_bin();
        let listed = ctx
            .presence
            .package_installed(&brew, &editor.cask, PackageKind::Cask);

        let verb = if listed {
            ui.warning(&format!(
                "Homebrew lists {} as installed, but {} is missing",
                editor.cask,
                editor.app_path.display()
            ));
            let reinstall = ui.confirm(
                "reinstall_editor",
                "Reinstall Visual Studio Code with Homebrew?",
                true,
            )?;
            if !reinstall {
                ui.message("  Skipping Visual Studio Code");
                return Ok(StepOutcome::skipped(NAME, "reinstall declined"));
            }
            "reinstall"
        } else {
            "install"
        };

        let spec = CommandSpec::new(brew.display().to_string())
            .args([verb, "--cask", editor.cask.as_str()]);
        let result = match ctx.execute(ui, &spec) {
            Ok(result) => result,
            Err(e) => {
                ui.error(&format!("Could not run {}", spec.display()));
                return Ok(StepOutcome::failed(NAME, e.to_string()));
            }
        };

        if result.success {
            ui.success(&format!("Visual Studio Code {}ed", verb));
            Ok(StepOutcome::completed(NAME, format!("{}ed", verb)))
        } else {
            ui.error(&format!("brew {} --cask {} failed", verb, editor.cask));
            Ok(StepOutcome::failed(
                NAME,
                format!("brew {} exited with {:?}", verb, result.exit_code),
            ))
        }
    }
}
