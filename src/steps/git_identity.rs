//! Global Git author identity.

use crate::error::{KitupError, Result};
use crate::git::{USER_EMAIL, USER_NAME};
use crate::ui::UserInterface;

use super::{InstallStep, StepContext, StepOutcome};

const NAME: &str = "Git identity";

/// Makes sure `user.name` and `user.email` are set globally.
///
/// An existing identity is kept unless the operator asks to reconfigure.
/// Otherwise the operator is prompted, with defaults taken from the
/// current values, then OS identity hints, then (email only) the
/// configured placeholder.
pub struct GitIdentity;

impl GitIdentity {
    fn ask_name(ui: &mut dyn UserInterface, default: Option<&str>) -> Result<String> {
        loop {
            let answer = ui.input("git_name", "Your full name for Git commits", default)?;
            let answer = answer.trim();
            if !answer.is_empty() {
                return Ok(answer.to_string());
            }
            if let Some(default) = default.filter(|d| !d.trim().is_empty()) {
                return Ok(default.trim().to_string());
            }
            if !ui.is_interactive() {
                return Err(KitupError::PromptUnavailable {
                    key: "git_name".to_string(),
                    message: "a name is required".to_string(),
                });
            }
            ui.warning("Name cannot be empty");
        }
    }

    fn ask_email(ui: &mut dyn UserInterface, default: &str) -> Result<String> {
        let answer = ui.input("git_email", "Your email for Git commits", Some(default))?;
        let answer = answer.trim();
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer.to_string()
        })
    }
}

impl InstallStep for GitIdentity {
    fn name(&self) -> &'static str {
        NAME
    }

    fn run(&self, ctx: &StepContext<'_>, ui: &mut dyn UserInterface) -> Result<StepOutcome> {
        let current_name = ctx.git.get(USER_NAME);
        let current_email = ctx.git.get(USER_EMAIL);

        if let (Some(name), Some(email)) = (&current_name, &current_email) {
            ui.message(&format!("  Git identity: {} <{}>", name, email));
            if !ui.confirm("reconfigure_git", "Reconfigure Git identity?", false)? {
                return Ok(StepOutcome::present(NAME, format!("{} <{}>", name, email)));
            }
        }

        let name_default = current_name.or_else(|| ctx.identity.suggest_name());
        let email_default = current_email
            .or_else(|| ctx.identity.suggest_email())
            .unwrap_or_else(|| ctx.settings.git.placeholder_email.clone());
        tracing::debug!(
            "Git identity defaults: name={:?} email={}",
            name_default,
            email_default
        );

        let name = Self::ask_name(ui, name_default.as_deref())?;
        let email = Self::ask_email(ui, &email_default)?;

        ctx.set_git(ui, USER_NAME, &name)?;
        ctx.set_git(ui, USER_EMAIL, &email)?;

        if email == ctx.settings.git.placeholder_email {
            ui.warning(&format!(
                "Using placeholder email {}; update it with: git config --global user.email <you>",
                email
            ));
        }
        ui.success(&format!("Git identity set to {} <{}>", name, email));
        Ok(StepOutcome::completed(NAME, format!("{} <{}>", name, email)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{GitConfig, MemoryGitConfig};
    use crate::identity::StaticIdentity;
    use crate::steps::testing::Fixture;
    use crate::steps::StepStatus;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn existing_identity_kept_when_declined() {
        let temp = TempDir::new().unwrap();
        let mut fx = Fixture::new(temp.path());
        fx.git = MemoryGitConfig::new()
            .with(USER_NAME, "Ada Lovelace")
            .with(USER_EMAIL, "ada@example.org");
        let mut ui = MockUI::new();

        let outcome = GitIdentity.run(&fx.ctx(false), &mut ui).unwrap();

        assert_eq!(outcome.status, StepStatus::AlreadyPresent);
        assert_eq!(ui.prompts_shown(), &["reconfigure_git"]);
        assert_eq!(fx.git.writes(), 0);
        assert_eq!(fx.git.get(USER_NAME).as_deref(), Some("Ada Lovelace"));
        assert_eq!(fx.git.get(USER_EMAIL).as_deref(), Some("ada@example.org"));
    }

    #[test]
    fn reconfigure_offers_current_values() {
        let temp = TempDir::new().unwrap();
        let mut fx = Fixture::new(temp.path());
        fx.git = MemoryGitConfig::new()
            .with(USER_NAME, "Ada Lovelace")
            .with(USER_EMAIL, "ada@example.org");
        let mut ui = MockUI::new();
        ui.set_prompt_response("reconfigure_git", "yes");
        ui.set_prompt_response("git_email", "ada@work.example");

        GitIdentity.run(&fx.ctx(false), &mut ui).unwrap();

        assert_eq!(fx.git.get(USER_NAME).as_deref(), Some("Ada Lovelace"));
        assert_eq!(fx.git.get(USER_EMAIL).as_deref(), Some("ada@work.example"));
    }

    #[test]
    fn hints_and_placeholder_are_defaults() {
        let temp = TempDir::new().unwrap();
        let mut fx = Fixture::new(temp.path());
        fx.identity = StaticIdentity::new(Some("Grace Hopper"), None);
        let mut ui = MockUI::new();

        let outcome = GitIdentity.run(&fx.ctx(false), &mut ui).unwrap();

        assert_eq!(outcome.status, StepStatus::Completed);
        assert_eq!(fx.git.get(USER_NAME).as_deref(), Some("Grace Hopper"));
        assert_eq!(fx.git.get(USER_EMAIL).as_deref(), Some("you@example.com"));
        assert!(ui.has_warning("placeholder email"));
    }

    #[test]
    fn email_hint_is_preferred_over_placeholder() {
        let temp = TempDir::new().unwrap();
        let mut fx = Fixture::new(temp.path());
        fx.identity = StaticIdentity::new(Some("Grace"), Some("grace@icloud.com"));
        let mut ui = MockUI::new();

        GitIdentity.run(&fx.ctx(false), &mut ui).unwrap();

        assert_eq!(fx.git.get(USER_EMAIL).as_deref(), Some("grace@icloud.com"));
        assert!(ui.warnings().is_empty());
    }

    #[test]
    fn name_prompt_repeats_until_non_empty() {
        let temp = TempDir::new().unwrap();
        let fx = Fixture::new(temp.path());
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("git_name", vec!["", "  ", "Alan Turing"]);

        GitIdentity.run(&fx.ctx(false), &mut ui).unwrap();

        let asked = ui
            .prompts_shown()
            .iter()
            .filter(|k| k.as_str() == "git_name")
            .count();
        assert_eq!(asked, 3);
        assert_eq!(fx.git.get(USER_NAME).as_deref(), Some("Alan Turing"));
    }

    #[test]
    fn non_interactive_without_name_fails() {
        let temp = TempDir::new().unwrap();
        let fx = Fixture::new(temp.path());
        let mut ui = MockUI::new();
        ui.set_interactive(false);

        let result = GitIdentity.run(&fx.ctx(false), &mut ui);

        assert!(matches!(result, Err(KitupError::PromptUnavailable { .. })));
        assert_eq!(fx.git.writes(), 0);
    }

    #[test]
    fn interactive_without_any_name_gives_up_eventually() {
        let temp = TempDir::new().unwrap();
        let fx = Fixture::new(temp.path());
        let mut ui = MockUI::new();

        let result = GitIdentity.run(&fx.ctx(false), &mut ui);

        assert!(matches!(result, Err(KitupError::PromptUnavailable { .. })));
        assert!(ui.has_warning("Name cannot be empty"));
        assert_eq!(fx.git.writes(), 0);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let mut fx = Fixture::new(temp.path());
        fx.identity = StaticIdentity::new(Some("Grace Hopper"), None);
        let mut ui = MockUI::new();

        GitIdentity.run(&fx.ctx(true), &mut ui).unwrap();

        assert_eq!(fx.git.writes(), 0);
        assert!(ui.has_message("Would run: git config --global user.name Grace Hopper"));
    }
}
