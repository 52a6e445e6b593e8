//! Best-effort identity suggestions for Git configuration.
//!
//! Suggestions come from the operating system's account records and may
//! legitimately be absent; callers must handle `None`.

use std::sync::LazyLock;

use regex::Regex;

use crate::shell::{CommandRunner, CommandSpec};

/// Source of suggested Git identity values.
pub trait IdentityHints {
    /// A suggested full name.
    fn suggest_name(&self) -> Option<String>;

    /// A suggested email address.
    fn suggest_email(&self) -> Option<String>;
}

/// Identity hints from macOS account sources.
///
/// Name lookup order: `id -F`, the directory service `RealName`
/// attribute, then the computer name. Email comes from the cached
/// Apple account list.
pub struct MacIdentityHints<'a> {
    runner: &'a dyn CommandRunner,
    user: Option<String>,
}

impl<'a> MacIdentityHints<'a> {
    /// Create hints for the current `$USER`.
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self::for_user(runner, std::env::var("USER").ok())
    }

    /// Create hints for an explicit account name.
    pub fn for_user(runner: &'a dyn CommandRunner, user: Option<String>) -> Self {
        Self { runner, user }
    }

    fn output(&self, spec: CommandSpec) -> Option<String> {
        let result = self.runner.capture(&spec).ok()?;
        result.success.then_some(result.stdout)
    }

    fn full_name(&self) -> Option<String> {
        let out = self.output(CommandSpec::new("id").arg("-F"))?;
        non_empty(out.lines().next()?)
    }

    fn directory_name(&self) -> Option<String> {
        let user = self.user.as_deref()?;
        let record = format!("/Users/{}", user);
        let out = self.output(
            CommandSpec::new("dscl").args([".", "-read", record.as_str(), "RealName"]),
        )?;
        parse_real_name(&out)
    }

    fn computer_name(&self) -> Option<String> {
        let out = self.output(CommandSpec::new("scutil").args(["--get", "ComputerName"]))?;
        parse_computer_name(out.lines().next()?)
    }
}

impl IdentityHints for MacIdentityHints<'_> {
    fn suggest_name(&self) -> Option<String> {
        self.full_name()
            .or_else(|| self.directory_name())
            .or_else(|| self.computer_name())
    }

    fn suggest_email(&self) -> Option<String> {
        let out = self.output(
            CommandSpec::new("defaults").args(["read", "MobileMeAccounts", "Accounts"]),
        )?;
        parse_account_email(&out)
    }
}

/// Fixed identity hints (tests, or hosts without account sources).
#[derive(Debug, Default, Clone)]
pub struct StaticIdentity {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl StaticIdentity {
    /// No hints at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Hints with the given values.
    pub fn new(name: Option<&str>, email: Option<&str>) -> Self {
        Self {
            name: name.map(String::from),
            email: email.map(String::from),
        }
    }
}

impl IdentityHints for StaticIdentity {
    fn suggest_name(&self) -> Option<String> {
        self.name.clone()
    }

    fn suggest_email(&self) -> Option<String> {
        self.email.clone()
    }
}

/// `RealName:` followed by the value, inline or indented on the next line.
static REAL_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^RealName:[ \t]*(?:\r?\n[ \t]+)?(\S.*)$")
        .expect("REAL_NAME_REGEX must compile")
});

/// Owner prefix of a default computer name ("Ada's MacBook Pro").
static COMPUTER_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)['’]s\s+(?:MacBook|iMac|Mac)").expect("COMPUTER_NAME_REGEX must compile")
});

/// First email-shaped `AccountID` in a MobileMeAccounts plist dump.
static ACCOUNT_EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"AccountID\s*=\s*"?([^";\s]+@[^";\s]+)"?"#)
        .expect("ACCOUNT_EMAIL_REGEX must compile")
});

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Extract the name from `dscl . -read /Users/<u> RealName` output.
///
/// dscl prints either `RealName: Ada Lovelace` or, for values with
/// spaces, the value indented on the following line.
pub fn parse_real_name(output: &str) -> Option<String> {
    let caps = REAL_NAME_REGEX.captures(output)?;
    non_empty(caps.get(1)?.as_str())
}

/// Turn a computer name like "Ada's MacBook Pro" into "Ada".
pub fn parse_computer_name(name: &str) -> Option<String> {
    match COMPUTER_NAME_REGEX.captures(name.trim()) {
        Some(caps) => non_empty(caps.get(1)?.as_str()),
        None => non_empty(name),
    }
}

/// Find the first account email in `defaults read MobileMeAccounts Accounts`.
pub fn parse_account_email(output: &str) -> Option<String> {
    let caps = ACCOUNT_EMAIL_REGEX.captures(output)?;
    non_empty(caps.get(1)?.as_str())
}
