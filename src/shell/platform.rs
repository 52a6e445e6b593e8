//! Platform checks.

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()`.
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running as root.
///
/// Homebrew refuses to install as root, so the run command warns early.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    {
        false
    }
}

/// Whether the host is macOS, the only platform the installers support.
pub fn is_macos() -> bool {
    cfg!(target_os = "macos")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_ci_does_not_panic() {
        let _ = is_ci();
    }

    #[test]
    fn is_elevated_does_not_panic() {
        let _ = is_elevated();
    }

    #[test]
    fn is_macos_matches_target() {
        assert_eq!(is_macos(), std::env::consts::OS == "macos");
    }
}
