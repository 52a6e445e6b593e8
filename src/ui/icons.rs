//! Status vocabulary shared by step output, the summary table and the
//! verification report.

use super::theme::KitupTheme;

/// Canonical status kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Completed successfully.
    Success,
    /// Failed.
    Failed,
    /// Skipped (declined or not reached).
    Skipped,
}

impl StatusKind {
    /// Unicode icon for TTY output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Failed => "✗",
            Self::Skipped => "○",
        }
    }

    /// Styled icon string using the given theme.
    pub fn styled(self, theme: &KitupTheme) -> String {
        let icon = self.icon();
        match self {
            Self::Success => theme.success.apply_to(icon).to_string(),
            Self::Failed => theme.error.apply_to(icon).to_string(),
            Self::Skipped => theme.dim.apply_to(icon).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_returns_unicode_symbols() {
        assert_eq!(StatusKind::Success.icon(), "✓");
        assert_eq!(StatusKind::Failed.icon(), "✗");
        assert_eq!(StatusKind::Skipped.icon(), "○");
    }

    #[test]
    fn plain_theme_styles_to_bare_icon() {
        let theme = KitupTheme::plain();
        assert_eq!(StatusKind::Failed.styled(&theme), "✗");
    }
}
