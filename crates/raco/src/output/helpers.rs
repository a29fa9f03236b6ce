//! Common helper functions for output formatting.

use owo_colors::OwoColorize;
use ra_filter_rs::ParseDiagnostic;

/// Truncates a string to a maximum length.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        s.to_string()
    }
}

/// Prints parser diagnostics as warnings on stderr.
///
/// Diagnostics are advisory: the affected clause was dropped or passes
/// everything, so the command still runs.
pub fn warn_diagnostics(diagnostics: &[ParseDiagnostic], use_colors: bool) {
    for diagnostic in diagnostics {
        if use_colors {
            eprintln!("{} {diagnostic}", "warning:".yellow().bold());
        } else {
            eprintln!("warning: {diagnostic}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_str("techno", 10), "techno");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate_str("a very long event title", 10), "a very ...");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        // Multi-byte characters must not be split.
        assert_eq!(truncate_str("Köln Öffentlich Ünd", 10), "Köln Öf...");
    }
}
