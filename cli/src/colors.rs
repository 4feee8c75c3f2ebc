//! Semantic color helpers for consistent CLI output.
//!
//! Colors are semantic - they convey meaning rather than just decoration.

use colored::{ColoredString, Colorize};

/// Semantic color helpers for consistent CLI output.
///
/// # Color Scheme
///
/// | Element | Color | Usage |
/// |---------|-------|-------|
/// | Approved | Green | Approval and OK markers |
/// | Error | Red | Error messages, declines |
/// | Warning | Yellow | Live mode, warnings |
/// | Info | Cyan | Hints, section titles |
/// | Token | Magenta | Authorization tokens |
/// | Path | Blue | File paths |
/// | Key | White+Bold | Labels, config keys |
/// | Dim | Dimmed | Secondary info, raw fields |
pub struct Colors;

impl Colors {
    // === Status Colors ===

    /// Red - for error messages and declines
    pub fn error(s: &str) -> ColoredString {
        s.red()
    }

    /// Yellow - for warnings and live-mode notices
    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Cyan - for informational messages and hints
    pub fn info(s: &str) -> ColoredString {
        s.cyan()
    }

    // === Semantic Colors ===

    /// Blue - for file and directory paths
    pub fn path(s: &str) -> ColoredString {
        s.blue()
    }

    /// Magenta - for authorization tokens and processor ids
    pub fn token(s: &str) -> ColoredString {
        s.magenta()
    }

    /// White+Bold - for labels and config keys
    pub fn key(s: &str) -> ColoredString {
        s.white().bold()
    }

    /// Dimmed - for less important/secondary information
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    // === Status Markers ===

    /// Green [APPROVED] marker
    pub fn approved_marker() -> ColoredString {
        "[APPROVED]".green().bold()
    }

    /// Red [DECLINED] marker
    pub fn declined_marker() -> ColoredString {
        "[DECLINED]".red().bold()
    }

    /// Green [OK] marker for validation success
    pub fn ok_marker() -> ColoredString {
        "[OK]".green()
    }

    /// Red [FAIL] marker for validation failure
    pub fn fail_marker() -> ColoredString {
        "[FAIL]".red()
    }
}
