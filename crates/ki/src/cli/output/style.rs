//! ANSI styling for terminal output.

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text, for headers.
    pub const CYAN: &str = "\x1b[36m";
    /// Green text, for rising trends.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text, for warnings.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red text, for declining trends.
    pub const RED: &str = "\x1b[31m";
    /// Dim text, for secondary details.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps text in a color code and a reset.
fn paint(codes: &str, text: &str) -> String {
    format!("{codes}{text}{}", colors::RESET)
}

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    paint(&format!("{}{}", colors::BOLD, colors::CYAN), text)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    paint(colors::BOLD, text)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    paint(colors::DIM, text)
}

/// Formats text as good news (green).
pub fn success(text: &str) -> String {
    paint(colors::GREEN, text)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    paint(colors::YELLOW, text)
}

/// Formats text as bad news (red).
pub fn error(text: &str) -> String {
    paint(colors::RED, text)
}

/// Returns a dimmed horizontal rule.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_bold_cyan() {
        let h = header("Test");
        assert!(h.starts_with(colors::BOLD));
        assert!(h.contains(colors::CYAN));
        assert!(h.ends_with(colors::RESET));
        assert!(h.contains("Test"));
    }

    #[test]
    fn dim_resets() {
        assert_eq!(dim("faint"), "\x1b[2mfaint\x1b[0m");
    }

    #[test]
    fn rule_has_requested_width() {
        assert_eq!(rule(3).matches('─').count(), 3);
    }
}
