//! Diagnostic log for one cleaning run.
//!
//! A human-readable, append-only trace of every boundary decision. It is a
//! side channel: nothing in the detector reads it back. Lines are mirrored
//! to `tracing` at debug level.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const RULE: &str = "================================================================================";

/// Append-only decision log.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    enabled: bool,
    lines: Vec<String>,
}

impl DiagnosticLog {
    /// A log that records lines.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: true,
            lines: Vec::new(),
        }
    }

    /// A log that only forwards to `tracing`.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append one line.
    pub fn record(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::debug!(target: "rs_mdclean::diagnostics", "{line}");
        if self.enabled {
            self.lines.push(line);
        }
    }

    /// Append a blank line followed by a `--- title` header.
    pub fn heading(&mut self, title: &str) {
        self.record("");
        self.record(format!("--- {title}"));
    }

    /// Append a numbered preview of `lines`, each cut to 100 characters.
    pub fn preview(&mut self, lines: &[&str], limit: usize) {
        if !self.enabled {
            return;
        }
        for (i, line) in lines.iter().take(limit).enumerate() {
            self.record(format!("  {i:3}: {}", truncate(line, 100)));
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render the log, optionally headed by the path of the saved output.
    #[must_use]
    pub fn render(&self, saved_to: Option<&Path>) -> String {
        let mut out = String::new();
        if let Some(path) = saved_to {
            let _ = writeln!(out, "{RULE}");
            let _ = writeln!(out, "Saved to: {}", path.display());
            let _ = writeln!(out, "{RULE}");
            out.push('\n');
        }
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Write the rendered log to `path`, creating parent directories.
    pub fn write_to(&self, path: &Path, saved_to: Option<&Path>) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render(saved_to))
    }
}

/// Cut `text` to at most `max` characters, marking the cut with `...`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_log_keeps_nothing() {
        let mut log = DiagnosticLog::disabled();
        log.record("hidden");
        assert!(log.is_empty());
    }

    #[test]
    fn test_render_with_banner() {
        let mut log = DiagnosticLog::new();
        log.record("Section 0: Intro");
        let rendered = log.render(Some(Path::new("/tmp/out.md")));
        assert!(rendered.starts_with(RULE));
        assert!(rendered.contains("Saved to: /tmp/out.md"));
        assert!(rendered.ends_with("Section 0: Intro\n"));
    }

    #[test]
    fn test_preview_truncates_long_lines() {
        let mut log = DiagnosticLog::new();
        let long = "x".repeat(150);
        log.preview(&[long.as_str(), "short"], 60);
        assert_eq!(log.lines().len(), 2);
        assert!(log.lines()[0].ends_with("..."));
        assert!(log.lines()[0].chars().count() < 110);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdefgh", 6), "abc...");
    }
}
