//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::report;
use colored::*;
use dupcheck_domain::{IssueKey, ValidationRun};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a validation report.
    ///
    /// Reports are never colorized so that files written with `--output`
    /// stay byte-stable.
    pub fn format_report(&self, run: &ValidationRun) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(report::render_text(run)),
            OutputFormat::Json => report::render_json(run),
            OutputFormat::Table => Ok(report::render_table(run)),
        }
    }

    /// Format detector output lines.
    pub fn format_lines(&self, lines: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(lines)?),
            OutputFormat::Text | OutputFormat::Table => Ok(join_lines(lines)),
        }
    }

    /// Format a set of issue keys.
    pub fn format_keys<'a>(&self, keys: impl IntoIterator<Item = &'a IssueKey>) -> Result<String> {
        let keys: Vec<&str> = keys.into_iter().map(IssueKey::as_str).collect();
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&keys)?),
            OutputFormat::Text | OutputFormat::Table => Ok(join_lines(&keys)),
        }
    }

    /// One-line summary of a run, for stderr after the report was written
    /// to a file.
    pub fn summary_line(&self, run: &ValidationRun) -> String {
        let metrics = &run.metrics;
        let msg = format!(
            "Found {} of {} duplicates ({:.1}%)",
            metrics.true_positives,
            metrics.total_duplicates(),
            metrics.success_rate
        );
        if metrics.false_negatives == 0 {
            self.success(&msg)
        } else {
            self.warning(&msg)
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Newline-terminated lines, or the empty string for no lines
fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dupcheck_domain::{
        validate, DetectionEdge, DetectionGraph, MatchType, RelationshipPair, ValidationPolicy,
    };

    fn key(s: &str) -> IssueKey {
        IssueKey::new(s).unwrap()
    }

    fn sample_run() -> ValidationRun {
        let mut graph = DetectionGraph::new();
        graph.add_edge(
            DetectionEdge::new(key("A"), key("B"), MatchType::DescriptionMatch, 0.8).unwrap(),
        );
        let truth = vec![
            RelationshipPair::duplicate(key("A"), key("B")),
            RelationshipPair::duplicate(key("A"), key("C")),
        ];
        validate(&graph, &truth, None, ValidationPolicy::default())
    }

    #[test]
    fn test_text_format() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_report(&sample_run()).unwrap();
        assert!(output.starts_with("Validation Results:\n"));
        assert!(output.contains("Success Rate: 50.0%"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, true);
        let output = formatter.format_report(&sample_run()).unwrap();
        assert!(output.contains("\"true_positives\": 1"));
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&sample_run()).unwrap();
        assert!(output.contains("Target"));
        assert!(output.contains("NOT FOUND"));
    }

    #[test]
    fn test_lines_and_keys() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let lines = vec!["A is a possible duplicate of B (d:0.80)".to_string()];
        assert_eq!(
            formatter.format_lines(&lines).unwrap(),
            "A is a possible duplicate of B (d:0.80)\n"
        );
        assert_eq!(formatter.format_lines(&[]).unwrap(), "");

        let keys = [key("A"), key("B")];
        assert_eq!(formatter.format_keys(&keys).unwrap(), "A\nB\n");

        let json = Formatter::new(OutputFormat::Json, false);
        assert_eq!(json.format_keys(&keys).unwrap(), "[\n  \"A\",\n  \"B\"\n]");
    }

    #[test]
    fn test_summary_line() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        assert_eq!(
            formatter.summary_line(&sample_run()),
            "⚠ Found 1 of 2 duplicates (50.0%)"
        );
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("careful"), "⚠ careful");
    }
}
