//! Format command implementation.

use super::{read_input, write_output};
use crate::cli::FormatArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use dupcheck_parser::{format_match_results, parse_match_results};
use tracing::info;

/// Execute the format command.
pub fn execute_format(args: FormatArgs, formatter: &Formatter) -> Result<()> {
    let text = read_input(&args.input)?;
    let results = parse_match_results(&text).map_err(|source| CliError::Parse {
        path: args.input.clone(),
        source,
    })?;

    let lines = format_match_results(&results);
    info!(
        issues = results.len(),
        lines = lines.len(),
        "Formatted matching-service results"
    );

    write_output(args.output.as_deref(), &formatter.format_lines(&lines)?)?;

    if let Some(path) = &args.output {
        eprintln!(
            "{}",
            formatter.success(&format!("Wrote {} line(s) to {}", lines.len(), path.display()))
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::fs;

    #[test]
    fn test_format_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("results.json");
        let output = dir.path().join("duplicates.txt");
        fs::write(
            &input,
            r#"{"X-1": {"description_match_results": [{"issue_key": "X-2", "score": 0.5}],
                        "analysis_finding_match_results": [{"issue_key": "X-3", "score": 0.75}]}}"#,
        )
        .unwrap();

        let args = FormatArgs {
            input,
            output: Some(output.clone()),
        };
        execute_format(args, &Formatter::new(OutputFormat::Text, false)).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "X-1 is a possible duplicate of X-3 (a:0.75), X-2 (d:0.50)\n"
        );
    }

    #[test]
    fn test_format_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("results.json");
        fs::write(&input, "not json").unwrap();

        let args = FormatArgs {
            input,
            output: None,
        };
        let result = execute_format(args, &Formatter::new(OutputFormat::Text, false));
        assert!(matches!(result, Err(CliError::Parse { .. })));
    }
}
