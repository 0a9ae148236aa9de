//! Validate command implementation.

use super::{read_input, write_output};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use dupcheck_domain::{
    validate, DetectionGraph, RelationshipKind, RelationshipPair, ValidationPolicy, ValidationRun,
};
use dupcheck_parser::{detections_from_results, parse_detections, parse_match_results, parse_relationships};
use std::path::Path;
use tracing::{debug, info, warn};

/// Execute the validate command.
pub fn execute_validate(args: ValidateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut policy = config.policy();

    // Command-line modes win over the config file
    if let Some(mode) = args.mode {
        policy.duplicate_mode = mode.into();
    }
    if let Some(mode) = args.non_duplicate_mode {
        policy.non_duplicate_mode = mode.into();
    }

    let run = run_validation(
        &args.actual,
        &args.detected,
        args.non_duplicates.as_deref(),
        policy,
    )?;

    let report = formatter.format_report(&run)?;
    write_output(args.output.as_deref(), &report)?;

    if let Some(path) = &args.output {
        eprintln!("{}", formatter.summary_line(&run));
        eprintln!("{}", formatter.info(&format!("Report written to {}", path.display())));
    }

    Ok(())
}

/// Load the inputs and validate the detector output against them.
///
/// `detected` is read as service results when it ends in `.json`, and as
/// formatted detector lines otherwise.
pub fn run_validation(
    actual: &Path,
    detected: &Path,
    non_duplicates: Option<&Path>,
    policy: ValidationPolicy,
) -> Result<ValidationRun> {
    let duplicates = load_relationships(actual, RelationshipKind::Duplicate)?;
    if duplicates.is_empty() {
        warn!(path = %actual.display(), "No known duplicates found in ground truth");
    }

    let non_duplicates = non_duplicates
        .map(|path| load_relationships(path, RelationshipKind::NonDuplicate))
        .transpose()?;

    let graph = load_detections(detected)?;
    if graph.is_empty() {
        warn!(path = %detected.display(), "No detections found in detector output");
    }

    let silent_sources = duplicates
        .iter()
        .filter(|pair| !graph.contains_source(pair.source.as_str()))
        .count();
    if silent_sources > 0 {
        debug!(
            pairs = silent_sources,
            "Known duplicates whose source has no detector output"
        );
    }

    info!(
        duplicates = duplicates.len(),
        non_duplicates = non_duplicates.as_ref().map_or(0, Vec::len),
        sources = graph.num_sources(),
        edges = graph.num_edges(),
        mode = policy.duplicate_mode.as_str(),
        "Validating detector output"
    );

    let run = validate(&graph, &duplicates, non_duplicates.as_deref(), policy);
    debug!(
        true_positives = run.metrics.true_positives,
        false_negatives = run.metrics.false_negatives,
        "Validation complete"
    );
    Ok(run)
}

fn load_relationships(path: &Path, kind: RelationshipKind) -> Result<Vec<RelationshipPair>> {
    let text = read_input(path)?;
    parse_relationships(&text, kind).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn load_detections(path: &Path) -> Result<DetectionGraph> {
    let text = read_input(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let graph = if is_json {
        debug!(path = %path.display(), "Reading detector output as service results");
        parse_match_results(&text).and_then(|results| detections_from_results(&results))
    } else {
        parse_detections(&text)
    };

    graph.map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
