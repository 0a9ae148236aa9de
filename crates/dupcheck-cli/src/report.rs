//! Validation report rendering.
//!
//! The text report is the stable format read by downstream tooling:
//!
//! ```text
//! Validation Results:
//! =================
//!
//! A -> B: FOUND (match type: d, score: 0.80)
//! A -> D: NOT FOUND in detected duplicates
//!
//! Summary:
//! Found: 1 out of 2 duplicates
//! True Positives: 1
//! False Negatives: 1
//!
//! Metrics:
//! Success Rate: 50.0%
//! Average Score of Found Duplicates: 0.80
//! ```

use crate::error::Result;
use dupcheck_domain::{
    ChainLink, PairResolution, ResolutionMode, ResolutionOutcome, ValidationMetrics, ValidationRun,
};
use std::fmt::Write as _;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Tag shown for an edge whose annotation is missing from the graph
const UNKNOWN_TAG: &str = "?";

/// Render the plain text report.
pub fn render_text(run: &ValidationRun) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Validation Results:");
    let _ = writeln!(out, "=================");
    let _ = writeln!(out);

    for resolution in &run.duplicates {
        let _ = writeln!(out, "{}", pair_line(resolution, run.policy.duplicate_mode));
    }

    if let Some(non_duplicates) = &run.non_duplicates {
        let _ = writeln!(out);
        let _ = writeln!(out, "Non-Duplicates:");
        for resolution in non_duplicates {
            let _ = writeln!(out, "{}", pair_line(resolution, run.policy.non_duplicate_mode));
        }
    }

    let _ = writeln!(out);
    write_summary(&mut out, &run.metrics);
    out
}

/// Render the report as a JSON document.
///
/// Fields that were not evaluated are absent rather than zero.
pub fn render_json(run: &ValidationRun) -> Result<String> {
    let mut doc = serde_json::json!({
        "mode": run.policy.duplicate_mode.as_str(),
        "non_duplicate_mode": run.policy.non_duplicate_mode.as_str(),
        "duplicates": run.duplicates.iter().map(pair_json).collect::<Vec<_>>(),
        "metrics": metrics_json(&run.metrics),
    });

    if let Some(non_duplicates) = &run.non_duplicates {
        doc["non_duplicates"] = non_duplicates.iter().map(pair_json).collect();
    }

    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Render a table of pairs followed by the text summary.
pub fn render_table(run: &ValidationRun) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Kind", "Source", "Target", "Result", "Detail"]);

    let duplicates = run
        .duplicates
        .iter()
        .map(|r| ("duplicate", r, run.policy.duplicate_mode));
    let non_duplicates = run
        .non_duplicates
        .iter()
        .flatten()
        .map(|r| ("non-duplicate", r, run.policy.non_duplicate_mode));

    for (kind, resolution, mode) in duplicates.chain(non_duplicates) {
        let (result, detail) = match &resolution.outcome {
            ResolutionOutcome::Found(chain) => ("FOUND", detail(chain, mode)),
            ResolutionOutcome::NotFound => ("NOT FOUND", String::new()),
        };
        builder.push_record([
            kind,
            resolution.pair.source.as_str(),
            resolution.pair.target.as_str(),
            result,
            detail.as_str(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    let mut out = table.to_string();
    let _ = writeln!(out);
    let _ = writeln!(out);
    write_summary(&mut out, &run.metrics);
    out
}

/// One per-pair line of the text report
fn pair_line(resolution: &PairResolution, mode: ResolutionMode) -> String {
    let pair = &resolution.pair;
    match &resolution.outcome {
        ResolutionOutcome::Found(chain) => {
            format!("{} -> {}: FOUND {}", pair.source, pair.target, detail(chain, mode))
        }
        ResolutionOutcome::NotFound => {
            format!("{} -> {}: NOT FOUND in detected duplicates", pair.source, pair.target)
        }
    }
}

/// `(match type: d, score: 0.91)` for direct hits,
/// `via chain: A->B(d:0.91) -> B->C(a:0.77)` for chains
fn detail(chain: &[ChainLink], mode: ResolutionMode) -> String {
    match mode {
        ResolutionMode::Direct => {
            let (tag, score) = chain.first().map(link_annotation).unwrap_or((UNKNOWN_TAG, 0.0));
            format!("(match type: {}, score: {:.2})", tag, score)
        }
        ResolutionMode::Transitive => {
            let links: Vec<String> = chain
                .iter()
                .map(|link| {
                    let (tag, score) = link_annotation(link);
                    format!("{}->{}({}:{:.2})", link.from, link.to, tag, score)
                })
                .collect();
            format!("via chain: {}", links.join(" -> "))
        }
    }
}

fn link_annotation(link: &ChainLink) -> (&'static str, f64) {
    link.annotation
        .map(|a| (a.match_type.tag(), a.score))
        .unwrap_or((UNKNOWN_TAG, 0.0))
}

fn write_summary(out: &mut String, metrics: &ValidationMetrics) {
    let _ = writeln!(out, "Summary:");
    let _ = writeln!(
        out,
        "Found: {} out of {} duplicates",
        metrics.true_positives,
        metrics.total_duplicates()
    );
    let _ = writeln!(out, "True Positives: {}", metrics.true_positives);
    let _ = writeln!(out, "False Negatives: {}", metrics.false_negatives);
    if let Some(nd) = metrics.non_duplicates {
        let _ = writeln!(out, "False Positives: {}", nd.false_positives);
        let _ = writeln!(out, "True Negatives: {}", nd.true_negatives);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Metrics:");
    let _ = writeln!(out, "Success Rate: {:.1}%", metrics.success_rate);
    if let Some(precision) = metrics.precision() {
        let _ = writeln!(out, "Precision: {:.1}%", precision);
    }
    if let Some(average) = metrics.average_score_of_found {
        let _ = writeln!(out, "Average Score of Found Duplicates: {:.2}", average);
    }
}

fn pair_json(resolution: &PairResolution) -> serde_json::Value {
    let chain: Vec<serde_json::Value> = resolution
        .outcome
        .chain()
        .iter()
        .map(|link| {
            let (tag, score) = link_annotation(link);
            serde_json::json!({
                "from": link.from.as_str(),
                "to": link.to.as_str(),
                "match_type": tag,
                "score": score,
            })
        })
        .collect();

    serde_json::json!({
        "source": resolution.pair.source.as_str(),
        "target": resolution.pair.target.as_str(),
        "found": resolution.outcome.is_found(),
        "chain": chain,
    })
}

fn metrics_json(metrics: &ValidationMetrics) -> serde_json::Value {
    let mut doc = serde_json::json!({
        "total_duplicates": metrics.total_duplicates(),
        "true_positives": metrics.true_positives,
        "false_negatives": metrics.false_negatives,
        "success_rate": metrics.success_rate,
    });

    if let Some(average) = metrics.average_score_of_found {
        doc["average_score_of_found"] = average.into();
    }
    if let Some(nd) = metrics.non_duplicates {
        doc["total_non_duplicates"] = nd.total().into();
        doc["false_positives"] = nd.false_positives.into();
        doc["true_negatives"] = nd.true_negatives.into();
    }
    if let Some(precision) = metrics.precision() {
        doc["precision"] = precision.into();
    }

    doc
}
