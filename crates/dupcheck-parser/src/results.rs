//! Matching-service results and their formatted detector lines
//!
//! The matching service answers one query per issue key. The collected
//! answers form a JSON object keyed by issue key:
//!
//! ```json
//! {
//!   "HCP-1": {
//!     "input": { "processed_description": "...", "jira_analysis_finding": "..." },
//!     "description_match_results": [{ "issue_key": "HCP-7", "score": 0.91 }],
//!     "analysis_finding_match_results": [{ "issue_key": "HCP-3", "score": 0.5 }]
//!   }
//! }
//! ```
//!
//! Formatting turns each entry into one `is a possible duplicate of` line.

use crate::detection::{parse_detections, DETECTION_MARKER};
use crate::error::ParseError;
use dupcheck_domain::{DetectionGraph, MatchType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// A single candidate returned by the matching service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Candidate issue key
    pub issue_key: String,

    /// Similarity score
    pub score: f64,
}

/// Text the service matched on for the queried issue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueInput {
    /// Processed issue description
    #[serde(default)]
    pub processed_description: String,

    /// Analysis finding recorded on the issue
    #[serde(default)]
    pub jira_analysis_finding: String,
}

/// The service's answer for one issue key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueResult {
    /// Matched input text (absent when the query failed)
    #[serde(default)]
    pub input: Option<IssueInput>,

    /// Candidates matched on the description
    #[serde(default)]
    pub description_match_results: Vec<MatchResult>,

    /// Candidates matched on the analysis finding
    #[serde(default)]
    pub analysis_finding_match_results: Vec<MatchResult>,

    /// Query failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// All service answers, keyed (and ordered) by issue key
pub type MatchResults = BTreeMap<String, IssueResult>;

/// Parse a results document
pub fn parse_match_results(json: &str) -> Result<MatchResults, ParseError> {
    Ok(serde_json::from_str(json)?)
}

/// Format results as detector lines, one per issue with at least one match
///
/// Description matches (tag `d`) and analysis matches (tag `a`) are merged
/// and sorted by descending score; ties keep description matches first.
/// Scores are rendered with two decimals.
pub fn format_match_results(results: &MatchResults) -> Vec<String> {
    let mut lines = Vec::new();

    for (issue_key, result) in results {
        if let Some(error) = &result.error {
            warn!("Skipping {}: query failed: {}", issue_key, error);
            continue;
        }

        let mut matches: Vec<(&str, f64, MatchType)> = result
            .description_match_results
            .iter()
            .map(|m| (m.issue_key.as_str(), m.score, MatchType::DescriptionMatch))
            .chain(
                result
                    .analysis_finding_match_results
                    .iter()
                    .map(|m| (m.issue_key.as_str(), m.score, MatchType::AnalysisMatch)),
            )
            .collect();

        if matches.is_empty() {
            continue;
        }

        matches.sort_by(|a, b| b.1.total_cmp(&a.1));

        let rendered: Vec<String> = matches
            .iter()
            .map(|(key, score, match_type)| format!("{} ({}:{:.2})", key, match_type.tag(), score))
            .collect();
        lines.push(format!("{} {} {}", issue_key, DETECTION_MARKER, rendered.join(", ")));
    }

    lines
}

/// Build the detection graph straight from service results
///
/// Goes through the formatted lines so the graph sees exactly what a
/// formatted results file would contain, two-decimal rounding included.
pub fn detections_from_results(results: &MatchResults) -> Result<DetectionGraph, ParseError> {
    parse_detections(&format_match_results(results).join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS: &str = r#"{
        "HCP-2": {
            "input": {"processed_description": "crash on boot", "jira_analysis_finding": ""},
            "description_match_results": [
                {"issue_key": "HCP-9", "score": 0.612},
                {"issue_key": "HCP-4", "score": 0.9}
            ],
            "analysis_finding_match_results": [
                {"issue_key": "HCP-5", "score": 0.77}
            ]
        },
        "HCP-1": {
            "input": {"processed_description": "", "jira_analysis_finding": ""},
            "description_match_results": [],
            "analysis_finding_match_results": []
        },
        "HCP-3": {
            "input": null,
            "error": "connection refused"
        }
    }"#;

    #[test]
    fn test_format_sorted_by_score() {
        let results = parse_match_results(RESULTS).unwrap();
        let lines = format_match_results(&results);

        assert_eq!(
            lines,
            vec!["HCP-2 is a possible duplicate of HCP-4 (d:0.90), HCP-5 (a:0.77), HCP-9 (d:0.61)"]
        );
    }

    #[test]
    fn test_ties_keep_description_first() {
        let mut results = MatchResults::new();
        results.insert(
            "A".to_string(),
            IssueResult {
                description_match_results: vec![MatchResult {
                    issue_key: "B".to_string(),
                    score: 0.5,
                }],
                analysis_finding_match_results: vec![MatchResult {
                    issue_key: "C".to_string(),
                    score: 0.5,
                }],
                ..IssueResult::default()
            },
        );

        let lines = format_match_results(&results);
        assert_eq!(lines, vec!["A is a possible duplicate of B (d:0.50), C (a:0.50)"]);
    }

    #[test]
    fn test_lines_ordered_by_issue_key() {
        let mut results = MatchResults::new();
        for key in ["Z-1", "A-1"] {
            results.insert(
                key.to_string(),
                IssueResult {
                    description_match_results: vec![MatchResult {
                        issue_key: "X-1".to_string(),
                        score: 0.3,
                    }],
                    ..IssueResult::default()
                },
            );
        }

        let lines = format_match_results(&results);
        assert!(lines[0].starts_with("A-1 "));
        assert!(lines[1].starts_with("Z-1 "));
    }

    #[test]
    fn test_graph_from_results() {
        let results = parse_match_results(RESULTS).unwrap();
        let graph = detections_from_results(&results).unwrap();

        assert_eq!(graph.num_sources(), 1);
        assert_eq!(graph.edge("HCP-2", "HCP-9").unwrap().score, 0.61);
        assert!(!graph.contains_source("HCP-3"));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_match_results("not json").unwrap_err();
        assert!(matches!(err, ParseError::JsonParse(_)));
    }
}
