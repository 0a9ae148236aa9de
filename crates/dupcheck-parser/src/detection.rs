//! Parse formatted detector output into a detection graph
//!
//! Each relevant line looks like:
//!
//! ```text
//! HCP-1 is a possible duplicate of HCP-7 (d:0.91), HCP-3 (a:0.50)
//! ```

use crate::error::ParseError;
use dupcheck_domain::{DetectionEdge, DetectionGraph, IssueKey, MatchType};
use tracing::debug;

/// Marker phrase separating a source issue from its candidates
pub const DETECTION_MARKER: &str = "is a possible duplicate of";

/// Build the detection graph from formatted detector output
///
/// Lines without the marker phrase are ignored. Candidates are added in the
/// order they are listed; a candidate listed twice for the same source keeps
/// the later match type and score.
///
/// # Errors
/// Any malformed line or descriptor fails the whole parse: a partially built
/// graph cannot be validated safely.
pub fn parse_detections(text: &str) -> Result<DetectionGraph, ParseError> {
    let mut graph = DetectionGraph::new();

    for (idx, line) in text.lines().enumerate() {
        if !line.contains(DETECTION_MARKER) {
            continue;
        }

        for edge in parse_detection_line(line, idx + 1)? {
            let (source, target) = (edge.source.clone(), edge.target.clone());
            if !graph.add_edge(edge) {
                debug!("Line {}: {} -> {} listed again, keeping later score", idx + 1, source, target);
            }
        }
    }

    debug!(
        "Parsed detection graph: {} source(s), {} edge(s)",
        graph.num_sources(),
        graph.num_edges()
    );
    Ok(graph)
}

/// Parse one detector line into its edges, in listed order
///
/// `line_no` is only used for error reporting.
pub fn parse_detection_line(line: &str, line_no: usize) -> Result<Vec<DetectionEdge>, ParseError> {
    let malformed = |reason: &str| ParseError::MalformedLine {
        line: line_no,
        reason: reason.to_string(),
    };

    let mut parts = line.split(DETECTION_MARKER);
    let (Some(source), Some(candidates), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed("marker appears more than once"));
    };

    let source = source.trim();
    if source.is_empty() {
        return Err(malformed("missing source issue key"));
    }
    let source = IssueKey::new(source).map_err(|e| malformed(&e))?;

    let candidates = candidates.trim();
    if candidates.is_empty() {
        return Err(malformed("no candidates listed"));
    }

    candidates
        .split(',')
        .map(|descriptor| {
            parse_descriptor(&source, descriptor.trim()).map_err(|reason| {
                ParseError::MalformedDescriptor {
                    line: line_no,
                    descriptor: descriptor.trim().to_string(),
                    reason,
                }
            })
        })
        .collect()
}

/// Parse a single `KEY (TAG:SCORE)` descriptor
fn parse_descriptor(source: &IssueKey, descriptor: &str) -> Result<DetectionEdge, String> {
    if descriptor.is_empty() {
        return Err("empty descriptor".to_string());
    }

    let inner = descriptor
        .strip_suffix(')')
        .ok_or_else(|| "missing closing parenthesis".to_string())?;
    let (key, annotation) = inner
        .rsplit_once('(')
        .ok_or_else(|| "missing '(TAG:SCORE)' annotation".to_string())?;

    let key = key.trim();
    if key.is_empty() {
        return Err("missing candidate issue key".to_string());
    }
    let target = IssueKey::new(key)?;

    let (tag, score) = annotation
        .split_once(':')
        .ok_or_else(|| "missing score".to_string())?;
    let tag = tag.trim();
    if tag.is_empty() {
        return Err("missing match type tag".to_string());
    }
    let match_type =
        MatchType::from_tag(tag).ok_or_else(|| format!("unknown match type tag '{}'", tag))?;

    let score = score.trim();
    if score.is_empty() {
        return Err("missing score".to_string());
    }
    let score: f64 = score
        .parse()
        .map_err(|_| format!("invalid score '{}'", score))?;

    DetectionEdge::new(source.clone(), target, match_type, score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> IssueKey {
        IssueKey::new(s).unwrap()
    }

    #[test]
    fn test_parse_two_candidates() {
        let graph =
            parse_detections("ABC-1 is a possible duplicate of ABC-2 (d:0.91), ABC-3 (a:0.50)")
                .unwrap();

        assert_eq!(graph.candidates("ABC-1"), &[key("ABC-2"), key("ABC-3")]);

        let first = graph.edge("ABC-1", "ABC-2").unwrap();
        assert_eq!(first.match_type, MatchType::DescriptionMatch);
        assert_eq!(first.score, 0.91);

        let second = graph.edge("ABC-1", "ABC-3").unwrap();
        assert_eq!(second.match_type, MatchType::AnalysisMatch);
        assert_eq!(second.score, 0.50);
    }

    #[test]
    fn test_multiple_lines_and_noise() {
        let text = "\
Results written 2024-05-01
A is a possible duplicate of B (d:0.80)
B is a possible duplicate of C (a:0.77), A (d:0.80)
";
        let graph = parse_detections(text).unwrap();
        assert_eq!(graph.num_sources(), 2);
        assert_eq!(graph.num_edges(), 3);
        assert_eq!(graph.candidates("B"), &[key("C"), key("A")]);
    }

    #[test]
    fn test_repeated_target_overwrites_score() {
        let text = "\
A is a possible duplicate of B (d:0.80), C (d:0.70)
A is a possible duplicate of B (a:0.60)
";
        let graph = parse_detections(text).unwrap();
        assert_eq!(graph.candidates("A"), &[key("B"), key("C")]);
        assert_eq!(graph.edge("A", "B").unwrap().score, 0.60);
        assert_eq!(graph.edge("A", "B").unwrap().match_type, MatchType::AnalysisMatch);
    }

    #[test]
    fn test_keys_may_contain_spaces() {
        let graph =
            parse_detections("Bug HCP-1 is a possible duplicate of HCP-2 (d:0.80), Old HCP-3 (a:0.40)")
                .unwrap();
        assert_eq!(graph.candidates("Bug HCP-1"), &[key("HCP-2"), key("Old HCP-3")]);
        assert_eq!(graph.edge("Bug HCP-1", "Old HCP-3").unwrap().score, 0.40);
    }

    #[test]
    fn test_general_float_scores() {
        let graph = parse_detections("A is a possible duplicate of B (d:1), C (a:0.123)").unwrap();
        assert_eq!(graph.edge("A", "B").unwrap().score, 1.0);
        assert_eq!(graph.edge("A", "C").unwrap().score, 0.123);
    }

    #[test]
    fn test_missing_score() {
        let err = parse_detections("A is a possible duplicate of B (d)").unwrap_err();
        assert!(matches!(err, ParseError::MalformedDescriptor { line: 1, .. }));
        assert!(err.to_string().contains("missing score"));

        let err = parse_detections("A is a possible duplicate of B (d:)").unwrap_err();
        assert!(err.to_string().contains("missing score"));
    }

    #[test]
    fn test_missing_tag() {
        let err = parse_detections("A is a possible duplicate of B (:0.5)").unwrap_err();
        assert!(err.to_string().contains("missing match type tag"));
    }

    #[test]
    fn test_unknown_tag() {
        let err = parse_detections("A is a possible duplicate of B (x:0.5)").unwrap_err();
        assert!(err.to_string().contains("unknown match type tag 'x'"));
    }

    #[test]
    fn test_bad_scores() {
        let err = parse_detections("A is a possible duplicate of B (d:high)").unwrap_err();
        assert!(err.to_string().contains("invalid score"));

        let err = parse_detections("A is a possible duplicate of B (d:1.5)").unwrap_err();
        assert!(err.to_string().contains("outside [0, 1]"));
    }

    #[test]
    fn test_missing_annotation() {
        let err = parse_detections("A is a possible duplicate of B").unwrap_err();
        assert!(err.to_string().contains("missing closing parenthesis"));

        let err = parse_detections("A is a possible duplicate of B d:0.5)").unwrap_err();
        assert!(err.to_string().contains("annotation"));
    }

    #[test]
    fn test_error_reports_line_number() {
        let text = "A is a possible duplicate of B (d:0.8)\n\nC is a possible duplicate of D (q:0.1)";
        match parse_detections(text).unwrap_err() {
            ParseError::MalformedDescriptor { line, descriptor, .. } => {
                assert_eq!(line, 3);
                assert_eq!(descriptor, "D (q:0.1)");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_candidate_list() {
        let err = parse_detections("A is a possible duplicate of   ").unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn test_trailing_comma_is_malformed() {
        let err = parse_detections("A is a possible duplicate of B (d:0.5),").unwrap_err();
        assert!(err.to_string().contains("empty descriptor"));
    }
}
