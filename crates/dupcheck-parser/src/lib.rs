//! Dupcheck Parser
//!
//! Reads the line-oriented text formats around the validator and turns them
//! into domain values.
//!
//! # Formats
//!
//! ```text
//! ground truth      ABC-1 linked as duplicate of ABC-2,
//!                   ABC-1 confirmed not duplicate of ABC-9,
//! detector output   ABC-1 is a possible duplicate of ABC-2 (d:0.91), ABC-3 (a:0.50)
//! ```
//!
//! Matching-service results (JSON) can be formatted into detector output
//! lines, or loaded directly into a [`dupcheck_domain::DetectionGraph`].
//!
//! # Example Usage
//!
//! ```
//! use dupcheck_domain::{validate, RelationshipKind, ValidationPolicy};
//! use dupcheck_parser::{parse_detections, parse_relationships};
//!
//! let truth = parse_relationships("A linked as duplicate of B,", RelationshipKind::Duplicate)?;
//! let graph = parse_detections("A is a possible duplicate of B (d:0.80)")?;
//!
//! let run = validate(&graph, &truth, None, ValidationPolicy::default());
//! assert_eq!(run.metrics.true_positives, 1);
//! # Ok::<(), dupcheck_parser::ParseError>(())
//! ```

#![warn(missing_docs)]

mod detection;
mod error;
mod relationship;
mod results;

pub use detection::{parse_detection_line, parse_detections, DETECTION_MARKER};
pub use error::ParseError;
pub use relationship::{
    collect_issue_keys, marker, parse_relationships, DUPLICATE_MARKER, NON_DUPLICATE_MARKER,
};
pub use results::{
    detections_from_results, format_match_results, parse_match_results, IssueInput, IssueResult,
    MatchResult, MatchResults,
};
