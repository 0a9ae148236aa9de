//! Dupcheck Domain Layer
//!
//! This crate contains the core logic for validating a duplicate-issue
//! detector against known duplicate relationships. It has no external
//! dependencies; text formats and the command line live in other crates.
//!
//! ## Key Concepts
//!
//! - **Issue key**: opaque, case-sensitive identifier of a tracked issue
//! - **Relationship pair**: ground-truth (source, target) pair, duplicate or not
//! - **Detection graph**: directed graph of scored candidates reported by the detector
//! - **Resolution**: whether the detector connected a pair, directly or through a chain
//! - **Metrics**: confusion-matrix counts, success rate, average score of hits
//!
//! ## Flow
//!
//! ```text
//! ground truth ─┐
//!               ├─> validate ─> per-pair outcomes ─> metrics
//! graph ────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod detection;
pub mod issue;
pub mod metrics;
pub mod relationship;
pub mod resolver;
pub mod validation;

// Re-exports for convenience
pub use detection::{DetectionEdge, DetectionGraph, EdgeAnnotation, MatchType};
pub use issue::IssueKey;
pub use metrics::{MetricsAggregator, NonDuplicateMetrics, ValidationMetrics};
pub use relationship::{RelationshipKind, RelationshipPair};
pub use resolver::{resolve, ChainLink, ResolutionMode, ResolutionOutcome};
pub use validation::{validate, PairResolution, ValidationPolicy, ValidationRun};
