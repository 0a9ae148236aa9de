//! Detection graph module
//!
//! Directed graph of the detector's output: an edge `source -> target` means
//! the detector listed `target` as a duplicate candidate of `source`, with the
//! match type and score it reported.

use super::IssueKey;
use std::collections::HashMap;

/// Which text field produced a candidate match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    /// Matched on the processed issue description (tag `d`)
    DescriptionMatch,

    /// Matched on the analysis finding (tag `a`)
    AnalysisMatch,
}

impl MatchType {
    /// Get the short tag used in detector output
    pub fn tag(&self) -> &'static str {
        match self {
            MatchType::DescriptionMatch => "d",
            MatchType::AnalysisMatch => "a",
        }
    }

    /// Parse a match type from its short tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "d" => Some(MatchType::DescriptionMatch),
            "a" => Some(MatchType::AnalysisMatch),
            _ => None,
        }
    }
}

/// Match type and score recorded for one edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeAnnotation {
    /// Field that produced the match
    pub match_type: MatchType,

    /// Similarity score [0.0, 1.0]
    pub score: f64,
}

/// A single scored candidate reported by the detector
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionEdge {
    /// Issue the detector was queried for
    pub source: IssueKey,

    /// Candidate duplicate
    pub target: IssueKey,

    /// Field that produced the match
    pub match_type: MatchType,

    /// Similarity score [0.0, 1.0]
    pub score: f64,
}

impl DetectionEdge {
    /// Create a new edge
    ///
    /// # Errors
    /// Returns error if the score is not a finite number in [0, 1]
    pub fn new(
        source: IssueKey,
        target: IssueKey,
        match_type: MatchType,
        score: f64,
    ) -> Result<Self, String> {
        if !(0.0..=1.0).contains(&score) {
            return Err(format!("Score {} is outside [0, 1]", score));
        }

        Ok(Self {
            source,
            target,
            match_type,
            score,
        })
    }

    /// Get the annotation carried by this edge
    pub fn annotation(&self) -> EdgeAnnotation {
        EdgeAnnotation {
            match_type: self.match_type,
            score: self.score,
        }
    }
}

/// Directed graph over issue keys built from detector output
///
/// Holds an adjacency list per source (in the order candidates were listed,
/// which upstream formatting sorts by descending score) and a side map of
/// annotations keyed by the ordered `(source, target)` pair.
///
/// There is at most one edge per ordered pair. Adding an edge that already
/// exists keeps the target's adjacency position and overwrites its
/// annotation (last write wins).
#[derive(Debug, Clone, Default)]
pub struct DetectionGraph {
    adjacency: HashMap<IssueKey, Vec<IssueKey>>,
    annotations: HashMap<IssueKey, HashMap<IssueKey, EdgeAnnotation>>,
}

impl DetectionGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge to the graph
    ///
    /// Returns `true` if the edge is new, `false` if it replaced the
    /// annotation of an existing edge.
    pub fn add_edge(&mut self, edge: DetectionEdge) -> bool {
        let annotation = edge.annotation();
        let scores = self.annotations.entry(edge.source.clone()).or_default();
        let is_new = scores.insert(edge.target.clone(), annotation).is_none();

        if is_new {
            self.adjacency
                .entry(edge.source)
                .or_default()
                .push(edge.target);
        }

        is_new
    }

    /// Candidates listed for `source`, in adjacency order
    ///
    /// Returns an empty slice when the detector produced nothing for `source`.
    pub fn candidates(&self, source: &str) -> &[IssueKey] {
        self.adjacency
            .get(source)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Annotation of the edge `source -> target`, if it exists
    pub fn edge(&self, source: &str, target: &str) -> Option<EdgeAnnotation> {
        self.annotations
            .get(source)
            .and_then(|targets| targets.get(target))
            .copied()
    }

    /// Whether the detector listed any candidate for `source`
    pub fn contains_source(&self, source: &str) -> bool {
        self.adjacency.contains_key(source)
    }

    /// Number of issues with at least one candidate
    pub fn num_sources(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of edges
    pub fn num_edges(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Whether the graph has no edges
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
