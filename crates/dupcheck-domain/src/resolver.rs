//! Path resolver module
//!
//! Decides whether the detector connected two issues, either with a direct
//! edge or through a chain of edges.

use crate::detection::{DetectionGraph, EdgeAnnotation};
use crate::IssueKey;
use std::collections::HashSet;

/// How far the resolver may look for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResolutionMode {
    /// Only a direct `source -> target` edge counts
    #[default]
    Direct,

    /// Any chain of edges from `source` to `target` counts
    Transitive,
}

impl ResolutionMode {
    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionMode::Direct => "direct",
            ResolutionMode::Transitive => "transitive",
        }
    }
}

/// One traversed edge of a resolved chain
#[derive(Debug, Clone, PartialEq)]
pub struct ChainLink {
    /// Edge origin
    pub from: IssueKey,

    /// Edge destination
    pub to: IssueKey,

    /// Recorded match type and score (`None` only if the graph lost it)
    pub annotation: Option<EdgeAnnotation>,
}

/// Result of resolving one pair against the detection graph
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    /// The pair is connected; the chain holds at least one link
    Found(Vec<ChainLink>),

    /// No connection was found
    NotFound,
}

impl ResolutionOutcome {
    /// Whether the pair was connected
    pub fn is_found(&self) -> bool {
        matches!(self, ResolutionOutcome::Found(_))
    }

    /// Traversed links (empty when not found)
    pub fn chain(&self) -> &[ChainLink] {
        match self {
            ResolutionOutcome::Found(links) => links,
            ResolutionOutcome::NotFound => &[],
        }
    }
}

/// Resolve `source -> target` against `graph`
///
/// In [`ResolutionMode::Direct`] only the adjacency list of `source` is
/// consulted. In [`ResolutionMode::Transitive`] a depth-first search follows
/// candidates in adjacency order (highest score first) and returns the first
/// chain that reaches `target`.
///
/// A source the detector produced nothing for resolves to `NotFound`.
///
/// # Examples
///
/// ```
/// use dupcheck_domain::{
///     resolve, DetectionEdge, DetectionGraph, IssueKey, MatchType, ResolutionMode,
/// };
///
/// let key = |s: &str| IssueKey::new(s).unwrap();
/// let mut graph = DetectionGraph::new();
/// graph.add_edge(DetectionEdge::new(key("A"), key("B"), MatchType::DescriptionMatch, 0.9).unwrap());
/// graph.add_edge(DetectionEdge::new(key("B"), key("C"), MatchType::AnalysisMatch, 0.7).unwrap());
///
/// assert!(!resolve(&graph, &key("A"), &key("C"), ResolutionMode::Direct).is_found());
/// assert_eq!(resolve(&graph, &key("A"), &key("C"), ResolutionMode::Transitive).chain().len(), 2);
/// ```
pub fn resolve(
    graph: &DetectionGraph,
    source: &IssueKey,
    target: &IssueKey,
    mode: ResolutionMode,
) -> ResolutionOutcome {
    let path = match mode {
        ResolutionMode::Direct => graph
            .candidates(source.as_str())
            .contains(target)
            .then(|| vec![source, target]),
        ResolutionMode::Transitive => find_path(graph, source, target),
    };

    match path {
        Some(path) => ResolutionOutcome::Found(annotate(graph, &path)),
        None => ResolutionOutcome::NotFound,
    }
}

/// Iterative depth-first search from `source` to `target`
///
/// Each frame on the stack is a node on the current path plus the index of
/// the next candidate to try. The visited set lives only for this call.
/// `target` is checked before the visited set, so `source == target` looks
/// for a cycle back to the source.
fn find_path<'g>(
    graph: &'g DetectionGraph,
    source: &'g IssueKey,
    target: &IssueKey,
) -> Option<Vec<&'g IssueKey>> {
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(source.as_str());
    let mut stack: Vec<(&'g IssueKey, usize)> = vec![(source, 0)];

    while let Some(frame) = stack.last_mut() {
        let Some(next) = graph.candidates(frame.0.as_str()).get(frame.1) else {
            stack.pop();
            continue;
        };
        frame.1 += 1;

        if next == target {
            let mut path: Vec<&'g IssueKey> = stack.iter().map(|(node, _)| *node).collect();
            path.push(next);
            return Some(path);
        }

        if visited.insert(next.as_str()) {
            stack.push((next, 0));
        }
    }

    None
}

fn annotate(graph: &DetectionGraph, path: &[&IssueKey]) -> Vec<ChainLink> {
    path.windows(2)
        .map(|pair| ChainLink {
            from: pair[0].clone(),
            to: pair[1].clone(),
            annotation: graph.edge(pair[0].as_str(), pair[1].as_str()),
        })
        .collect()
}
