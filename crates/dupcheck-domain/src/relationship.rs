//! Relationship module - ground-truth pairs between issues

use super::IssueKey;

/// Kind of a ground-truth relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    /// The two issues are known duplicates
    Duplicate,

    /// The two issues were confirmed not to be duplicates
    NonDuplicate,
}

impl RelationshipKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::Duplicate => "duplicate",
            RelationshipKind::NonDuplicate => "non-duplicate",
        }
    }
}

/// A known relationship between two issues
///
/// Pairs are created once by the relationship parser and never mutated.
/// Their order of appearance in the ground truth is the reporting order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationshipPair {
    /// Issue the relationship was recorded on
    pub source: IssueKey,

    /// Issue the source is (or is not) a duplicate of
    pub target: IssueKey,

    /// Duplicate or non-duplicate
    pub kind: RelationshipKind,
}

impl RelationshipPair {
    /// Create a new relationship pair
    pub fn new(source: IssueKey, target: IssueKey, kind: RelationshipKind) -> Self {
        Self {
            source,
            target,
            kind,
        }
    }

    /// Shorthand for a duplicate pair
    pub fn duplicate(source: IssueKey, target: IssueKey) -> Self {
        Self::new(source, target, RelationshipKind::Duplicate)
    }

    /// Shorthand for a non-duplicate pair
    pub fn non_duplicate(source: IssueKey, target: IssueKey) -> Self {
        Self::new(source, target, RelationshipKind::NonDuplicate)
    }
}
