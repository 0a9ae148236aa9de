//! Parse ground-truth relationship lines

use crate::error::ParseError;
use dupcheck_domain::{IssueKey, RelationshipKind, RelationshipPair};
use std::collections::BTreeSet;
use tracing::debug;

/// Marker phrase of a known duplicate link
pub const DUPLICATE_MARKER: &str = "linked as duplicate of";

/// Marker phrase of a confirmed non-duplicate pair
pub const NON_DUPLICATE_MARKER: &str = "confirmed not duplicate of";

/// Marker phrase used in ground truth for `kind`
pub fn marker(kind: RelationshipKind) -> &'static str {
    match kind {
        RelationshipKind::Duplicate => DUPLICATE_MARKER,
        RelationshipKind::NonDuplicate => NON_DUPLICATE_MARKER,
    }
}

/// Parse every relationship of `kind` out of ground-truth text
///
/// Lines without the marker phrase are ignored. Pairs are returned in the
/// order they appear, duplicates included.
///
/// # Errors
/// Returns [`ParseError::MalformedLine`] for the first line that carries the
/// marker but does not split into exactly two issue keys.
pub fn parse_relationships(
    text: &str,
    kind: RelationshipKind,
) -> Result<Vec<RelationshipPair>, ParseError> {
    let marker = marker(kind);
    let mut pairs = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if !line.contains(marker) {
            continue;
        }

        let (source, target) = split_pair(line, marker).map_err(|reason| {
            ParseError::MalformedLine {
                line: idx + 1,
                reason,
            }
        })?;
        pairs.push(RelationshipPair::new(source, target, kind));
    }

    debug!("Parsed {} {} relationship(s)", pairs.len(), kind.as_str());
    Ok(pairs)
}

/// Split one ground-truth line around `marker`
///
/// Both sides are trimmed; a single trailing comma is dropped from the
/// right-hand side only.
fn split_pair(line: &str, marker: &str) -> Result<(IssueKey, IssueKey), String> {
    let mut parts = line.split(marker);
    let (Some(left), Some(right), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("'{}' appears more than once", marker));
    };

    let left = left.trim();
    let right = right.trim();
    let right = right.strip_suffix(',').unwrap_or(right).trim_end();

    if left.is_empty() {
        return Err("missing source issue key".to_string());
    }
    if right.is_empty() {
        return Err("missing target issue key".to_string());
    }

    Ok((IssueKey::new(left)?, IssueKey::new(right)?))
}

/// Unique issue keys named by the given pairs, sorted
///
/// This is the list of issues the matching service has to be queried for.
pub fn collect_issue_keys<'a>(
    pairs: impl IntoIterator<Item = &'a RelationshipPair>,
) -> BTreeSet<IssueKey> {
    pairs
        .into_iter()
        .flat_map(|pair| [pair.source.clone(), pair.target.clone()])
        .collect()
}
