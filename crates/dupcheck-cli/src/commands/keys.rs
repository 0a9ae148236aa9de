//! Keys command implementation.

use super::{read_input, write_output};
use crate::cli::KeysArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use dupcheck_domain::{IssueKey, RelationshipKind};
use dupcheck_parser::{collect_issue_keys, parse_relationships};
use std::collections::BTreeSet;
use std::path::Path;

/// Execute the keys command.
pub fn execute_keys(args: KeysArgs, formatter: &Formatter) -> Result<()> {
    if args.duplicates.is_none() && args.non_duplicates.is_none() {
        return Err(CliError::InvalidInput(
            "Provide --duplicates, --non-duplicates, or both".to_string(),
        ));
    }

    let mut keys = BTreeSet::new();
    if let Some(path) = &args.duplicates {
        keys.extend(load_keys(path, RelationshipKind::Duplicate)?);
    }
    if let Some(path) = &args.non_duplicates {
        keys.extend(load_keys(path, RelationshipKind::NonDuplicate)?);
    }

    tracing::info!(keys = keys.len(), "Collected issue keys");
    write_output(args.output.as_deref(), &formatter.format_keys(&keys)?)
}

fn load_keys(path: &Path, kind: RelationshipKind) -> Result<BTreeSet<IssueKey>> {
    let text = read_input(path)?;
    let pairs = parse_relationships(&text, kind).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(collect_issue_keys(&pairs))
}
