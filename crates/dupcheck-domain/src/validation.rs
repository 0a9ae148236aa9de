//! Validation run - resolves every ground-truth pair and aggregates metrics

use crate::detection::DetectionGraph;
use crate::metrics::{MetricsAggregator, ValidationMetrics};
use crate::relationship::RelationshipPair;
use crate::resolver::{resolve, ResolutionMode, ResolutionOutcome};

/// Resolution modes applied to each class of ground truth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Mode used for known duplicates
    pub duplicate_mode: ResolutionMode,

    /// Mode used for known non-duplicates
    ///
    /// Defaults to direct: an incidental long chain between two unrelated
    /// issues is not counted as a false positive.
    pub non_duplicate_mode: ResolutionMode,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            duplicate_mode: ResolutionMode::Direct,
            non_duplicate_mode: ResolutionMode::Direct,
        }
    }
}

impl ValidationPolicy {
    /// Policy resolving duplicates with `mode` and non-duplicates directly
    pub fn with_duplicate_mode(mode: ResolutionMode) -> Self {
        Self {
            duplicate_mode: mode,
            ..Self::default()
        }
    }
}

/// A ground-truth pair together with how it resolved
#[derive(Debug, Clone, PartialEq)]
pub struct PairResolution {
    /// The ground-truth pair
    pub pair: RelationshipPair,

    /// What the resolver found for it
    pub outcome: ResolutionOutcome,
}

/// Everything produced by one validation run, in ground-truth order
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRun {
    /// Modes the run was performed with
    pub policy: ValidationPolicy,

    /// Outcomes for the known duplicates
    pub duplicates: Vec<PairResolution>,

    /// Outcomes for the known non-duplicates, if that set was supplied
    pub non_duplicates: Option<Vec<PairResolution>>,

    /// Aggregated metrics
    pub metrics: ValidationMetrics,
}

/// Validate the detector's graph against the ground truth
///
/// `non_duplicates` is optional: when `None`, the non-duplicate metrics are
/// absent from the result rather than zero.
pub fn validate(
    graph: &DetectionGraph,
    duplicates: &[RelationshipPair],
    non_duplicates: Option<&[RelationshipPair]>,
    policy: ValidationPolicy,
) -> ValidationRun {
    let mut aggregator = MetricsAggregator::new();

    let duplicates: Vec<PairResolution> = duplicates
        .iter()
        .map(|pair| {
            let outcome = resolve(graph, &pair.source, &pair.target, policy.duplicate_mode);
            let direct_score = graph
                .edge(pair.source.as_str(), pair.target.as_str())
                .map(|annotation| annotation.score);
            aggregator.record_duplicate(&outcome, direct_score);
            PairResolution {
                pair: pair.clone(),
                outcome,
            }
        })
        .collect();

    let non_duplicates = non_duplicates.map(|pairs| {
        aggregator.evaluate_non_duplicates();
        pairs
            .iter()
            .map(|pair| {
                let outcome =
                    resolve(graph, &pair.source, &pair.target, policy.non_duplicate_mode);
                aggregator.record_non_duplicate(&outcome);
                PairResolution {
                    pair: pair.clone(),
                    outcome,
                }
            })
            .collect()
    });

    ValidationRun {
        policy,
        duplicates,
        non_duplicates,
        metrics: aggregator.finish(),
    }
}
