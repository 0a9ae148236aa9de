//! Metrics collection for validation runs

use crate::resolver::ResolutionOutcome;

/// Confusion-matrix counts over the known non-duplicate pairs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NonDuplicateMetrics {
    /// Non-duplicates the detector correctly left unconnected
    pub true_negatives: usize,

    /// Non-duplicates the detector incorrectly connected
    pub false_positives: usize,
}

impl NonDuplicateMetrics {
    /// Total number of non-duplicate pairs evaluated
    pub fn total(&self) -> usize {
        self.true_negatives + self.false_positives
    }
}

/// Detection-quality summary of a validation run
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationMetrics {
    /// Known duplicates the detector connected
    pub true_positives: usize,

    /// Known duplicates the detector missed
    pub false_negatives: usize,

    /// Percentage of known duplicates found (0 when there are none)
    pub success_rate: f64,

    /// Mean direct `source -> target` score over found duplicates
    ///
    /// Pairs found only through a chain carry no score of their own and are
    /// left out. `None` when no found pair had a direct score.
    pub average_score_of_found: Option<f64>,

    /// Present only when a non-duplicate ground truth was evaluated
    pub non_duplicates: Option<NonDuplicateMetrics>,
}

impl ValidationMetrics {
    /// Total number of known duplicate pairs
    pub fn total_duplicates(&self) -> usize {
        self.true_positives + self.false_negatives
    }

    /// Percentage of connected pairs that are real duplicates
    ///
    /// Only defined when non-duplicates were evaluated; 0 when the detector
    /// connected nothing at all.
    pub fn precision(&self) -> Option<f64> {
        self.non_duplicates.map(|nd| {
            percentage(self.true_positives, self.true_positives + nd.false_positives)
        })
    }
}

/// Accumulates resolution outcomes into [`ValidationMetrics`]
///
/// Duplicate and non-duplicate outcomes are recorded separately. The
/// non-duplicate counts stay absent until the first non-duplicate outcome is
/// recorded or [`MetricsAggregator::evaluate_non_duplicates`] is called, so
/// "not evaluated" is distinguishable from "zero false positives".
#[derive(Debug, Clone, Default)]
pub struct MetricsAggregator {
    found: usize,
    total: usize,
    found_scores: Vec<f64>,
    non_duplicates: Option<NonDuplicateMetrics>,
}

impl MetricsAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for a known duplicate pair
    ///
    /// `direct_score` is the detector's score for the pair itself, if it
    /// listed the target as a candidate of the source.
    pub fn record_duplicate(&mut self, outcome: &ResolutionOutcome, direct_score: Option<f64>) {
        self.total += 1;
        if outcome.is_found() {
            self.found += 1;
            if let Some(score) = direct_score {
                self.found_scores.push(score);
            }
        }
    }

    /// Mark the non-duplicate set as evaluated, even if it turns out empty
    pub fn evaluate_non_duplicates(&mut self) {
        self.non_duplicates.get_or_insert_with(NonDuplicateMetrics::default);
    }

    /// Record the outcome for a known non-duplicate pair
    pub fn record_non_duplicate(&mut self, outcome: &ResolutionOutcome) {
        let counts = self
            .non_duplicates
            .get_or_insert_with(NonDuplicateMetrics::default);
        if outcome.is_found() {
            counts.false_positives += 1;
        } else {
            counts.true_negatives += 1;
        }
    }

    /// Produce the final metrics
    pub fn finish(&self) -> ValidationMetrics {
        let average_score_of_found = if self.found_scores.is_empty() {
            None
        } else {
            Some(self.found_scores.iter().sum::<f64>() / self.found_scores.len() as f64)
        };

        ValidationMetrics {
            true_positives: self.found,
            false_negatives: self.total - self.found,
            success_rate: percentage(self.found, self.total),
            average_score_of_found,
            non_duplicates: self.non_duplicates,
        }
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{EdgeAnnotation, MatchType};
    use crate::resolver::ChainLink;
    use crate::IssueKey;

    fn found(score: f64) -> ResolutionOutcome {
        ResolutionOutcome::Found(vec![ChainLink {
            from: IssueKey::new("A").unwrap(),
            to: IssueKey::new("B").unwrap(),
            annotation: Some(EdgeAnnotation {
                match_type: MatchType::DescriptionMatch,
                score,
            }),
        }])
    }

    #[test]
    fn test_empty_ground_truth() {
        let metrics = MetricsAggregator::new().finish();
        assert_eq!(metrics.true_positives, 0);
        assert_eq!(metrics.false_negatives, 0);
        assert_eq!(metrics.success_rate, 0.0);
        assert_eq!(metrics.average_score_of_found, None);
        assert_eq!(metrics.non_duplicates, None);
        assert_eq!(metrics.precision(), None);
    }

    #[test]
    fn test_duplicate_counts() {
        let mut agg = MetricsAggregator::new();
        agg.record_duplicate(&found(0.8), Some(0.8));
        agg.record_duplicate(&found(0.6), Some(0.6));
        agg.record_duplicate(&ResolutionOutcome::NotFound, None);
        agg.record_duplicate(&ResolutionOutcome::NotFound, None);

        let metrics = agg.finish();
        assert_eq!(metrics.true_positives, 2);
        assert_eq!(metrics.false_negatives, 2);
        assert_eq!(metrics.total_duplicates(), 4);
        assert_eq!(metrics.success_rate, 50.0);
        assert!((metrics.average_score_of_found.unwrap() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_nothing_found_has_no_average() {
        let mut agg = MetricsAggregator::new();
        agg.record_duplicate(&ResolutionOutcome::NotFound, None);

        let metrics = agg.finish();
        assert_eq!(metrics.success_rate, 0.0);
        assert!(metrics.average_score_of_found.is_none());
    }

    #[test]
    fn test_chain_only_hits_count_but_carry_no_score() {
        let mut agg = MetricsAggregator::new();
        agg.record_duplicate(&found(0.1), None);
        agg.record_duplicate(&found(0.9), Some(0.9));

        let metrics = agg.finish();
        assert_eq!(metrics.true_positives, 2);
        assert_eq!(metrics.average_score_of_found, Some(0.9));

        let mut chain_only = MetricsAggregator::new();
        chain_only.record_duplicate(&found(0.1), None);
        let metrics = chain_only.finish();
        assert_eq!(metrics.success_rate, 100.0);
        assert_eq!(metrics.average_score_of_found, None);
    }

    #[test]
    fn test_non_duplicate_counts() {
        let mut agg = MetricsAggregator::new();
        agg.record_duplicate(&found(0.9), Some(0.9));
        agg.record_non_duplicate(&found(0.5));
        agg.record_non_duplicate(&ResolutionOutcome::NotFound);
        agg.record_non_duplicate(&ResolutionOutcome::NotFound);

        let metrics = agg.finish();
        let nd = metrics.non_duplicates.unwrap();
        assert_eq!(nd.false_positives, 1);
        assert_eq!(nd.true_negatives, 2);
        assert_eq!(nd.total(), 3);
        assert_eq!(metrics.precision(), Some(50.0));
    }

    #[test]
    fn test_evaluated_but_empty_non_duplicates() {
        let mut agg = MetricsAggregator::new();
        agg.evaluate_non_duplicates();

        let metrics = agg.finish();
        assert_eq!(metrics.non_duplicates, Some(NonDuplicateMetrics::default()));
        assert_eq!(metrics.precision(), Some(0.0));
    }
}
