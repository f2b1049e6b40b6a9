//! Cross-family score combination
//!
//! Families are combined by summing raw counts before normalizing, never by
//! averaging per-family percentages. Families without data drop out, so a
//! single family with data passes through unchanged and no data at all gives
//! the neutral score.

use crate::classifier::BandClassifier;
use crate::family::SignalFamily;
use crate::normalizer::{finite_or_zero, round2};
use crate::types::{AggregateTotals, OverallLabel, OverallScore};

/// Combiner for per-family totals
pub struct ScoreCombiner;

impl ScoreCombiner {
    /// Combine any number of family totals into one overall score
    pub fn combine(contributions: &[(SignalFamily, AggregateTotals)]) -> OverallScore {
        let with_data: Vec<&(SignalFamily, AggregateTotals)> = contributions
            .iter()
            .filter(|(_, totals)| totals.has_data())
            .collect();

        let sources = with_data.iter().map(|(family, _)| *family).collect();
        let totals: AggregateTotals = with_data.iter().map(|(_, totals)| *totals).sum();
        let score = BandClassifier::score(&totals);

        let signed =
            signed_overall_percentage(score.percentage_positive, score.percentage_negative);

        OverallScore {
            sources,
            totals,
            percentage_positive: score.percentage_positive,
            percentage_negative: score.percentage_negative,
            signed_overall_percentage: signed,
            label: overall_label(signed),
            score,
        }
    }
}

/// `positive - negative`, with invalid results mapped to 0
pub fn signed_overall_percentage(percentage_positive: f64, percentage_negative: f64) -> f64 {
    finite_or_zero(round2(percentage_positive - percentage_negative))
}

/// Text label for a signed overall percentage
pub fn overall_label(signed_percentage: f64) -> OverallLabel {
    if signed_percentage > 0.0 {
        OverallLabel::Positive
    } else if signed_percentage < 0.0 {
        OverallLabel::Negative
    } else {
        OverallLabel::Neutral
    }
}
