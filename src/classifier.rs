//! Band classification
//!
//! Maps a positive/negative percentage pair onto a dominant polarity and one
//! of five qualitative bands, then onto a narrative key. Classification is
//! pure; the narrative text itself lives with the report assembler.

use crate::normalizer::{Normalizer, PercentageSplit};
use crate::types::{AggregateTotals, Band, Polarity, Score};

/// Upper bounds (inclusive) of the graded bands below `VeryGood`
const VERY_POOR_MAX: f64 = 20.0;
const POOR_MAX: f64 = 40.0;
const AVERAGE_MAX: f64 = 60.0;
const GOOD_MAX: f64 = 80.0;

/// Narrative key for a score with no data behind it
pub const NEUTRAL_NARRATIVE_KEY: &str = "neutral";

const NARRATIVE_KEYS: [(Polarity, Band, &str); 10] = [
    (Polarity::Positive, Band::VeryPoor, "positive.very_poor"),
    (Polarity::Positive, Band::Poor, "positive.poor"),
    (Polarity::Positive, Band::Average, "positive.average"),
    (Polarity::Positive, Band::Good, "positive.good"),
    (Polarity::Positive, Band::VeryGood, "positive.very_good"),
    (Polarity::Negative, Band::VeryPoor, "negative.very_poor"),
    (Polarity::Negative, Band::Poor, "negative.poor"),
    (Polarity::Negative, Band::Average, "negative.average"),
    (Polarity::Negative, Band::Good, "negative.good"),
    (Polarity::Negative, Band::VeryGood, "negative.very_good"),
];

/// Dominant polarity, band, and the magnitude used for banding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub dominant_polarity: Polarity,
    pub band: Band,
    pub magnitude: f64,
}

/// Classifier for percentage pairs
pub struct BandClassifier;

impl BandClassifier {
    /// Classify a percentage pair. Ties resolve to positive.
    pub fn classify(percentage_positive: f64, percentage_negative: f64) -> Classification {
        let (dominant_polarity, magnitude) = if percentage_positive >= percentage_negative {
            (Polarity::Positive, percentage_positive)
        } else {
            (Polarity::Negative, percentage_negative)
        };

        Classification {
            dominant_polarity,
            band: Self::band_for(magnitude),
            magnitude,
        }
    }

    /// Graded band for a magnitude in `[0, 100]`
    pub fn band_for(magnitude: f64) -> Band {
        if magnitude <= VERY_POOR_MAX {
            Band::VeryPoor
        } else if magnitude <= POOR_MAX {
            Band::Poor
        } else if magnitude <= AVERAGE_MAX {
            Band::Average
        } else if magnitude <= GOOD_MAX {
            Band::Good
        } else {
            Band::VeryGood
        }
    }

    /// Normalize and classify totals into a full score
    pub fn score(totals: &AggregateTotals) -> Score {
        if !totals.has_data() {
            return Self::neutral();
        }
        Self::score_split(Normalizer::normalize(totals))
    }

    /// Classify an already-normalized split
    pub fn score_split(split: PercentageSplit) -> Score {
        let classification = Self::classify(split.positive, split.negative);
        Score {
            percentage_positive: split.positive,
            percentage_negative: split.negative,
            dominant_polarity: classification.dominant_polarity,
            band: classification.band,
            magnitude: classification.magnitude,
            narrative_key: narrative_key(classification.dominant_polarity, classification.band)
                .to_string(),
        }
    }

    /// Zero score used when no counter contributed
    pub fn neutral() -> Score {
        Score {
            percentage_positive: 0.0,
            percentage_negative: 0.0,
            dominant_polarity: Polarity::Positive,
            band: Band::Neutral,
            magnitude: 0.0,
            narrative_key: NEUTRAL_NARRATIVE_KEY.to_string(),
        }
    }
}

/// Narrative template key for a polarity and band
pub fn narrative_key(polarity: Polarity, band: Band) -> &'static str {
    NARRATIVE_KEYS
        .iter()
        .find(|(p, b, _)| *p == polarity && *b == band)
        .map(|(_, _, key)| *key)
        .unwrap_or(NEUTRAL_NARRATIVE_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_resolves_to_positive() {
        for p in [0.0, 20.0, 33.33, 50.0, 100.0] {
            let c = BandClassifier::classify(p, p);
            assert_eq!(c.dominant_polarity, Polarity::Positive);
            assert_eq!(c.magnitude, p);
        }
    }

    #[test]
    fn test_negative_dominance_uses_negative_magnitude() {
        let c = BandClassifier::classify(25.0, 75.0);
        assert_eq!(c.dominant_polarity, Polarity::Negative);
        assert_eq!(c.magnitude, 75.0);
        assert_eq!(c.band, Band::Good);
    }

    #[test]
    fn test_band_boundaries_are_gapless() {
        assert_eq!(BandClassifier::band_for(0.0), Band::VeryPoor);
        assert_eq!(BandClassifier::band_for(20.0), Band::VeryPoor);
        assert_eq!(BandClassifier::band_for(20.01), Band::Poor);
        assert_eq!(BandClassifier::band_for(21.0), Band::Poor);
        assert_eq!(BandClassifier::band_for(40.0), Band::Poor);
        assert_eq!(BandClassifier::band_for(40.5), Band::Average);
        assert_eq!(BandClassifier::band_for(60.0), Band::Average);
        assert_eq!(BandClassifier::band_for(60.01), Band::Good);
        assert_eq!(BandClassifier::band_for(80.0), Band::Good);
        assert_eq!(BandClassifier::band_for(80.01), Band::VeryGood);
        assert_eq!(BandClassifier::band_for(100.0), Band::VeryGood);
    }

    #[test]
    fn test_twenty_and_twenty_one_are_adjacent_bands() {
        let low = BandClassifier::classify(20.0, 0.0).band;
        let high = BandClassifier::classify(21.0, 0.0).band;
        assert_eq!(low, Band::VeryPoor);
        assert_eq!(high, Band::Poor);
    }

    #[test]
    fn test_score_without_data_is_neutral() {
        let score = BandClassifier::score(&AggregateTotals::ZERO);
        assert_eq!(score.band, Band::Neutral);
        assert_eq!(score.magnitude, 0.0);
        assert_eq!(score.narrative_key, NEUTRAL_NARRATIVE_KEY);
    }

    #[test]
    fn test_score_picks_narrative_key() {
        let score = BandClassifier::score(&AggregateTotals::new(3, 2));
        assert_eq!(score.percentage_positive, 60.0);
        assert_eq!(score.band, Band::Average);
        assert_eq!(score.narrative_key, "positive.average");
    }

    #[test]
    fn test_every_graded_band_has_a_key_per_polarity() {
        let graded = [
            Band::VeryPoor,
            Band::Poor,
            Band::Average,
            Band::Good,
            Band::VeryGood,
        ];
        for polarity in [Polarity::Positive, Polarity::Negative] {
            for band in graded {
                let key = narrative_key(polarity, band);
                assert!(key.starts_with(polarity.as_str()));
                assert!(key.ends_with(band.as_str()));
            }
        }
        assert_eq!(narrative_key(Polarity::Negative, Band::Neutral), "neutral");
    }
}
