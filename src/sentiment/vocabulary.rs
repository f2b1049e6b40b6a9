//! Closed workplace-sentiment vocabularies
//!
//! Journal entries tag sentiment with phrases from these two lists. Anything
//! outside them is not counted.

use crate::types::Polarity;

/// Number of phrases in each vocabulary
pub const VOCABULARY_SIZE: usize = 25;

pub const POSITIVE_PHRASES: [&str; VOCABULARY_SIZE] = [
    "I feel valued by my team",
    "My manager supports me",
    "I have a healthy workload",
    "I feel recognised for my work",
    "I enjoy my daily tasks",
    "I have clear goals",
    "I can balance work and life",
    "I feel included at work",
    "I trust my colleagues",
    "I am learning new skills",
    "I feel motivated at work",
    "I have the resources I need",
    "My opinions are heard",
    "I feel safe to speak up",
    "I am proud of my work",
    "I see a future for myself here",
    "I have flexibility in how I work",
    "My work has purpose",
    "I get useful feedback",
    "I collaborate well with others",
    "I feel energised after work",
    "I am treated fairly",
    "I can focus without interruptions",
    "I feel part of the company culture",
    "I am satisfied with my progress",
];

pub const NEGATIVE_PHRASES: [&str; VOCABULARY_SIZE] = [
    "I feel undervalued",
    "My manager does not support me",
    "My workload is too heavy",
    "My work goes unrecognised",
    "I dread my daily tasks",
    "My goals are unclear",
    "Work takes over my personal life",
    "I feel excluded at work",
    "I do not trust my colleagues",
    "I am not growing",
    "I lack motivation at work",
    "I do not have the resources I need",
    "My opinions are ignored",
    "I am afraid to speak up",
    "I feel my work does not matter",
    "I am thinking about leaving",
    "I have no flexibility",
    "My work feels pointless",
    "I never get feedback",
    "There is conflict in my team",
    "I feel drained after work",
    "I am treated unfairly",
    "I am constantly interrupted",
    "I do not fit the company culture",
    "I feel stuck in my role",
];

/// Phrases for a polarity, in reporting order
pub fn phrases(polarity: Polarity) -> &'static [&'static str; VOCABULARY_SIZE] {
    match polarity {
        Polarity::Positive => &POSITIVE_PHRASES,
        Polarity::Negative => &NEGATIVE_PHRASES,
    }
}

/// Position of a phrase in its vocabulary
pub fn phrase_index(polarity: Polarity, phrase: &str) -> Option<usize> {
    phrases(polarity).iter().position(|p| *p == phrase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_vocabularies_are_disjoint_and_unique() {
        let positive: HashSet<_> = POSITIVE_PHRASES.iter().collect();
        let negative: HashSet<_> = NEGATIVE_PHRASES.iter().collect();

        assert_eq!(positive.len(), VOCABULARY_SIZE);
        assert_eq!(negative.len(), VOCABULARY_SIZE);
        assert!(positive.is_disjoint(&negative));
    }

    #[test]
    fn test_phrase_index_respects_polarity() {
        assert_eq!(
            phrase_index(Polarity::Positive, "I feel valued by my team"),
            Some(0)
        );
        assert_eq!(
            phrase_index(Polarity::Negative, "I feel valued by my team"),
            None
        );
        assert_eq!(
            phrase_index(Polarity::Negative, "I feel stuck in my role"),
            Some(24)
        );
    }
}
