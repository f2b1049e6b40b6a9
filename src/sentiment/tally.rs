//! Phrase participation and tally computation

use std::collections::BTreeSet;
use tracing::debug;

use super::vocabulary::{self, VOCABULARY_SIZE};
use crate::cohort::Cohort;
use crate::normalizer::{mean_percentage, percentage};
use crate::schema::JournalEntry;
use crate::types::{Polarity, PhraseScore, SentimentTally, TimeWindow, UserId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PhraseCount {
    users: BTreeSet<UserId>,
    mentions: u64,
}

impl PhraseCount {
    fn merge(&mut self, other: PhraseCount) {
        self.users.extend(other.users);
        self.mentions = self.mentions.saturating_add(other.mentions);
    }
}

/// Per-phrase participant sets for one or more scanned collections
///
/// Participation is presence based: a user who mentions a phrase in ten
/// entries still counts once. Partial results from different collections are
/// combined with [`PhraseParticipation::merge`], which takes the union of the
/// user sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseParticipation {
    positive: Vec<PhraseCount>,
    negative: Vec<PhraseCount>,
    entries_scanned: usize,
}

impl Default for PhraseParticipation {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseParticipation {
    pub fn new() -> Self {
        Self {
            positive: vec![PhraseCount::default(); VOCABULARY_SIZE],
            negative: vec![PhraseCount::default(); VOCABULARY_SIZE],
            entries_scanned: 0,
        }
    }

    /// Collect participation from live entries of cohort members in `window`
    pub fn collect(cohort: &Cohort, window: &TimeWindow, entries: &[JournalEntry]) -> Self {
        let mut participation = Self::new();
        entries
            .iter()
            .filter(|e| {
                !e.is_deleted() && window.contains(&e.created_at) && cohort.contains(&e.user_id)
            })
            .for_each(|e| participation.record(e));
        participation
    }

    /// Record one entry's sentiment map
    pub fn record(&mut self, entry: &JournalEntry) {
        let Some(sentiments) = &entry.sentiments else {
            return;
        };
        self.entries_scanned += 1;

        for (polarity, phrase, magnitude) in sentiments.mentions() {
            let Some(index) = vocabulary::phrase_index(polarity, phrase) else {
                debug!(entry = %entry.id, phrase, "phrase outside vocabulary");
                continue;
            };
            let slot = &mut self.slots_mut(polarity)[index];
            slot.users.insert(entry.user_id);
            slot.mentions = slot.mentions.saturating_add(magnitude);
        }
    }

    /// Union of two partial results
    pub fn merge(mut self, other: PhraseParticipation) -> Self {
        for (mine, theirs) in self.positive.iter_mut().zip(other.positive) {
            mine.merge(theirs);
        }
        for (mine, theirs) in self.negative.iter_mut().zip(other.negative) {
            mine.merge(theirs);
        }
        self.entries_scanned += other.entries_scanned;
        self
    }

    /// Distinct users who mentioned the phrase at `index`
    pub fn participants(&self, polarity: Polarity, index: usize) -> usize {
        self.slots(polarity).get(index).map_or(0, |s| s.users.len())
    }

    /// Summed magnitude for the phrase at `index`
    pub fn mentions(&self, polarity: Polarity, index: usize) -> u64 {
        self.slots(polarity).get(index).map_or(0, |s| s.mentions)
    }

    /// Entries that carried a sentiment map
    pub fn entries_scanned(&self) -> usize {
        self.entries_scanned
    }

    fn slots(&self, polarity: Polarity) -> &[PhraseCount] {
        match polarity {
            Polarity::Positive => &self.positive,
            Polarity::Negative => &self.negative,
        }
    }

    fn slots_mut(&mut self, polarity: Polarity) -> &mut [PhraseCount] {
        match polarity {
            Polarity::Positive => &mut self.positive,
            Polarity::Negative => &mut self.negative,
        }
    }
}

/// Turns participation into per-phrase and composite percentages
pub struct SentimentTallyEngine;

impl SentimentTallyEngine {
    pub fn tally(participation: &PhraseParticipation, cohort_size: usize) -> SentimentTally {
        let positive = Self::phrase_scores(participation, Polarity::Positive, cohort_size);
        let negative = Self::phrase_scores(participation, Polarity::Negative, cohort_size);

        SentimentTally {
            cohort_size,
            entries_scanned: participation.entries_scanned(),
            average_positive_percentage: average(&positive, cohort_size),
            average_negative_percentage: average(&negative, cohort_size),
            positive,
            negative,
        }
    }

    fn phrase_scores(
        participation: &PhraseParticipation,
        polarity: Polarity,
        cohort_size: usize,
    ) -> Vec<PhraseScore> {
        vocabulary::phrases(polarity)
            .iter()
            .enumerate()
            .map(|(index, phrase)| {
                let participants = participation.participants(polarity, index);
                PhraseScore {
                    phrase: phrase.to_string(),
                    participants,
                    mentions: participation.mentions(polarity, index),
                    percentage: percentage(participants as u64, cohort_size as u64),
                }
            })
            .collect()
    }
}

/// Mean over the whole vocabulary; zero-participation phrases count as 0.
/// Averages the exact participation ratios, not the rounded percentages.
fn average(scores: &[PhraseScore], cohort_size: usize) -> f64 {
    let participants: Vec<u64> = scores.iter().map(|s| s.participants as u64).collect();
    mean_percentage(&participants, cohort_size as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{JournalKind, SentimentMap};
    use crate::types::CompanyId;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn entry(user: UserId, positive: &[(&str, i64)], negative: &[(&str, i64)]) -> JournalEntry {
        let mut map = SentimentMap::default();
        for (phrase, count) in positive {
            map.positive.insert(phrase.to_string(), *count);
        }
        for (phrase, count) in negative {
            map.negative.insert(phrase.to_string(), *count);
        }
        JournalEntry {
            id: Uuid::new_v4(),
            user_id: user,
            kind: JournalKind::Reflection,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
            sentiments: Some(map),
            deleted_at: None,
        }
    }

    fn users(n: usize) -> Vec<UserId> {
        (0..n).map(|_| UserId(Uuid::new_v4())).collect()
    }

    fn window() -> TimeWindow {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        TimeWindow::new(start, start + Duration::days(31)).unwrap()
    }

    const TRUST: &str = "I trust my colleagues";
    const UNDERVALUED: &str = "I feel undervalued";

    #[test]
    fn test_participation_is_presence_based() {
        let members = users(10);
        let cohort = Cohort::new(CompanyId(Uuid::new_v4()), members.clone());
        let entries = vec![
            entry(members[0], &[(TRUST, 5)], &[]),
            entry(members[0], &[(TRUST, 1)], &[]),
            entry(members[1], &[(TRUST, 1)], &[]),
        ];

        let participation = PhraseParticipation::collect(&cohort, &window(), &entries);
        let index = vocabulary::phrase_index(Polarity::Positive, TRUST).unwrap();

        assert_eq!(participation.participants(Polarity::Positive, index), 2);
        assert_eq!(participation.mentions(Polarity::Positive, index), 7);

        let tally = SentimentTallyEngine::tally(&participation, cohort.len());
        assert_eq!(tally.positive[index].percentage, 20.0);
        // one phrase at 20%, twenty-four at 0%
        assert_eq!(tally.average_positive_percentage, 0.8);
    }

    #[test]
    fn test_negative_counts_are_magnitudes() {
        let members = users(2);
        let cohort = Cohort::new(CompanyId(Uuid::new_v4()), members.clone());
        let entries = vec![entry(members[0], &[], &[(UNDERVALUED, -4)])];

        let participation = PhraseParticipation::collect(&cohort, &window(), &entries);
        let index = vocabulary::phrase_index(Polarity::Negative, UNDERVALUED).unwrap();

        assert_eq!(participation.participants(Polarity::Negative, index), 1);
        assert_eq!(participation.mentions(Polarity::Negative, index), 4);
    }

    #[test]
    fn test_zero_counts_do_not_participate() {
        let members = users(1);
        let cohort = Cohort::new(CompanyId(Uuid::new_v4()), members.clone());
        let entries = vec![entry(members[0], &[(TRUST, 0)], &[])];

        let participation = PhraseParticipation::collect(&cohort, &window(), &entries);
        let tally = SentimentTallyEngine::tally(&participation, cohort.len());

        assert_eq!(tally.entries_scanned, 1);
        assert!(tally.positive.iter().all(|p| p.participants == 0));
    }

    #[test]
    fn test_unparticipated_phrases_still_count_toward_mean() {
        let members = users(10);
        let cohort = Cohort::new(CompanyId(Uuid::new_v4()), members.clone());
        // every member mentions the same single phrase
        let entries: Vec<_> = members
            .iter()
            .map(|u| entry(*u, &[(TRUST, 1)], &[]))
            .collect();

        let participation = PhraseParticipation::collect(&cohort, &window(), &entries);
        let tally = SentimentTallyEngine::tally(&participation, cohort.len());

        assert_eq!(tally.positive.len(), VOCABULARY_SIZE);
        assert_eq!(tally.negative.len(), VOCABULARY_SIZE);
        assert_eq!(tally.positive.iter().filter(|p| p.percentage == 0.0).count(), 24);
        assert_eq!(tally.average_positive_percentage, 4.0);
        assert_eq!(tally.average_negative_percentage, 0.0);
    }

    #[test]
    fn test_average_uses_exact_ratios() {
        let members = users(7);
        let cohort = Cohort::new(CompanyId(Uuid::new_v4()), members.clone());
        let tagged: Vec<(&str, i64)> = vocabulary::POSITIVE_PHRASES[..17]
            .iter()
            .map(|phrase| (*phrase, 1))
            .collect();
        let entries = vec![entry(members[0], &tagged, &[])];

        let participation = PhraseParticipation::collect(&cohort, &window(), &entries);
        let tally = SentimentTallyEngine::tally(&participation, cohort.len());

        assert_eq!(tally.positive[0].percentage, 14.29);
        // 17/175 = 9.714..., not the 9.72 that 17 rounded 14.29s would give
        assert_eq!(tally.average_positive_percentage, 9.71);
    }

    #[test]
    fn test_mention_sums_saturate() {
        let members = users(2);
        let cohort = Cohort::new(CompanyId(Uuid::new_v4()), members.clone());
        let index = vocabulary::phrase_index(Polarity::Positive, TRUST).unwrap();

        let notes = PhraseParticipation::collect(
            &cohort,
            &window(),
            &[
                entry(members[0], &[(TRUST, i64::MIN)], &[]),
                entry(members[1], &[(TRUST, i64::MIN)], &[]),
            ],
        );
        assert_eq!(notes.mentions(Polarity::Positive, index), u64::MAX);
        assert_eq!(notes.participants(Polarity::Positive, index), 2);

        let goals = PhraseParticipation::collect(
            &cohort,
            &window(),
            &[entry(members[0], &[(TRUST, i64::MAX)], &[])],
        );
        let merged = notes.merge(goals);
        assert_eq!(merged.mentions(Polarity::Positive, index), u64::MAX);

        let tally = SentimentTallyEngine::tally(&merged, cohort.len());
        assert_eq!(tally.positive[index].percentage, 100.0);
        assert_eq!(tally.positive[index].mentions, u64::MAX);
    }

    #[test]
    fn test_empty_cohort_yields_zero_not_nan() {
        let participation = PhraseParticipation::new();
        let tally = SentimentTallyEngine::tally(&participation, 0);

        assert!(tally.positive.iter().all(|p| p.percentage == 0.0));
        assert_eq!(tally.average_positive_percentage, 0.0);
        assert_eq!(tally.average_negative_percentage, 0.0);
    }

    #[test]
    fn test_merge_unions_users_across_sources() {
        let members = users(3);
        let cohort = Cohort::new(CompanyId(Uuid::new_v4()), members.clone());
        let index = vocabulary::phrase_index(Polarity::Positive, TRUST).unwrap();

        let notes = PhraseParticipation::collect(
            &cohort,
            &window(),
            &[entry(members[0], &[(TRUST, 1)], &[]), entry(members[1], &[(TRUST, 1)], &[])],
        );
        let goals = PhraseParticipation::collect(
            &cohort,
            &window(),
            &[entry(members[1], &[(TRUST, 2)], &[])],
        );

        let merged = notes.merge(goals);

        assert_eq!(merged.participants(Polarity::Positive, index), 2);
        assert_eq!(merged.mentions(Polarity::Positive, index), 4);
        assert_eq!(merged.entries_scanned(), 3);
    }

    #[test]
    fn test_collect_ignores_non_members_and_deleted_entries() {
        let members = users(1);
        let cohort = Cohort::new(CompanyId(Uuid::new_v4()), members.clone());
        let mut deleted = entry(members[0], &[(TRUST, 1)], &[]);
        deleted.deleted_at = Some(Utc::now());
        let outsider = entry(UserId(Uuid::new_v4()), &[(TRUST, 1)], &[]);

        let participation = PhraseParticipation::collect(&cohort, &window(), &[deleted, outsider]);

        assert_eq!(participation, PhraseParticipation::new());
    }
}
