//! Engine orchestration
//!
//! This module provides the public API of the engine. Each operation resolves
//! the live cohort for a scope, queries its collaborators, and runs the
//! results through aggregation, normalization, classification and
//! combination.
//!
//! Operations are read-only and independent. Within one request the family
//! queries run concurrently, as do the journal source scans; their results are
//! joined before anything is combined.

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::aggregator::{FamilyAggregate, MoodAggregator};
use crate::classifier::BandClassifier;
use crate::cohort::{resolve_cohort, resolve_window, Cohort};
use crate::combiner::ScoreCombiner;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::family::SignalFamily;
use crate::sentiment::{PhraseParticipation, SentimentTallyEngine};
use crate::store::{EventStore, InMemoryStore, JournalSource, UserDirectory};
use crate::types::{
    CompanyId, FamilyMoodReport, OverallScore, SentimentTally, TimeWindow, WellbeingReport,
};

/// Wellbeing scoring engine over a set of read-only collaborators.
///
/// Cloning is cheap; clones share the same collaborators.
#[derive(Clone)]
pub struct WellbeingEngine {
    events: Arc<dyn EventStore>,
    directory: Arc<dyn UserDirectory>,
    journals: Vec<Arc<dyn JournalSource>>,
    config: EngineConfig,
}

impl WellbeingEngine {
    /// Create an engine with no journal sources and default config
    pub fn new(events: Arc<dyn EventStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            events,
            directory,
            journals: Vec::new(),
            config: EngineConfig::default(),
        }
    }

    /// Engine backed entirely by an in-memory store, with every journal kind
    pub fn from_store(store: InMemoryStore) -> Self {
        let journals = store.journal_sources();
        let store = Arc::new(store);
        Self::new(store.clone(), store).with_journal_sources(journals)
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_journal_source(mut self, source: Arc<dyn JournalSource>) -> Self {
        self.journals.push(source);
        self
    }

    pub fn with_journal_sources(
        mut self,
        sources: impl IntoIterator<Item = Arc<dyn JournalSource>>,
    ) -> Self {
        self.journals.extend(sources);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Personal mood score for `scope` over `[start, end)`; `end` defaults to now
    #[instrument(skip(self, scope), fields(scope = %scope))]
    pub async fn aggregate_personal_mood(
        &self,
        scope: CompanyId,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Result<FamilyMoodReport, EngineError> {
        let (cohort, window) = self.prepare(scope, start, end).await?;
        let aggregate = self
            .family_aggregate(SignalFamily::Personal, &cohort, &window)
            .await?;
        Ok(family_report(aggregate, &cohort))
    }

    /// Professional mood score for `scope` over `[start, end)`
    #[instrument(skip(self, scope), fields(scope = %scope))]
    pub async fn aggregate_professional_mood(
        &self,
        scope: CompanyId,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Result<FamilyMoodReport, EngineError> {
        let (cohort, window) = self.prepare(scope, start, end).await?;
        let aggregate = self
            .family_aggregate(SignalFamily::Professional, &cohort, &window)
            .await?;
        Ok(family_report(aggregate, &cohort))
    }

    /// Combined personal and professional score for `scope`
    #[instrument(skip(self, scope), fields(scope = %scope))]
    pub async fn aggregate_overall_score(
        &self,
        scope: CompanyId,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Result<OverallScore, EngineError> {
        let (cohort, window) = self.prepare(scope, start, end).await?;
        let (personal, professional) = tokio::try_join!(
            self.family_aggregate(SignalFamily::Personal, &cohort, &window),
            self.family_aggregate(SignalFamily::Professional, &cohort, &window),
        )?;
        Ok(overall(&personal, &professional))
    }

    /// Journal sentiment tally for `scope`
    #[instrument(skip(self, scope), fields(scope = %scope))]
    pub async fn aggregate_sentiment_tally(
        &self,
        scope: CompanyId,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Result<SentimentTally, EngineError> {
        let (cohort, window) = self.prepare(scope, start, end).await?;
        self.sentiment_tally(&cohort, &window).await
    }

    /// All four results for one scope, computed against a single cohort
    /// snapshot and window
    #[instrument(skip(self, scope), fields(scope = %scope))]
    pub async fn full_report(
        &self,
        scope: CompanyId,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Result<WellbeingReport, EngineError> {
        let (cohort, window) = self.prepare(scope, start, end).await?;
        let (personal, professional, sentiment) = tokio::try_join!(
            self.family_aggregate(SignalFamily::Personal, &cohort, &window),
            self.family_aggregate(SignalFamily::Professional, &cohort, &window),
            self.sentiment_tally(&cohort, &window),
        )?;

        let overall = overall(&personal, &professional);
        Ok(WellbeingReport {
            personal: family_report(personal, &cohort),
            professional: family_report(professional, &cohort),
            overall,
            sentiment,
        })
    }

    /// Validate the window, then resolve the cohort. Nothing else is queried
    /// until both succeed.
    async fn prepare(
        &self,
        scope: CompanyId,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Result<(Cohort, TimeWindow), EngineError> {
        let window = resolve_window(start, end)?;
        let cohort =
            resolve_cohort(self.directory.as_ref(), scope, &self.config.cohort_roles).await?;
        Ok((cohort, window))
    }

    async fn family_aggregate(
        &self,
        family: SignalFamily,
        cohort: &Cohort,
        window: &TimeWindow,
    ) -> Result<FamilyAggregate, EngineError> {
        if cohort.is_empty() {
            debug!(family = family.as_str(), "empty cohort, skipping query");
            return Ok(FamilyAggregate::empty(family));
        }

        let events = self
            .events
            .mood_events(family, &cohort.member_ids(), window)
            .await?;
        let aggregate = MoodAggregator::aggregate(family, cohort, window, &events);

        debug!(
            family = family.as_str(),
            events = aggregate.events_counted,
            positive = aggregate.totals.total_positive,
            negative = aggregate.totals.total_negative,
            "aggregated family"
        );
        Ok(aggregate)
    }

    async fn sentiment_tally(
        &self,
        cohort: &Cohort,
        window: &TimeWindow,
    ) -> Result<SentimentTally, EngineError> {
        let members = cohort.member_ids();
        let scans = self.journals.iter().map(|source| {
            let members = &members;
            async move {
                if cohort.is_empty() {
                    return Ok(PhraseParticipation::new());
                }
                let entries = source.entries_in_window(members, window).await?;
                debug!(
                    source = source.kind().as_str(),
                    entries = entries.len(),
                    "scanned journal source"
                );
                Ok::<_, EngineError>(PhraseParticipation::collect(cohort, window, &entries))
            }
        });

        let participation = try_join_all(scans)
            .await?
            .into_iter()
            .fold(PhraseParticipation::new(), PhraseParticipation::merge);

        let tally = SentimentTallyEngine::tally(&participation, cohort.len());
        info!(
            cohort_size = tally.cohort_size,
            entries = tally.entries_scanned,
            average_positive = tally.average_positive_percentage,
            average_negative = tally.average_negative_percentage,
            "computed sentiment tally"
        );
        Ok(tally)
    }
}

fn family_report(aggregate: FamilyAggregate, cohort: &Cohort) -> FamilyMoodReport {
    let score = BandClassifier::score(&aggregate.totals);
    FamilyMoodReport {
        family: aggregate.family,
        cohort_size: cohort.len(),
        events_counted: aggregate.events_counted,
        totals: aggregate.totals,
        counters: aggregate.counters,
        score,
    }
}

fn overall(personal: &FamilyAggregate, professional: &FamilyAggregate) -> OverallScore {
    let overall = ScoreCombiner::combine(&[
        (personal.family, personal.totals),
        (professional.family, professional.totals),
    ]);
    if overall.sources.is_empty() {
        info!("no mood data in window, overall score is neutral");
    }
    overall
}
