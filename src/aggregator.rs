//! Mood vector aggregation
//!
//! Sums a family's named counters over the events of a cohort inside a
//! window. Counter values are taken as magnitudes, so each counter adds its
//! absolute value to the polarity it belongs to.

use crate::cohort::Cohort;
use crate::family::SignalFamily;
use crate::schema::MoodEvent;
use crate::types::{AggregateTotals, CounterTotal, Polarity, TimeWindow};

/// Totals and per-counter breakdown for one family
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyAggregate {
    pub family: SignalFamily,
    pub totals: AggregateTotals,
    pub counters: Vec<CounterTotal>,
    pub events_counted: usize,
}

impl FamilyAggregate {
    /// Aggregate for a query that matched nothing
    pub fn empty(family: SignalFamily) -> Self {
        Self {
            family,
            totals: AggregateTotals::ZERO,
            counters: family
                .counters()
                .iter()
                .map(|c| CounterTotal {
                    name: c.name.to_string(),
                    polarity: c.polarity,
                    total: 0,
                })
                .collect(),
            events_counted: 0,
        }
    }
}

/// Aggregator over stored mood events
pub struct MoodAggregator;

impl MoodAggregator {
    /// Aggregate `events` for `family`, keeping only live events of cohort
    /// members whose timestamp falls inside `window`
    pub fn aggregate(
        family: SignalFamily,
        cohort: &Cohort,
        window: &TimeWindow,
        events: &[MoodEvent],
    ) -> FamilyAggregate {
        let mut aggregate = FamilyAggregate::empty(family);

        let matching = events.iter().filter(|e| {
            e.family == family
                && !e.is_deleted()
                && window.contains(&e.recorded_at)
                && cohort.contains(&e.user_id)
        });

        for event in matching {
            for counter in aggregate.counters.iter_mut() {
                counter.total = counter
                    .total
                    .saturating_add(u64::from(event.value(&counter.name).unsigned_abs()));
            }
            aggregate.events_counted += 1;
        }

        let sum_for = |polarity: Polarity| -> u64 {
            aggregate
                .counters
                .iter()
                .filter(|c| c.polarity == polarity)
                .fold(0u64, |sum, c| sum.saturating_add(c.total))
        };
        aggregate.totals =
            AggregateTotals::new(sum_for(Polarity::Positive), sum_for(Polarity::Negative));

        aggregate
    }
}
