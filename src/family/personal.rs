//! Personal mood counters

use super::MoodCounter;

pub(super) const COUNTERS: [MoodCounter; 20] = [
    MoodCounter::positive("calm"),
    MoodCounter::positive("happy"),
    MoodCounter::positive("energetic"),
    MoodCounter::positive("motivated"),
    MoodCounter::positive("confident"),
    MoodCounter::positive("grateful"),
    MoodCounter::positive("content"),
    MoodCounter::positive("relaxed"),
    MoodCounter::positive("optimistic"),
    MoodCounter::positive("rested"),
    MoodCounter::negative("anxious"),
    MoodCounter::negative("sad"),
    MoodCounter::negative("tired"),
    MoodCounter::negative("stressed"),
    MoodCounter::negative("angry"),
    MoodCounter::negative("lonely"),
    MoodCounter::negative("overwhelmed"),
    MoodCounter::negative("frustrated"),
    MoodCounter::negative("irritable"),
    MoodCounter::negative("worried"),
];
