//! Professional mood counters

use super::MoodCounter;

pub(super) const COUNTERS: [MoodCounter; 20] = [
    MoodCounter::positive("supportive"),
    MoodCounter::positive("valued"),
    MoodCounter::positive("engaged"),
    MoodCounter::positive("productive"),
    MoodCounter::positive("recognised"),
    MoodCounter::positive("included"),
    MoodCounter::positive("inspired"),
    MoodCounter::positive("balanced"),
    MoodCounter::positive("collaborative"),
    MoodCounter::positive("fulfilled"),
    MoodCounter::negative("unsupported"),
    MoodCounter::negative("undervalued"),
    MoodCounter::negative("disengaged"),
    MoodCounter::negative("unproductive"),
    MoodCounter::negative("overlooked"),
    MoodCounter::negative("excluded"),
    MoodCounter::negative("uninspired"),
    MoodCounter::negative("overworked"),
    MoodCounter::negative("isolated"),
    MoodCounter::negative("burned_out"),
];
