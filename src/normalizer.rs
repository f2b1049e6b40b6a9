//! Percentage normalization
//!
//! This module turns raw totals into bounded percentages.
//! - Two decimal places, half away from zero
//! - Zero denominators yield 0, never NaN or infinity

use crate::types::AggregateTotals;

/// Positive and negative shares of an aggregate, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentageSplit {
    pub positive: f64,
    pub negative: f64,
}

impl PercentageSplit {
    pub const ZERO: PercentageSplit = PercentageSplit {
        positive: 0.0,
        negative: 0.0,
    };
}

/// Normalizer for converting totals to percentages
pub struct Normalizer;

impl Normalizer {
    /// Split totals into positive and negative percentages of `total_all`
    pub fn normalize(totals: &AggregateTotals) -> PercentageSplit {
        PercentageSplit {
            positive: percentage(totals.total_positive, totals.total_all),
            negative: percentage(totals.total_negative, totals.total_all),
        }
    }
}

/// `part / whole * 100`, rounded to two decimals; 0 when `whole` is 0
///
/// Rounding is done on the exact ratio in integer hundredths, so ties such as
/// 23/160 = 14.375 round up to 14.38.
pub fn percentage(part: u64, whole: u64) -> f64 {
    ratio_percentage(u128::from(part), u128::from(whole))
}

/// Mean of `part / whole * 100` over `parts`, rounded once at the end
pub fn mean_percentage(parts: &[u64], whole: u64) -> f64 {
    let total: u128 = parts.iter().map(|p| u128::from(*p)).sum();
    let count = parts.len() as u128;
    ratio_percentage(total, u128::from(whole).saturating_mul(count))
}

fn ratio_percentage(part: u128, whole: u128) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    // twice the value in hundredths, so the half bit survives truncation
    let doubled = part.saturating_mul(20_000) / whole;
    let hundredths = (doubled + 1) / 2;
    finite_or_zero(hundredths as f64 / 100.0)
}

/// Round to two decimal places, half away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Replace NaN and infinities with 0
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
