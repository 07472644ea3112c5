//! Feature extraction: raw income history + pattern descriptors to the
//! fixed-schema numeric record consumed by the rule bank and the classifier.
//!
//! Every division is guarded so the extractor is total over its input domain:
//! single-month histories, all-zero incomes, and zeroed descriptors all
//! produce finite features with neutral defaults rather than NaN/Inf.

use super::domain::{FeatureVector, MonthlyIncomeSeries, PatternDescriptor};

/// Offset added inside `log2` so zero-probability shares stay finite.
const ENTROPY_EPSILON: f64 = 1e-10;

/// Derive the feature vector for one screening request. Pure; no I/O.
pub fn extract_features(
    income: &MonthlyIncomeSeries,
    patterns: &PatternDescriptor,
) -> FeatureVector {
    let amounts = income.amounts();
    let mean_income = mean(amounts);
    let std_income = if amounts.len() > 1 {
        population_std(amounts, mean_income)
    } else {
        0.0
    };

    let income_cv = if mean_income > 0.0 {
        std_income / mean_income
    } else {
        0.0
    };

    let (max_mom_increase, max_mom_decrease, avg_mom_change) = mom_changes(amounts);

    let max_deviation_from_mean = if mean_income > 0.0 {
        amounts
            .iter()
            .map(|amount| (amount - mean_income).abs() / mean_income)
            .fold(0.0, f64::max)
    } else {
        0.0
    };

    // The +1 offset keeps the share meaningful for near-zero means while
    // leaving typical incomes effectively unaffected.
    let high_deviation_share = amounts
        .iter()
        .filter(|amount| (**amount - mean_income).abs() / (mean_income + 1.0) > 1.0)
        .count() as f64
        / amounts.len() as f64;

    let avg_tx = non_negative(patterns.avg_tx_per_month);
    let max_tx = non_negative(patterns.max_tx_per_month);
    let frequency_cv = if avg_tx > 0.0 { (max_tx - avg_tx) / avg_tx } else { 0.0 };
    let burst_ratio = if avg_tx > 0.0 { max_tx / avg_tx } else { 1.0 };

    let early = non_negative(patterns.early_half_tx_per_month);
    let recent = non_negative(patterns.recent_half_tx_per_month);
    let velocity_change = if early > 0.0 { recent / early } else { 1.0 };

    let first_half = non_negative(patterns.first_half_total);
    let second_half = non_negative(patterns.second_half_total);
    let amount_change_ratio = if first_half > 0.0 {
        second_half / first_half
    } else {
        1.0
    };

    let max_gap = non_negative(patterns.max_gap_days);
    let avg_gap = non_negative(patterns.avg_gap_days);
    let gap_irregularity = if avg_gap > 0.0 {
        (max_gap - avg_gap).abs() / avg_gap
    } else {
        0.0
    };

    FeatureVector {
        mean_income,
        income_cv,
        max_mom_increase,
        max_mom_decrease,
        avg_mom_change,
        max_deviation_from_mean,
        high_deviation_share,
        frequency_cv,
        velocity_change,
        burst_ratio,
        amount_change_ratio,
        gap_irregularity,
        mode_entropy: mode_entropy(&patterns.payment_modes.as_array()),
    }
}

/// Month-over-month change statistics over chronologically adjacent pairs.
///
/// Each change is `(curr - prev) / (prev + 1)`; the offset prevents blow-up
/// for near-zero months. A single-month history yields all zeros.
fn mom_changes(amounts: &[f64]) -> (f64, f64, f64) {
    if amounts.len() < 2 {
        return (0.0, 0.0, 0.0);
    }

    let changes: Vec<f64> = amounts
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / (pair[0] + 1.0))
        .collect();

    let max_increase = changes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_change = changes.iter().copied().fold(f64::INFINITY, f64::min);
    let avg_change = changes.iter().map(|change| change.abs()).sum::<f64>() / changes.len() as f64;

    (max_increase, min_change.abs(), avg_change)
}

/// Shannon entropy (base 2) over the nonzero payment-mode shares. Higher
/// entropy means more diversified payment channels.
fn mode_entropy(shares: &[f64]) -> f64 {
    let entropy: f64 = shares
        .iter()
        .map(|share| clamp_ratio(*share))
        .filter(|share| *share > 0.0)
        .map(|share| -share * (share + ENTROPY_EPSILON).log2())
        .sum();
    entropy.max(0.0)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std(values: &[f64], mean: f64) -> f64 {
    let variance =
        values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn clamp_ratio(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
