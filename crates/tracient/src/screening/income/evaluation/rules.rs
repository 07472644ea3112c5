use std::collections::BTreeSet;

use super::super::domain::{AnomalyCategory, FeatureVector, PatternDescriptor};
use super::config::RuleThresholds;

/// Evaluate the full rule bank against one feature vector.
///
/// Every predicate runs independently and unconditionally; multiple weak
/// signals are expected to co-trigger, and the set union collapses rules that
/// map to the same category. Downstream scoring consumes only the count of
/// distinct categories, so evaluation order is irrelevant.
pub(crate) fn triggered_categories(
    features: &FeatureVector,
    patterns: &PatternDescriptor,
    thresholds: &RuleThresholds,
) -> BTreeSet<AnomalyCategory> {
    let mut categories = BTreeSet::new();

    if features.income_cv > thresholds.income_cv_max {
        categories.insert(AnomalyCategory::HighVolatility);
    }

    if features.max_mom_increase > thresholds.mom_increase_max {
        categories.insert(AnomalyCategory::SuddenSpike);
    }

    if features.max_deviation_from_mean > thresholds.mean_deviation_max {
        categories.insert(AnomalyCategory::PatternBreak);
    }

    if patterns.near_first_threshold_pct > thresholds.near_first_threshold_max
        || patterns.near_second_threshold_pct > thresholds.near_second_threshold_max
    {
        categories.insert(AnomalyCategory::Structuring);
    }

    if patterns.round_amount_pct > thresholds.round_amount_max {
        categories.insert(AnomalyCategory::RoundAmounts);
    }

    if patterns.night_hours_pct > thresholds.night_hours_max
        || patterns.weekend_pct > thresholds.timing_weekend_max
    {
        categories.insert(AnomalyCategory::IrregularTiming);
    }

    if features.velocity_change > thresholds.velocity_increase_max
        || features.velocity_change < thresholds.velocity_decrease_min
    {
        categories.insert(AnomalyCategory::VelocityChange);
    }

    if features.burst_ratio > thresholds.burst_ratio_max {
        categories.insert(AnomalyCategory::DormantBurst);
    }

    if patterns.new_source_rate > thresholds.new_source_rate_max {
        categories.insert(AnomalyCategory::NewSources);
    }

    if patterns.unverified_rate > thresholds.unverified_rate_max {
        categories.insert(AnomalyCategory::GhostIncome);
    }

    // Second, independent dormancy path: a long silent gap followed by a
    // surge in totals. Shares the DormantBurst label with the burst-ratio
    // rule; the set makes the overlap harmless.
    if patterns.max_gap_days > thresholds.dormancy_gap_days
        && features.amount_change_ratio > thresholds.dormancy_amount_change_min
    {
        categories.insert(AnomalyCategory::DormantBurst);
    }

    if patterns.weekend_pct > thresholds.weekend_heavy_max {
        categories.insert(AnomalyCategory::WeekendHeavy);
    }

    categories
}
