use serde::{Deserialize, Serialize};

/// Policy constants behind the heuristic rule bank.
///
/// Thresholds are tunable configuration, not structure: swapping them never
/// touches rule logic, and tests can tighten or relax individual dials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleThresholds {
    /// Income coefficient of variation above which volatility is flagged.
    pub income_cv_max: f64,
    /// Month-over-month increase (3.0 = +300%) treated as a sudden spike.
    pub mom_increase_max: f64,
    /// Normalized deviation from the personal mean treated as a pattern break.
    pub mean_deviation_max: f64,
    pub near_first_threshold_max: f64,
    pub near_second_threshold_max: f64,
    pub round_amount_max: f64,
    pub night_hours_max: f64,
    /// Weekend share that, combined with night activity, flags timing.
    pub timing_weekend_max: f64,
    pub velocity_increase_max: f64,
    pub velocity_decrease_min: f64,
    pub burst_ratio_max: f64,
    pub new_source_rate_max: f64,
    pub unverified_rate_max: f64,
    /// Gap length that counts as dormancy when paired with an amount surge.
    pub dormancy_gap_days: f64,
    pub dormancy_amount_change_min: f64,
    /// Weekend share flagged on its own, independent of night activity.
    pub weekend_heavy_max: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            income_cv_max: 0.5,
            mom_increase_max: 3.0,
            mean_deviation_max: 2.0,
            near_first_threshold_max: 0.3,
            near_second_threshold_max: 0.2,
            round_amount_max: 0.6,
            night_hours_max: 0.3,
            timing_weekend_max: 0.5,
            velocity_increase_max: 3.0,
            velocity_decrease_min: 0.3,
            burst_ratio_max: 5.0,
            new_source_rate_max: 0.5,
            unverified_rate_max: 0.5,
            dormancy_gap_days: 90.0,
            dormancy_amount_change_min: 2.0,
            weekend_heavy_max: 0.4,
        }
    }
}

/// How the classifier probability and the rule triggers combine into one
/// bounded risk score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionPolicy {
    /// Points added per distinct triggered category.
    pub rule_weight: f64,
    /// Scores at or above this are HIGH risk.
    pub high_cutoff: f64,
    /// Scores at or above this (below `high_cutoff`) are MEDIUM risk.
    pub medium_cutoff: f64,
}

impl Default for FusionPolicy {
    fn default() -> Self {
        Self {
            rule_weight: 10.0,
            high_cutoff: 70.0,
            medium_cutoff: 40.0,
        }
    }
}
