use serde::{Deserialize, Serialize};

use super::config::FusionPolicy;

/// Discrete risk bucket derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }

    /// Fixed reviewer guidance attached to every assessment at this tier.
    pub const fn recommendation(self) -> &'static str {
        match self {
            RiskTier::High => "immediate review required - unusual patterns detected",
            RiskTier::Medium => "monitoring recommended - some unusual patterns",
            RiskTier::Low => "normal - patterns consistent with history",
        }
    }
}

/// Combine the classifier probability with the distinct-category count.
///
/// Additive and capped on purpose: a confident classifier alone can reach
/// HIGH, and a cluster of rule triggers alone can too, while the output stays
/// on a stable 0..=100 scale no matter how many rules exist. Monotone
/// non-decreasing in both inputs.
pub(crate) fn fuse(
    policy: &FusionPolicy,
    anomaly_probability: f64,
    triggered_count: usize,
) -> (f64, RiskTier) {
    let probability = if anomaly_probability.is_finite() {
        anomaly_probability.clamp(0.0, 100.0)
    } else {
        0.0
    };

    let score = (probability + policy.rule_weight * triggered_count as f64).min(100.0);

    let tier = if score >= policy.high_cutoff {
        RiskTier::High
    } else if score >= policy.medium_cutoff {
        RiskTier::Medium
    } else {
        RiskTier::Low
    };

    (score, tier)
}
