//! Result assembly: merges the rule triggers and the fused score into the
//! structured, human-explainable assessment handed back to callers.
//!
//! Assembly is idempotent by construction: no randomness, no clock reads, so
//! identical inputs always yield byte-identical assessments.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{
    AnomalyCategory, AssessmentMode, ClassifierSignal, FeatureVector, PatternDescriptor,
};
use super::evaluation::RiskTier;

/// Fixed explanation line for each anomaly category.
pub const fn category_description(category: AnomalyCategory) -> &'static str {
    match category {
        AnomalyCategory::SuddenSpike => "income jumped 3x+ above the personal average",
        AnomalyCategory::HighVolatility => "income varies wildly month-to-month",
        AnomalyCategory::IrregularTiming => {
            "transactions at unusual hours or weekends consistently"
        }
        AnomalyCategory::NewSources => "multiple new income sources appeared suddenly",
        AnomalyCategory::RoundAmounts => "suspiciously round transaction amounts",
        AnomalyCategory::Structuring => "many transactions just below reporting thresholds",
        AnomalyCategory::VelocityChange => "transaction frequency changed dramatically",
        AnomalyCategory::DormantBurst => "large activity after months of inactivity",
        AnomalyCategory::PatternBreak => "a regular payment pattern suddenly broke",
        AnomalyCategory::Layering => "complex in-out transactions obscuring the source",
        AnomalyCategory::GhostIncome => "income from unverifiable or shell sources",
        AnomalyCategory::WeekendHeavy => "unusual concentration of weekend transactions",
        AnomalyCategory::LowVerification => "most income sources are unverified",
    }
}

/// Discrete, explainable contribution to an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryFinding {
    pub category: AnomalyCategory,
    pub description: String,
}

/// Final screening verdict for one case. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Externally supplied anomaly probability (0 when the classifier was
    /// unavailable; check `mode` to tell the two apart).
    pub anomaly_probability: f64,
    pub classifier_confidence: f64,
    pub is_anomaly: bool,
    pub mode: AssessmentMode,
    /// Deduplicated set of triggered categories.
    pub categories: BTreeSet<AnomalyCategory>,
    pub findings: Vec<CategoryFinding>,
    /// Composite risk score, clamped to 0..=100.
    pub risk_score: f64,
    pub tier: RiskTier,
    pub recommendation: String,
}

pub(crate) fn assemble(
    signal: ClassifierSignal,
    categories: BTreeSet<AnomalyCategory>,
    risk_score: f64,
    tier: RiskTier,
) -> RiskAssessment {
    let (anomaly_probability, classifier_confidence, is_anomaly, mode) = match signal {
        ClassifierSignal::Scored(verdict) => (
            verdict.probability(),
            verdict.confidence(),
            verdict.is_anomaly(),
            AssessmentMode::Combined,
        ),
        ClassifierSignal::Unavailable => (0.0, 0.0, false, AssessmentMode::RuleOnly),
    };

    let findings = categories
        .iter()
        .map(|category| CategoryFinding {
            category: *category,
            description: category_description(*category).to_string(),
        })
        .collect();

    RiskAssessment {
        anomaly_probability,
        classifier_confidence,
        is_anomaly,
        mode,
        categories,
        findings,
        risk_score,
        tier,
        recommendation: tier.recommendation().to_string(),
    }
}

/// Stability band for a worker's income coefficient of variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityBand {
    VeryStable,
    NormalVariation,
    HighVolatility,
}

impl VolatilityBand {
    pub fn for_cv(income_cv: f64) -> Self {
        if income_cv < 0.2 {
            VolatilityBand::VeryStable
        } else if income_cv < 0.4 {
            VolatilityBand::NormalVariation
        } else {
            VolatilityBand::HighVolatility
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            VolatilityBand::VeryStable => "very stable income",
            VolatilityBand::NormalVariation => "normal variation",
            VolatilityBand::HighVolatility => "high volatility - unusual",
        }
    }
}

/// Headline metrics surfaced next to an assessment in demos and API replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub income_cv: f64,
    pub volatility: VolatilityBand,
    /// Largest month-over-month increase, as a percentage.
    pub max_mom_increase_pct: f64,
    pub velocity_change: f64,
    pub near_threshold_pct: f64,
    pub unverified_rate: f64,
}

impl PatternSummary {
    pub fn from_features(features: &FeatureVector, patterns: &PatternDescriptor) -> Self {
        Self {
            income_cv: features.income_cv,
            volatility: VolatilityBand::for_cv(features.income_cv),
            max_mom_increase_pct: features.max_mom_increase * 100.0,
            velocity_change: features.velocity_change,
            near_threshold_pct: patterns.near_first_threshold_pct,
            unverified_rate: patterns.unverified_rate,
        }
    }
}
