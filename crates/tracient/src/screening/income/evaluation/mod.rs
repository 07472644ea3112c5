mod config;
pub(crate) mod fusion;
pub(crate) mod rules;

pub use config::{FusionPolicy, RuleThresholds};
pub use fusion::RiskTier;

use super::domain::{ClassifierSignal, FeatureVector, MonthlyIncomeSeries, PatternDescriptor};
use super::features::extract_features;
use super::report::{self, RiskAssessment};

/// Stateless engine applying the rule bank and fusion policy to one case.
///
/// Owns its configuration so thresholds are swappable without touching logic;
/// holds no mutable state, so one engine can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct ScreeningEngine {
    thresholds: RuleThresholds,
    fusion: FusionPolicy,
}

impl ScreeningEngine {
    pub fn new(thresholds: RuleThresholds) -> Self {
        Self::with_fusion(thresholds, FusionPolicy::default())
    }

    pub fn with_fusion(thresholds: RuleThresholds, fusion: FusionPolicy) -> Self {
        Self { thresholds, fusion }
    }

    pub fn thresholds(&self) -> &RuleThresholds {
        &self.thresholds
    }

    /// Full pipeline: extract features, evaluate rules, fuse, assemble.
    pub fn assess(
        &self,
        income: &MonthlyIncomeSeries,
        patterns: &PatternDescriptor,
        signal: ClassifierSignal,
    ) -> RiskAssessment {
        let features = extract_features(income, patterns);
        self.assess_features(&features, patterns, signal)
    }

    /// Variant for callers that already extracted features (the service does
    /// this once so the classifier and the rule bank see the same vector).
    pub fn assess_features(
        &self,
        features: &FeatureVector,
        patterns: &PatternDescriptor,
        signal: ClassifierSignal,
    ) -> RiskAssessment {
        let categories = rules::triggered_categories(features, patterns, &self.thresholds);

        let probability = match signal {
            ClassifierSignal::Scored(verdict) => verdict.probability(),
            ClassifierSignal::Unavailable => 0.0,
        };
        let (risk_score, tier) = fusion::fuse(&self.fusion, probability, categories.len());

        report::assemble(signal, categories, risk_score, tier)
    }

    /// Convenience entry point taking a bare optional probability, for callers
    /// that normalized the classifier output upstream.
    pub fn assess_with_probability(
        &self,
        income: &MonthlyIncomeSeries,
        patterns: &PatternDescriptor,
        probability: Option<f64>,
    ) -> RiskAssessment {
        self.assess(income, patterns, ClassifierSignal::from_probability(probability))
    }
}

impl Default for ScreeningEngine {
    fn default() -> Self {
        Self::new(RuleThresholds::default())
    }
}
