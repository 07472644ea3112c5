use super::common::*;
use crate::screening::income::domain::{AssessmentMode, ClassifierSignal};
use crate::screening::income::evaluation::fusion::fuse;
use crate::screening::income::report::category_description;
use crate::screening::income::{FusionPolicy, RiskTier};

#[test]
fn classifier_alone_reaches_high() {
    let (score, tier) = fuse(&FusionPolicy::default(), 85.0, 0);
    assert_eq!(score, 85.0);
    assert_eq!(tier, RiskTier::High);
}

#[test]
fn rules_alone_reach_medium() {
    let (score, tier) = fuse(&FusionPolicy::default(), 0.0, 4);
    assert_eq!(score, 40.0);
    assert_eq!(tier, RiskTier::Medium);
}

#[test]
fn combined_signals_saturate_at_one_hundred() {
    let (score, tier) = fuse(&FusionPolicy::default(), 60.0, 5);
    assert_eq!(score, 100.0);
    assert_eq!(tier, RiskTier::High);
}

#[test]
fn tier_cutoffs_are_inclusive() {
    assert_eq!(fuse(&FusionPolicy::default(), 70.0, 0).1, RiskTier::High);
    assert_eq!(fuse(&FusionPolicy::default(), 69.9, 0).1, RiskTier::Medium);
    assert_eq!(fuse(&FusionPolicy::default(), 40.0, 0).1, RiskTier::Medium);
    assert_eq!(fuse(&FusionPolicy::default(), 39.9, 0).1, RiskTier::Low);
}

#[test]
fn score_is_monotone_in_trigger_count() {
    let policy = FusionPolicy::default();
    let mut previous = 0.0;
    for count in 0..=13 {
        let (score, _) = fuse(&policy, 25.0, count);
        assert!(score >= previous);
        assert!(score <= 100.0);
        previous = score;
    }
}

#[test]
fn non_finite_probability_is_treated_as_zero() {
    let (score, tier) = fuse(&FusionPolicy::default(), f64::NAN, 2);
    assert_eq!(score, 20.0);
    assert_eq!(tier, RiskTier::Low);
}

#[test]
fn recommendations_follow_tier() {
    assert!(RiskTier::High.recommendation().contains("immediate review"));
    assert!(RiskTier::Medium.recommendation().contains("monitoring"));
    assert!(RiskTier::Low.recommendation().contains("normal"));
}

#[test]
fn assessment_is_idempotent() {
    let engine = engine();
    let patterns = neutral_patterns();

    let first = engine.assess_with_probability(&spike_series(), &patterns, Some(60.0));
    let second = engine.assess_with_probability(&spike_series(), &patterns, Some(60.0));

    assert_eq!(first, second);
}

#[test]
fn unavailable_classifier_yields_rule_only_mode() {
    let engine = engine();
    let assessment = engine.assess(
        &steady_series(),
        &neutral_patterns(),
        ClassifierSignal::Unavailable,
    );

    assert_eq!(assessment.mode, AssessmentMode::RuleOnly);
    assert_eq!(assessment.anomaly_probability, 0.0);
    assert_eq!(assessment.classifier_confidence, 0.0);
    assert!(!assessment.is_anomaly);
    assert_eq!(assessment.risk_score, 0.0);
    assert_eq!(assessment.tier, RiskTier::Low);
    assert!(assessment.categories.is_empty());
    assert!(assessment.findings.is_empty());
}

#[test]
fn scored_classifier_reports_combined_mode() {
    let engine = engine();
    let assessment =
        engine.assess_with_probability(&steady_series(), &neutral_patterns(), Some(85.0));

    assert_eq!(assessment.mode, AssessmentMode::Combined);
    assert_eq!(assessment.anomaly_probability, 85.0);
    assert_eq!(assessment.classifier_confidence, 85.0);
    assert!(assessment.is_anomaly);
    assert_eq!(assessment.risk_score, 85.0);
    assert_eq!(assessment.tier, RiskTier::High);
}

#[test]
fn low_probability_still_carries_high_confidence() {
    let engine = engine();
    let assessment =
        engine.assess_with_probability(&steady_series(), &neutral_patterns(), Some(10.0));

    assert_eq!(assessment.classifier_confidence, 90.0);
    assert!(!assessment.is_anomaly);
    assert_eq!(assessment.tier, RiskTier::Low);
}

#[test]
fn findings_line_up_with_categories() {
    let engine = engine();
    let assessment =
        engine.assess_with_probability(&spike_series(), &neutral_patterns(), Some(60.0));

    assert!(!assessment.categories.is_empty());
    assert_eq!(assessment.findings.len(), assessment.categories.len());
    for finding in &assessment.findings {
        assert!(assessment.categories.contains(&finding.category));
        assert_eq!(
            finding.description,
            category_description(finding.category)
        );
    }
}
