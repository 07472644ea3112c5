use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracient::screening::income::{
    AlertError, AlertPublisher, AnomalyCategory, AnomalyClassifier, AssessmentMode, CaseId,
    CaseRecord, CaseRepository, CaseStatus, CaseSubmission, ClassifierError, ClassifierVerdict,
    FeatureVector, IncomeScreeningService, IncomeTier, JobSector, OfflineClassifier,
    PatternDescriptor, RepositoryError, ReviewAlert, RiskTier, RuleThresholds, WorkerContext,
};

#[derive(Default, Clone)]
struct MemoryRepository {
    records: Arc<Mutex<HashMap<CaseId, CaseRecord>>>,
}

impl CaseRepository for MemoryRepository {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.profile.case_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.profile.case_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: CaseRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.profile.case_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, _limit: usize) -> Result<Vec<CaseRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

#[derive(Default, Clone)]
struct MemoryAlerts {
    events: Arc<Mutex<Vec<ReviewAlert>>>,
}

impl MemoryAlerts {
    fn events(&self) -> Vec<ReviewAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertPublisher for MemoryAlerts {
    fn publish(&self, alert: ReviewAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

struct FixedClassifier {
    probability: f64,
}

impl AnomalyClassifier for FixedClassifier {
    fn classify(&self, _features: &FeatureVector) -> Result<ClassifierVerdict, ClassifierError> {
        Ok(ClassifierVerdict::new(self.probability))
    }
}

fn worker() -> WorkerContext {
    WorkerContext {
        sector: JobSector::Construction,
        income_tier: IncomeTier::Low,
        formal_sector: false,
        account_age_months: 18,
    }
}

fn clean_submission() -> CaseSubmission {
    CaseSubmission {
        worker: worker(),
        monthly_incomes: vec![9_500.0, 10_200.0, 9_800.0, 10_100.0, 9_900.0, 10_000.0],
        patterns: PatternDescriptor::default(),
    }
}

fn suspicious_submission() -> CaseSubmission {
    let mut patterns = PatternDescriptor::default();
    patterns.near_first_threshold_pct = 0.45;
    patterns.unverified_rate = 0.7;
    patterns.weekend_pct = 0.55;
    CaseSubmission {
        worker: worker(),
        monthly_incomes: vec![8_000.0, 8_200.0, 7_900.0, 8_100.0, 8_000.0, 48_000.0],
        patterns,
    }
}

#[test]
fn clean_case_clears_in_rule_only_mode() {
    let repository = Arc::new(MemoryRepository::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let service = IncomeScreeningService::new(
        repository.clone(),
        Arc::new(OfflineClassifier),
        alerts.clone(),
        RuleThresholds::default(),
    );

    let record = service.submit(clean_submission()).expect("submission succeeds");
    assert_eq!(record.status, CaseStatus::Submitted);
    assert!(record.intake_warnings.is_empty());

    let assessment = service
        .assess(&record.profile.case_id)
        .expect("assessment succeeds");

    assert_eq!(assessment.mode, AssessmentMode::RuleOnly);
    assert_eq!(assessment.tier, RiskTier::Low);
    assert!(assessment.categories.is_empty());

    let stored = repository
        .fetch(&record.profile.case_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.status, CaseStatus::Cleared);
    assert!(alerts.events().is_empty());
}

#[test]
fn suspicious_case_is_flagged_and_alerted() {
    let repository = Arc::new(MemoryRepository::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let service = IncomeScreeningService::new(
        repository.clone(),
        Arc::new(FixedClassifier { probability: 78.0 }),
        alerts.clone(),
        RuleThresholds::default(),
    );

    let record = service
        .submit(suspicious_submission())
        .expect("submission succeeds");
    let assessment = service
        .assess(&record.profile.case_id)
        .expect("assessment succeeds");

    assert_eq!(assessment.mode, AssessmentMode::Combined);
    assert_eq!(assessment.tier, RiskTier::High);
    assert_eq!(assessment.risk_score, 100.0);
    assert!(assessment.categories.contains(&AnomalyCategory::SuddenSpike));
    assert!(assessment.categories.contains(&AnomalyCategory::Structuring));
    assert!(assessment.categories.contains(&AnomalyCategory::GhostIncome));
    assert!(assessment
        .categories
        .contains(&AnomalyCategory::WeekendHeavy));
    assert_eq!(assessment.findings.len(), assessment.categories.len());

    let stored = repository
        .fetch(&record.profile.case_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.status, CaseStatus::Flagged);

    let events = alerts.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].template, "case_flagged_for_review");
    assert!(events[0].details.contains_key("categories"));
}

#[test]
fn rule_cluster_alone_reaches_monitoring_without_classifier() {
    let repository = Arc::new(MemoryRepository::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let service = IncomeScreeningService::new(
        repository.clone(),
        Arc::new(OfflineClassifier),
        alerts.clone(),
        RuleThresholds::default(),
    );

    let record = service
        .submit(suspicious_submission())
        .expect("submission succeeds");
    let assessment = service
        .assess(&record.profile.case_id)
        .expect("assessment succeeds");

    assert_eq!(assessment.mode, AssessmentMode::RuleOnly);
    assert_eq!(assessment.anomaly_probability, 0.0);
    assert!(assessment.categories.len() >= 4);
    assert!(assessment.risk_score >= 40.0);
    assert!(matches!(
        assessment.tier,
        RiskTier::Medium | RiskTier::High
    ));

    let stored = repository
        .fetch(&record.profile.case_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert!(matches!(
        stored.status,
        CaseStatus::Monitoring | CaseStatus::Flagged
    ));
}
