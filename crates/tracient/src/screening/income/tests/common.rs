use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::screening::income::classifier::{AnomalyClassifier, ClassifierError, OfflineClassifier};
use crate::screening::income::domain::{
    CaseId, CaseSubmission, ClassifierVerdict, FeatureVector, IncomeTier, JobSector,
    MonthlyIncomeSeries, PatternDescriptor, WorkerContext,
};
use crate::screening::income::repository::{
    AlertError, AlertPublisher, CaseRecord, CaseRepository, RepositoryError, ReviewAlert,
};
use crate::screening::income::{IncomeScreeningService, RuleThresholds, ScreeningEngine};

pub(super) fn worker() -> WorkerContext {
    WorkerContext {
        sector: JobSector::GigWorker,
        income_tier: IncomeTier::Low,
        formal_sector: false,
        account_age_months: 24,
    }
}

pub(super) fn steady_series() -> MonthlyIncomeSeries {
    MonthlyIncomeSeries::new(vec![10_000.0; 6]).expect("non-empty history")
}

pub(super) fn spike_series() -> MonthlyIncomeSeries {
    MonthlyIncomeSeries::new(vec![
        10_000.0, 10_000.0, 10_000.0, 10_000.0, 10_000.0, 50_000.0,
    ])
    .expect("non-empty history")
}

pub(super) fn neutral_patterns() -> PatternDescriptor {
    PatternDescriptor::default()
}

pub(super) fn submission() -> CaseSubmission {
    CaseSubmission {
        worker: worker(),
        monthly_incomes: vec![10_000.0; 6],
        patterns: neutral_patterns(),
    }
}

pub(super) fn engine() -> ScreeningEngine {
    ScreeningEngine::new(RuleThresholds::default())
}

pub(super) fn build_service() -> (
    IncomeScreeningService<MemoryRepository, OfflineClassifier, MemoryAlerts>,
    Arc<MemoryRepository>,
    Arc<MemoryAlerts>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let service = IncomeScreeningService::new(
        repository.clone(),
        Arc::new(OfflineClassifier),
        alerts.clone(),
        RuleThresholds::default(),
    );
    (service, repository, alerts)
}

pub(super) fn build_scored_service(
    probability: f64,
) -> (
    IncomeScreeningService<MemoryRepository, FixedClassifier, MemoryAlerts>,
    Arc<MemoryRepository>,
    Arc<MemoryAlerts>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let service = IncomeScreeningService::new(
        repository.clone(),
        Arc::new(FixedClassifier { probability }),
        alerts.clone(),
        RuleThresholds::default(),
    );
    (service, repository, alerts)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
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
pub(super) struct MemoryAlerts {
    events: Arc<Mutex<Vec<ReviewAlert>>>,
}

impl MemoryAlerts {
    pub(super) fn events(&self) -> Vec<ReviewAlert> {
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

/// Classifier stub returning a fixed probability for every case.
pub(super) struct FixedClassifier {
    pub(super) probability: f64,
}

impl AnomalyClassifier for FixedClassifier {
    fn classify(&self, _features: &FeatureVector) -> Result<ClassifierVerdict, ClassifierError> {
        Ok(ClassifierVerdict::new(self.probability))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 8192)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
