use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::classifier::AnomalyClassifier;
use super::domain::{CaseId, CaseStatus, CaseSubmission, ClassifierSignal};
use super::evaluation::{RiskTier, RuleThresholds, ScreeningEngine};
use super::features::extract_features;
use super::intake::{IntakeError, IntakeGuard};
use super::report::RiskAssessment;
use super::repository::{
    AlertError, AlertPublisher, CaseRecord, CaseRepository, RepositoryError, ReviewAlert,
};

/// Service composing the intake guard, repository, classifier, and engine.
pub struct IncomeScreeningService<R, C, A> {
    guard: IntakeGuard,
    repository: Arc<R>,
    classifier: Arc<C>,
    alerts: Arc<A>,
    engine: Arc<ScreeningEngine>,
}

static CASE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_case_id() -> CaseId {
    let id = CASE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CaseId(format!("case-{id:06}"))
}

impl<R, C, A> IncomeScreeningService<R, C, A>
where
    R: CaseRepository + 'static,
    C: AnomalyClassifier + 'static,
    A: AlertPublisher + 'static,
{
    pub fn new(
        repository: Arc<R>,
        classifier: Arc<C>,
        alerts: Arc<A>,
        thresholds: RuleThresholds,
    ) -> Self {
        Self {
            guard: IntakeGuard,
            repository,
            classifier,
            alerts,
            engine: Arc::new(ScreeningEngine::new(thresholds)),
        }
    }

    pub fn engine(&self) -> &ScreeningEngine {
        &self.engine
    }

    /// Submit a new case, returning the repository-backed record. Intake
    /// clamps rather than rejects; the warnings travel with the record.
    pub fn submit(&self, submission: CaseSubmission) -> Result<CaseRecord, ScreeningServiceError> {
        let (mut profile, warnings) = self.guard.case_from_submission(submission)?;
        let case_id = next_case_id();
        profile.case_id = case_id.clone();

        let record = CaseRecord {
            profile,
            status: CaseStatus::Submitted,
            intake_warnings: warnings,
            assessment: None,
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Assess a submitted case and persist the outcome. Classifier failures
    /// degrade to rule-only mode; they never fail the assessment.
    pub fn assess(&self, case_id: &CaseId) -> Result<RiskAssessment, ScreeningServiceError> {
        let mut record = self
            .repository
            .fetch(case_id)?
            .ok_or(RepositoryError::NotFound)?;

        let features = extract_features(&record.profile.income, &record.profile.patterns);

        let signal = match self.classifier.classify(&features) {
            Ok(verdict) => ClassifierSignal::Scored(verdict),
            Err(err) => {
                warn!(case_id = %case_id.0, %err, "classifier unavailable; rule-only assessment");
                ClassifierSignal::Unavailable
            }
        };

        let assessment = self
            .engine
            .assess_features(&features, &record.profile.patterns, signal);

        record.status = match assessment.tier {
            RiskTier::Low => CaseStatus::Cleared,
            RiskTier::Medium => CaseStatus::Monitoring,
            RiskTier::High => CaseStatus::Flagged,
        };
        record.assessment = Some(assessment.clone());
        self.repository.update(record)?;

        info!(
            case_id = %case_id.0,
            risk_score = assessment.risk_score,
            tier = assessment.tier.label(),
            mode = assessment.mode.label(),
            "case assessed"
        );

        if assessment.tier == RiskTier::High {
            let mut details = BTreeMap::new();
            details.insert(
                "risk_score".to_string(),
                format!("{:.0}", assessment.risk_score),
            );
            details.insert(
                "categories".to_string(),
                assessment
                    .categories
                    .iter()
                    .map(|category| category.label())
                    .collect::<Vec<_>>()
                    .join(","),
            );
            self.alerts.publish(ReviewAlert {
                template: "case_flagged_for_review".to_string(),
                case_id: case_id.clone(),
                details,
            })?;
        }

        Ok(assessment)
    }

    /// Fetch a case and current status for API responses.
    pub fn get(&self, case_id: &CaseId) -> Result<CaseRecord, ScreeningServiceError> {
        let record = self
            .repository
            .fetch(case_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the screening service.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Alert(#[from] AlertError),
}
