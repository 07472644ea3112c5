use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{CaseId, CaseProfile, CaseStatus};
use super::intake::IntakeWarning;
use super::report::RiskAssessment;

/// Repository record containing the profile, assessment, and status metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    pub profile: CaseProfile,
    pub status: CaseStatus,
    pub intake_warnings: Vec<IntakeWarning>,
    pub assessment: Option<RiskAssessment>,
}

impl CaseRecord {
    pub fn rationale(&self) -> String {
        match &self.assessment {
            Some(assessment) => assessment.recommendation.clone(),
            None => "pending assessment".to_string(),
        }
    }

    pub fn status_view(&self) -> CaseStatusView {
        CaseStatusView {
            case_id: self.profile.case_id.clone(),
            status: self.status.label(),
            rationale: self.rationale(),
            risk_score: self
                .assessment
                .as_ref()
                .map(|assessment| assessment.risk_score),
            risk_tier: self
                .assessment
                .as_ref()
                .map(|assessment| assessment.tier.label()),
            intake_warnings: self
                .intake_warnings
                .iter()
                .map(|warning| warning.to_string())
                .collect(),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait CaseRepository: Send + Sync {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError>;
    fn update(&self, record: CaseRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<CaseRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound review-queue hooks (case-management or e-mail
/// adapters live behind this seam).
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, alert: ReviewAlert) -> Result<(), AlertError>;
}

/// Alert payload raised when a case lands in the HIGH risk tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewAlert {
    pub template: String,
    pub case_id: CaseId,
    pub details: BTreeMap<String, String>,
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of a case's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct CaseStatusView {
    pub case_id: CaseId,
    pub status: &'static str,
    pub rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_tier: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub intake_warnings: Vec<String>,
}
