//! Income-pattern anomaly screening.
//!
//! Raw inputs flow strictly forward: intake clamps the submission, the
//! feature extractor derives a fixed numeric record, the rule bank and the
//! external classifier score it independently, and fusion plus assembly
//! produce one explainable risk assessment. Every stage is a pure function
//! of its inputs, so concurrent requests need no coordination.

pub mod classifier;
pub mod domain;
pub(crate) mod evaluation;
pub mod features;
pub mod history;
pub(crate) mod intake;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use classifier::{AnomalyClassifier, ClassifierError, OfflineClassifier};
pub use domain::{
    AnomalyCategory, AssessmentMode, CaseId, CaseProfile, CaseStatus, CaseSubmission,
    ClassifierSignal, ClassifierVerdict, EmptyHistory, FeatureVector, IncomeTier, JobSector,
    MonthlyIncomeSeries, PatternDescriptor, PaymentModeShares, WorkerContext,
};
pub use evaluation::{FusionPolicy, RiskTier, RuleThresholds, ScreeningEngine};
pub use features::extract_features;
pub use history::{HistoryImportError, IncomeHistoryImporter};
pub use intake::{IntakeError, IntakeGuard, IntakeWarning};
pub use report::{
    category_description, CategoryFinding, PatternSummary, RiskAssessment, VolatilityBand,
};
pub use repository::{
    AlertError, AlertPublisher, CaseRecord, CaseRepository, CaseStatusView, RepositoryError,
    ReviewAlert,
};
pub use router::screening_router;
pub use service::{IncomeScreeningService, ScreeningServiceError};
