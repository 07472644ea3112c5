use super::domain::{ClassifierVerdict, FeatureVector};

/// Contract for the externally trained anomaly scorer.
///
/// The model, its scaler, and its encoders live outside this crate; the
/// service only consumes the normalized 0..=100 probability. Implementations
/// must be safe to share across threads (loaded once, immutable thereafter).
pub trait AnomalyClassifier: Send + Sync {
    fn classify(&self, features: &FeatureVector) -> Result<ClassifierVerdict, ClassifierError>;
}

/// Failure modes when consulting the classifier. None of these fail the
/// screening; the service degrades to rule-only mode.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier not available: {0}")]
    Unavailable(String),
    #[error("classifier inference failed: {0}")]
    Inference(String),
}

/// Stand-in used when no model artifact is deployed. Always unavailable, so
/// every assessment runs in rule-only mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineClassifier;

impl AnomalyClassifier for OfflineClassifier {
    fn classify(&self, _features: &FeatureVector) -> Result<ClassifierVerdict, ClassifierError> {
        Err(ClassifierError::Unavailable(
            "no model artifact deployed".to_string(),
        ))
    }
}
