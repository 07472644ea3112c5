use serde::{Deserialize, Serialize};

/// Identifier wrapper for screening cases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseId(pub String);

/// Ordered monthly income history, oldest month first.
///
/// Month-over-month computations depend only on adjacency, so the series
/// carries no calendar anchor; the chronological (oldest-first) ordering is
/// the fixed contract every producer must honor. Negative amounts are clamped
/// to zero on construction so downstream arithmetic stays total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlyIncomeSeries(Vec<f64>);

/// Raised when a history is constructed without a single month of data.
#[derive(Debug, thiserror::Error)]
#[error("monthly income history must contain at least one month")]
pub struct EmptyHistory;

impl MonthlyIncomeSeries {
    pub fn new(amounts: Vec<f64>) -> Result<Self, EmptyHistory> {
        if amounts.is_empty() {
            return Err(EmptyHistory);
        }
        let clamped = amounts
            .into_iter()
            .map(|amount| if amount.is_finite() { amount.max(0.0) } else { 0.0 })
            .collect();
        Ok(Self(clamped))
    }

    pub fn amounts(&self) -> &[f64] {
        &self.0
    }

    pub fn months(&self) -> usize {
        self.0.len()
    }
}

/// Share of income arriving through each payment channel.
///
/// Shares are fractions in [0,1]; they need not sum to one (a worker may have
/// channels outside this set), but intake renormalizes when they exceed it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentModeShares {
    pub upi: f64,
    pub bank_transfer: f64,
    pub cash_deposit: f64,
    pub cheque: f64,
}

impl PaymentModeShares {
    pub fn as_array(&self) -> [f64; 4] {
        [self.upi, self.bank_transfer, self.cash_deposit, self.cheque]
    }

    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

impl Default for PaymentModeShares {
    fn default() -> Self {
        Self {
            upi: 0.40,
            bank_transfer: 0.40,
            cash_deposit: 0.15,
            cheque: 0.05,
        }
    }
}

/// Independently reported transaction-behavior statistics for one worker.
///
/// All `*_pct` and `*_rate` fields are fractions in [0,1]. Producers are
/// expected to clamp; the intake guard re-clamps defensively and records a
/// warning when it has to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDescriptor {
    /// Average transactions per month over the observation window.
    pub avg_tx_per_month: f64,
    /// Peak transactions observed in any single month.
    pub max_tx_per_month: f64,
    /// Average transactions per month over the earliest half of the window.
    pub early_half_tx_per_month: f64,
    /// Average transactions per month over the most recent half.
    pub recent_half_tx_per_month: f64,
    pub weekend_pct: f64,
    pub night_hours_pct: f64,
    pub round_amount_pct: f64,
    /// Share of transactions just below the first reporting threshold (₹50k).
    pub near_first_threshold_pct: f64,
    /// Share just below the second reporting threshold (₹2L).
    pub near_second_threshold_pct: f64,
    pub unique_sources: u32,
    pub source_concentration: f64,
    pub new_source_rate: f64,
    pub unverified_rate: f64,
    pub payment_modes: PaymentModeShares,
    /// Total income received in the first half of the observation window.
    pub first_half_total: f64,
    /// Total income received in the second (most recent) half.
    pub second_half_total: f64,
    pub max_gap_days: f64,
    pub avg_gap_days: f64,
}

impl Default for PatternDescriptor {
    /// Neutral baseline matching the documented collection defaults.
    fn default() -> Self {
        Self {
            avg_tx_per_month: 10.0,
            max_tx_per_month: 10.0,
            early_half_tx_per_month: 10.0,
            recent_half_tx_per_month: 10.0,
            weekend_pct: 0.10,
            night_hours_pct: 0.05,
            round_amount_pct: 0.15,
            near_first_threshold_pct: 0.05,
            near_second_threshold_pct: 0.02,
            unique_sources: 2,
            source_concentration: 0.80,
            new_source_rate: 0.10,
            unverified_rate: 0.20,
            payment_modes: PaymentModeShares::default(),
            first_half_total: 0.0,
            second_half_total: 0.0,
            max_gap_days: 45.0,
            avg_gap_days: 15.0,
        }
    }
}

/// Employment sectors tracked for context. Never read by the rule bank;
/// carried so the external classifier and reviewers see the same record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSector {
    AgriculturalLabor,
    Construction,
    DomesticWork,
    Manufacturing,
    RetailTrade,
    Transport,
    Hospitality,
    HealthcareSupport,
    ItServices,
    GovtEmployee,
    SelfEmployed,
    GigWorker,
    SkilledArtisan,
}

impl JobSector {
    pub const fn label(self) -> &'static str {
        match self {
            JobSector::AgriculturalLabor => "agricultural_labor",
            JobSector::Construction => "construction",
            JobSector::DomesticWork => "domestic_work",
            JobSector::Manufacturing => "manufacturing",
            JobSector::RetailTrade => "retail_trade",
            JobSector::Transport => "transport",
            JobSector::Hospitality => "hospitality",
            JobSector::HealthcareSupport => "healthcare_support",
            JobSector::ItServices => "it_services",
            JobSector::GovtEmployee => "govt_employee",
            JobSector::SelfEmployed => "self_employed",
            JobSector::GigWorker => "gig_worker",
            JobSector::SkilledArtisan => "skilled_artisan",
        }
    }
}

/// Broad income band, for reviewer context only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeTier {
    Low,
    Medium,
    High,
}

/// Worker profile context collected alongside the income history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerContext {
    pub sector: JobSector,
    pub income_tier: IncomeTier,
    pub formal_sector: bool,
    pub account_age_months: u16,
}

/// Fixed-schema numeric record derived once per screening request.
///
/// This is the only structure passed to the rule bank and to the external
/// classifier. Every field is guaranteed finite by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub mean_income: f64,
    /// Coefficient of variation: std / mean, 0 when the mean is 0.
    pub income_cv: f64,
    pub max_mom_increase: f64,
    pub max_mom_decrease: f64,
    pub avg_mom_change: f64,
    /// Largest |amount - mean| / mean across the history.
    pub max_deviation_from_mean: f64,
    /// Fraction of months deviating from the mean by more than 1.0x.
    pub high_deviation_share: f64,
    pub frequency_cv: f64,
    /// Recent-half activity rate over early-half rate; 1.0 is neutral.
    pub velocity_change: f64,
    /// Peak monthly transaction count over the average; 1.0 is uniform.
    pub burst_ratio: f64,
    /// Second-half income total over first-half total; 1.0 is neutral.
    pub amount_change_ratio: f64,
    pub gap_irregularity: f64,
    /// Shannon entropy (base 2) of the payment-mode distribution.
    pub mode_entropy: f64,
}

impl FeatureVector {
    /// True when every field is a finite number. The extractor guarantees
    /// this; tests assert it over degenerate inputs.
    pub fn is_finite(&self) -> bool {
        [
            self.mean_income,
            self.income_cv,
            self.max_mom_increase,
            self.max_mom_decrease,
            self.avg_mom_change,
            self.max_deviation_from_mean,
            self.high_deviation_share,
            self.frequency_cv,
            self.velocity_change,
            self.burst_ratio,
            self.amount_change_ratio,
            self.gap_irregularity,
            self.mode_entropy,
        ]
        .iter()
        .all(|value| value.is_finite())
    }
}

/// Closed set of anomaly categories a screening can surface.
///
/// `Layering` and `LowVerification` belong to the vocabulary shared with the
/// external classifier even though no heuristic rule currently emits them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyCategory {
    SuddenSpike,
    HighVolatility,
    IrregularTiming,
    NewSources,
    RoundAmounts,
    Structuring,
    VelocityChange,
    DormantBurst,
    PatternBreak,
    Layering,
    GhostIncome,
    WeekendHeavy,
    LowVerification,
}

impl AnomalyCategory {
    pub const fn label(self) -> &'static str {
        match self {
            AnomalyCategory::SuddenSpike => "sudden_spike",
            AnomalyCategory::HighVolatility => "high_volatility",
            AnomalyCategory::IrregularTiming => "irregular_timing",
            AnomalyCategory::NewSources => "new_sources",
            AnomalyCategory::RoundAmounts => "round_amounts",
            AnomalyCategory::Structuring => "structuring",
            AnomalyCategory::VelocityChange => "velocity_change",
            AnomalyCategory::DormantBurst => "dormant_burst",
            AnomalyCategory::PatternBreak => "pattern_break",
            AnomalyCategory::Layering => "layering",
            AnomalyCategory::GhostIncome => "ghost_income",
            AnomalyCategory::WeekendHeavy => "weekend_heavy",
            AnomalyCategory::LowVerification => "low_verification",
        }
    }
}

/// Probability score returned by the external classifier, on a 0..=100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierVerdict {
    probability: f64,
}

impl ClassifierVerdict {
    pub fn new(probability: f64) -> Self {
        let probability = if probability.is_finite() {
            probability.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self { probability }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Confidence in the verdict regardless of direction.
    pub fn confidence(&self) -> f64 {
        self.probability.max(100.0 - self.probability)
    }

    pub fn is_anomaly(&self) -> bool {
        self.probability >= 50.0
    }
}

/// Outcome of asking the external classifier for a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClassifierSignal {
    Scored(ClassifierVerdict),
    /// Model not deployed or inference failed; screening degrades to
    /// rule-only mode instead of failing.
    Unavailable,
}

impl ClassifierSignal {
    pub fn from_probability(probability: Option<f64>) -> Self {
        match probability {
            Some(value) => Self::Scored(ClassifierVerdict::new(value)),
            None => Self::Unavailable,
        }
    }
}

/// Whether the composite score includes an ML signal, so a genuine low-risk
/// score can be told apart from an absent classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentMode {
    Combined,
    RuleOnly,
}

impl AssessmentMode {
    pub const fn label(self) -> &'static str {
        match self {
            AssessmentMode::Combined => "combined",
            AssessmentMode::RuleOnly => "rule_only",
        }
    }
}

/// High level status tracked throughout the screening workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    Submitted,
    Cleared,
    Monitoring,
    Flagged,
}

impl CaseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CaseStatus::Submitted => "submitted",
            CaseStatus::Cleared => "cleared",
            CaseStatus::Monitoring => "monitoring",
            CaseStatus::Flagged => "flagged",
        }
    }
}

/// The sanitized, clamp-checked case model after intake validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseProfile {
    pub case_id: CaseId,
    pub worker: WorkerContext,
    pub income: MonthlyIncomeSeries,
    pub patterns: PatternDescriptor,
}

/// Raw submission as received from collection layers, prior to clamping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSubmission {
    pub worker: WorkerContext,
    /// Monthly income amounts, oldest month first.
    pub monthly_incomes: Vec<f64>,
    pub patterns: PatternDescriptor,
}
