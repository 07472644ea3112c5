use super::domain::{
    CaseId, CaseProfile, CaseSubmission, EmptyHistory, MonthlyIncomeSeries, PatternDescriptor,
};

/// Non-fatal condition noticed while sanitizing a submission. Surfaced next
/// to the clamped profile so reviewers can see what was adjusted.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum IntakeWarning {
    NegativeIncomeClamped { month_index: usize, amount: f64 },
    RatioClamped { field: String, value: f64 },
    SharesRenormalized { total: f64 },
}

impl std::fmt::Display for IntakeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntakeWarning::NegativeIncomeClamped { month_index, amount } => write!(
                f,
                "negative income {amount} in month {month_index} clamped to zero"
            ),
            IntakeWarning::RatioClamped { field, value } => {
                write!(f, "ratio field '{field}' value {value} clamped into [0,1]")
            }
            IntakeWarning::SharesRenormalized { total } => {
                write!(f, "payment-mode shares summed to {total}; renormalized")
            }
        }
    }
}

/// The only fatal intake condition: everything else is clamped, not rejected,
/// to preserve the total-function guarantee of the engine.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("submission carried no income history")]
    EmptyIncomeHistory(#[from] EmptyHistory),
}

/// Boundary guard turning raw submissions into sanitized case profiles.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    /// Convert an inbound submission into a clamped case profile plus the
    /// warnings describing every adjustment made.
    pub fn case_from_submission(
        &self,
        submission: CaseSubmission,
    ) -> Result<(CaseProfile, Vec<IntakeWarning>), IntakeError> {
        let mut warnings = Vec::new();

        for (month_index, amount) in submission.monthly_incomes.iter().enumerate() {
            if *amount < 0.0 {
                warnings.push(IntakeWarning::NegativeIncomeClamped {
                    month_index,
                    amount: *amount,
                });
            }
        }
        let income = MonthlyIncomeSeries::new(submission.monthly_incomes)?;

        let patterns = clamp_patterns(submission.patterns, &mut warnings);

        let profile = CaseProfile {
            case_id: CaseId("pending".to_string()),
            worker: submission.worker,
            income,
            patterns,
        };

        Ok((profile, warnings))
    }
}

fn clamp_patterns(
    mut patterns: PatternDescriptor,
    warnings: &mut Vec<IntakeWarning>,
) -> PatternDescriptor {
    let ratio_fields: [(&str, &mut f64); 8] = [
        ("weekend_pct", &mut patterns.weekend_pct),
        ("night_hours_pct", &mut patterns.night_hours_pct),
        ("round_amount_pct", &mut patterns.round_amount_pct),
        (
            "near_first_threshold_pct",
            &mut patterns.near_first_threshold_pct,
        ),
        (
            "near_second_threshold_pct",
            &mut patterns.near_second_threshold_pct,
        ),
        ("source_concentration", &mut patterns.source_concentration),
        ("new_source_rate", &mut patterns.new_source_rate),
        ("unverified_rate", &mut patterns.unverified_rate),
    ];

    for (name, value) in ratio_fields {
        if !value.is_finite() || *value < 0.0 || *value > 1.0 {
            warnings.push(IntakeWarning::RatioClamped {
                field: name.to_string(),
                value: *value,
            });
            *value = if value.is_finite() {
                value.clamp(0.0, 1.0)
            } else {
                0.0
            };
        }
    }

    patterns.avg_tx_per_month = non_negative(patterns.avg_tx_per_month);
    patterns.max_tx_per_month = non_negative(patterns.max_tx_per_month);
    patterns.early_half_tx_per_month = non_negative(patterns.early_half_tx_per_month);
    patterns.recent_half_tx_per_month = non_negative(patterns.recent_half_tx_per_month);
    patterns.first_half_total = non_negative(patterns.first_half_total);
    patterns.second_half_total = non_negative(patterns.second_half_total);
    patterns.max_gap_days = non_negative(patterns.max_gap_days);
    patterns.avg_gap_days = non_negative(patterns.avg_gap_days);

    let shares = &mut patterns.payment_modes;
    shares.upi = clamp_share(shares.upi);
    shares.bank_transfer = clamp_share(shares.bank_transfer);
    shares.cash_deposit = clamp_share(shares.cash_deposit);
    shares.cheque = clamp_share(shares.cheque);

    let total = shares.total();
    if total > 1.0 {
        warnings.push(IntakeWarning::SharesRenormalized { total });
        shares.upi /= total;
        shares.bank_transfer /= total;
        shares.cash_deposit /= total;
        shares.cheque /= total;
    }

    patterns
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn clamp_share(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
