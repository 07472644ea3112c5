use crate::infra::{default_rule_thresholds, InMemoryAlertPublisher, InMemoryCaseRepository};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracient::error::AppError;
use tracient::screening::income::{
    extract_features, AnomalyClassifier, CaseSubmission, ClassifierError, ClassifierVerdict,
    FeatureVector, IncomeHistoryImporter, IncomeScreeningService, IncomeTier, JobSector,
    PatternDescriptor, PatternSummary, RiskAssessment, ScreeningEngine, WorkerContext,
};

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Path to a Month,Income CSV export of the worker's ledger
    #[arg(long)]
    pub(crate) history: PathBuf,
    /// Anomaly probability (0..=100) from an external classifier run
    #[arg(long)]
    pub(crate) probability: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Anomaly probability to attribute to the suspicious demo case
    #[arg(long)]
    pub(crate) probability: Option<f64>,
}

/// Classifier stub for CLI runs: scores with the supplied probability, or
/// reports itself unavailable so the engine runs rule-only.
struct CliClassifier {
    probability: Option<f64>,
}

impl AnomalyClassifier for CliClassifier {
    fn classify(&self, _features: &FeatureVector) -> Result<ClassifierVerdict, ClassifierError> {
        match self.probability {
            Some(value) => Ok(ClassifierVerdict::new(value)),
            None => Err(ClassifierError::Unavailable(
                "no classifier configured for this run".to_string(),
            )),
        }
    }
}

pub(crate) fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        history,
        probability,
    } = args;

    let series = IncomeHistoryImporter::from_path(history)?;
    let patterns = PatternDescriptor::default();
    let engine = ScreeningEngine::new(default_rule_thresholds());

    let features = extract_features(&series, &patterns);
    let assessment = engine.assess_with_probability(&series, &patterns, probability);
    let summary = PatternSummary::from_features(&features, &patterns);

    println!("Income screening assessment ({} months)", series.months());
    render_summary(&summary);
    render_assessment(&assessment);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { probability } = args;

    println!("Income screening demo");

    let repository = Arc::new(InMemoryCaseRepository::default());
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let classifier = Arc::new(CliClassifier { probability });
    let service = Arc::new(IncomeScreeningService::new(
        repository,
        classifier,
        alerts.clone(),
        default_rule_thresholds(),
    ));

    for (name, submission) in [
        ("steady construction worker", clean_case()),
        ("suspicious gig worker", suspicious_case()),
    ] {
        println!("\nCase: {name}");
        let record = match service.submit(submission) {
            Ok(record) => record,
            Err(err) => {
                println!("  Submission rejected: {err}");
                continue;
            }
        };
        println!(
            "- Received case {} -> status {}",
            record.profile.case_id.0,
            record.status.label()
        );
        for warning in &record.intake_warnings {
            println!("  Intake warning: {warning}");
        }

        let assessment = match service.assess(&record.profile.case_id) {
            Ok(assessment) => assessment,
            Err(err) => {
                println!("  Assessment unavailable: {err}");
                continue;
            }
        };
        render_assessment(&assessment);

        let view = match service.get(&record.profile.case_id) {
            Ok(record) => record.status_view(),
            Err(err) => {
                println!("  Repository unavailable: {err}");
                continue;
            }
        };
        match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("  Public status payload:\n{json}"),
            Err(err) => println!("  Public status payload unavailable: {err}"),
        }
    }

    let events = alerts.events();
    if events.is_empty() {
        println!("\nReview alerts: none dispatched");
    } else {
        println!("\nReview alerts:");
        for alert in events {
            println!("  - template={} -> {}", alert.template, alert.case_id.0);
        }
    }

    Ok(())
}

fn render_summary(summary: &PatternSummary) {
    println!(
        "- Income CV {:.2} ({})",
        summary.income_cv,
        summary.volatility.label()
    );
    println!(
        "- Largest month-over-month increase: {:.0}%",
        summary.max_mom_increase_pct
    );
    println!("- Velocity change: {:.2}x", summary.velocity_change);
    println!(
        "- Near-threshold share {:.0}% | unverified sources {:.0}%",
        summary.near_threshold_pct * 100.0,
        summary.unverified_rate * 100.0
    );
}

fn render_assessment(assessment: &RiskAssessment) {
    println!(
        "  Risk score {:.0}/100 -> {} tier ({} mode)",
        assessment.risk_score,
        assessment.tier.label(),
        assessment.mode.label()
    );
    println!("  Recommendation: {}", assessment.recommendation);
    if assessment.findings.is_empty() {
        println!("  Findings: none");
    } else {
        println!("  Findings:");
        for finding in &assessment.findings {
            println!(
                "    - {}: {}",
                finding.category.label(),
                finding.description
            );
        }
    }
}

fn clean_case() -> CaseSubmission {
    CaseSubmission {
        worker: WorkerContext {
            sector: JobSector::Construction,
            income_tier: IncomeTier::Low,
            formal_sector: false,
            account_age_months: 30,
        },
        monthly_incomes: vec![11_500.0, 12_000.0, 11_800.0, 12_200.0, 11_900.0, 12_100.0],
        patterns: PatternDescriptor::default(),
    }
}

fn suspicious_case() -> CaseSubmission {
    let mut patterns = PatternDescriptor::default();
    patterns.near_first_threshold_pct = 0.45;
    patterns.unverified_rate = 0.7;
    patterns.weekend_pct = 0.55;
    patterns.max_gap_days = 120.0;
    patterns.first_half_total = 24_000.0;
    patterns.second_half_total = 72_000.0;

    CaseSubmission {
        worker: WorkerContext {
            sector: JobSector::GigWorker,
            income_tier: IncomeTier::Low,
            formal_sector: false,
            account_age_months: 5,
        },
        monthly_incomes: vec![8_000.0, 8_200.0, 7_900.0, 0.0, 0.0, 48_000.0],
        patterns,
    }
}
