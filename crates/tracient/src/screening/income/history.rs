//! CSV import of monthly income histories.
//!
//! Accepts ledger exports with `Month,Income` columns, sorts rows into
//! chronological order, and produces the oldest-first series the engine
//! expects regardless of how the export was ordered.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use super::domain::{EmptyHistory, MonthlyIncomeSeries};

#[derive(Debug)]
pub enum HistoryImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidMonth { value: String },
    DuplicateMonth { month: NaiveDate },
    Empty,
}

impl std::fmt::Display for HistoryImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryImportError::Io(err) => write!(f, "failed to read income export: {}", err),
            HistoryImportError::Csv(err) => write!(f, "invalid income CSV data: {}", err),
            HistoryImportError::InvalidMonth { value } => {
                write!(f, "could not parse '{}' as YYYY-MM", value)
            }
            HistoryImportError::DuplicateMonth { month } => {
                write!(f, "month {} appears more than once", month.format("%Y-%m"))
            }
            HistoryImportError::Empty => write!(f, "income export contained no rows"),
        }
    }
}

impl std::error::Error for HistoryImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryImportError::Io(err) => Some(err),
            HistoryImportError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HistoryImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for HistoryImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<EmptyHistory> for HistoryImportError {
    fn from(_: EmptyHistory) -> Self {
        Self::Empty
    }
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Income")]
    income: f64,
}

pub struct IncomeHistoryImporter;

impl IncomeHistoryImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<MonthlyIncomeSeries, HistoryImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<MonthlyIncomeSeries, HistoryImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows: Vec<(NaiveDate, f64)> = Vec::new();
        for record in csv_reader.deserialize::<HistoryRow>() {
            let row = record?;
            let month = parse_month(&row.month)?;
            if rows.iter().any(|(existing, _)| *existing == month) {
                return Err(HistoryImportError::DuplicateMonth { month });
            }
            rows.push((month, row.income));
        }

        if rows.is_empty() {
            return Err(HistoryImportError::Empty);
        }

        rows.sort_by_key(|(month, _)| *month);
        let amounts = rows.into_iter().map(|(_, income)| income).collect();
        Ok(MonthlyIncomeSeries::new(amounts)?)
    }
}

fn parse_month(value: &str) -> Result<NaiveDate, HistoryImportError> {
    let trimmed = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").map_err(|_| {
        HistoryImportError::InvalidMonth {
            value: trimmed.to_string(),
        }
    })
}
