use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{Record, RecordJson, RecordKind, SalaryDetails};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExportSummary {
    pub(crate) total_entries: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) total_salary: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) total_swile_payments: Decimal,
    /// Always zero; kept so older readers still find the field.
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) total_transport_payments: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExportDocument {
    pub(crate) export_date: DateTime<Utc>,
    pub(crate) yearly_data: Vec<RecordJson>,
    pub(crate) summary: ExportSummary,
}

/// Export document for one year, or for everything when `year` is `None`.
pub(crate) fn build_export(records: &[Record], year: Option<i32>, now: DateTime<Utc>) -> ExportDocument {
    let selected: Vec<&Record> = records
        .iter()
        .filter(|r| year.map_or(true, |y| r.year == y))
        .collect();
    let salaries: Vec<&SalaryDetails> = selected.iter().filter_map(|r| r.salary()).collect();

    ExportDocument {
        export_date: now,
        yearly_data: selected.iter().map(|r| RecordJson::from(*r)).collect(),
        summary: ExportSummary {
            total_entries: selected.len(),
            total_salary: salaries.iter().map(|s| s.salary_net).sum(),
            total_swile_payments: salaries.iter().map(|s| s.swile_payment).sum(),
            total_transport_payments: Decimal::ZERO,
        },
    }
}

pub(crate) fn export_json(records: &[Record], year: Option<i32>) -> Result<String> {
    let doc = build_export(records, year, Utc::now());
    serde_json::to_string_pretty(&doc).context("Failed to serialize export")
}

pub(crate) fn write_export(path: &Path, json: &str) -> Result<()> {
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write export file: {}", path.display()))
}

/// `salary-data-2024-2025-03-01.json`, or without the year for a full export.
pub(crate) fn default_file_name(year: Option<i32>, today: NaiveDate) -> String {
    match year {
        Some(y) => format!("salary-data-{y}-{}.json", today.format("%Y-%m-%d")),
        None => format!("salary-data-{}.json", today.format("%Y-%m-%d")),
    }
}

/// A small example document in the export layout, for users writing their
/// own import files.
pub(crate) fn sample_json() -> Result<String> {
    let now = Utc::now();
    let salary = Record {
        id: "sample1".into(),
        year: 2024,
        month: 1,
        amount: Decimal::new(2500, 0),
        notes: "January salary".into(),
        created_at: now,
        updated_at: now,
        kind: RecordKind::Salary(SalaryDetails {
            salary_net: Decimal::new(2500, 0),
            swile_payment: Decimal::new(150, 0),
            transport_paid: true,
            worked: true,
            transport_default: None,
        }),
    };
    let bonus = Record {
        id: "sample2".into(),
        amount: Decimal::new(500, 0),
        notes: "Performance bonus".into(),
        kind: RecordKind::Bonus,
        ..salary.clone()
    };

    let doc = build_export(&[salary, bonus], None, now);
    serde_json::to_string_pretty(&doc).context("Failed to serialize sample")
}
