use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

use crate::error::ImportError;
use crate::models::{Category, Record, RecordKind, SalaryDetails};
use crate::validate::{month_in_range, year_in_range};

/// Warnings listed in full by `summary_message`.
const SHOWN_WARNINGS: usize = 5;

/// Outcome of checking an import document. `processed` is `None` only when
/// the document as a whole was rejected.
#[derive(Debug, Clone, Default)]
pub(crate) struct ImportReport {
    pub(crate) is_valid: bool,
    pub(crate) errors: Vec<ImportError>,
    pub(crate) warnings: Vec<String>,
    pub(crate) processed: Option<Vec<Record>>,
    pub(crate) entries_found: usize,
}

impl ImportReport {
    fn rejected(error: ImportError) -> Self {
        Self {
            errors: vec![error],
            ..Self::default()
        }
    }

    pub(crate) fn processed_count(&self) -> usize {
        self.processed.as_ref().map_or(0, Vec::len)
    }

    /// One message for the user: the hard errors, or a processed count with
    /// the first few warnings.
    pub(crate) fn summary_message(&self) -> String {
        if !self.errors.is_empty() {
            return self
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n");
        }

        let mut msg = format!(
            "Processed {} of {} entries",
            self.processed_count(),
            self.entries_found
        );
        if !self.warnings.is_empty() {
            msg.push_str(&format!(" with {} warnings:", self.warnings.len()));
            for warning in self.warnings.iter().take(SHOWN_WARNINGS) {
                msg.push('\n');
                msg.push_str(warning);
            }
            if self.warnings.len() > SHOWN_WARNINGS {
                msg.push_str(&format!(
                    "\n... and {} more",
                    self.warnings.len() - SHOWN_WARNINGS
                ));
            }
        }
        msg
    }
}

pub(crate) struct JsonImporter;

impl JsonImporter {
    /// Whole file into memory; imports are small.
    pub(crate) fn read(path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read import file: {}", path.display()))
    }

    /// Check and normalize an import document. Bad entries become warnings
    /// and are left out; only unparseable text or an unknown top-level shape
    /// rejects the whole document.
    pub(crate) fn validate(text: &str) -> ImportReport {
        Self::validate_at(text, Utc::now())
    }

    fn validate_at(text: &str, now: DateTime<Utc>) -> ImportReport {
        let parsed: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                warn!("Import rejected: {e}");
                return ImportReport::rejected(ImportError::Parse(e.to_string()));
            }
        };

        let Some(entries) = entry_array(&parsed) else {
            warn!("Import rejected: unrecognized document shape");
            return ImportReport::rejected(ImportError::Shape);
        };

        let mut warnings = Vec::new();
        let mut processed = Vec::new();
        for (i, item) in entries.iter().enumerate() {
            match normalize_entry(item, now) {
                Ok((record, notes)) => {
                    warnings.extend(notes.into_iter().map(|w| format!("Entry {}: {w}", i + 1)));
                    processed.push(record);
                }
                Err(reason) => warnings.push(format!("Entry {}: {reason}", i + 1)),
            }
        }

        info!(
            "Import check: {} entries found, {} processed, {} warnings",
            entries.len(),
            processed.len(),
            warnings.len()
        );
        for w in &warnings {
            warn!("{w}");
        }

        ImportReport {
            is_valid: true,
            errors: Vec::new(),
            warnings,
            processed: Some(processed),
            entries_found: entries.len(),
        }
    }
}

/// A bare array, an export document's `yearlyData`, or a legacy `data` array.
fn entry_array(parsed: &Value) -> Option<&Vec<Value>> {
    match parsed {
        Value::Array(entries) => Some(entries),
        Value::Object(map) => map
            .get("yearlyData")
            .and_then(Value::as_array)
            .or_else(|| map.get("data").and_then(Value::as_array)),
        _ => None,
    }
}

/// Normalize one entry. `Err` carries the reason the entry is skipped; the
/// `Ok` list holds problems that do not block it.
fn normalize_entry(item: &Value, now: DateTime<Utc>) -> Result<(Record, Vec<String>), String> {
    let obj = match item {
        Value::Object(map) => map,
        Value::Array(_) => return Err(MISSING_FIELDS.into()),
        _ => return Err("Invalid item structure".into()),
    };

    let (Some(raw_year), Some(raw_month), Some(raw_category)) = (
        present(obj, "year"),
        present(obj, "month"),
        present(obj, "category"),
    ) else {
        return Err(MISSING_FIELDS.into());
    };

    let year = whole_number(raw_year)
        .filter(|y| year_in_range(*y))
        .and_then(|y| i32::try_from(y).ok())
        .ok_or_else(|| format!("Invalid year ({})", display(raw_year)))?;
    let month = whole_number(raw_month)
        .filter(|m| month_in_range(*m))
        .and_then(|m| u32::try_from(m).ok())
        .ok_or_else(|| format!("Invalid month ({})", display(raw_month)))?;
    let category = raw_category
        .as_str()
        .and_then(Category::parse)
        .ok_or_else(|| format!("Invalid category ({})", display(raw_category)))?;

    let mut warnings = Vec::new();

    let (amount, kind) = match RecordKind::other(category) {
        Some(kind) => {
            let amount = present(obj, "amount")
                .and_then(number_of)
                .filter(|a| *a > Decimal::ZERO)
                .ok_or_else(|| "Amount must be greater than 0".to_string())?;
            (amount, kind)
        }
        None => {
            let money = |name: &str| {
                present(obj, name)
                    .and_then(number_of)
                    .unwrap_or(Decimal::ZERO)
            };
            let salary_net = money("salaryNet");
            let swile_payment = money("swilePayment");
            if salary_net < Decimal::ZERO {
                warnings.push("Negative salary amount".to_string());
            }
            if swile_payment < Decimal::ZERO {
                warnings.push("Negative Swile payment".to_string());
            }

            let amount = present(obj, "salaryNet")
                .or_else(|| present(obj, "amount"))
                .and_then(number_of)
                .unwrap_or(Decimal::ZERO);
            let worked = match obj.get("worked") {
                None | Some(Value::Null) => true,
                Some(v) => truthy(v),
            };
            let transport_default = obj
                .get("transportDefault")
                .filter(|v| !v.is_null())
                .and_then(number_of)
                .filter(|d| *d >= Decimal::ZERO);

            let details = SalaryDetails {
                salary_net,
                swile_payment,
                transport_paid: obj.get("transportPaid").is_some_and(truthy),
                worked,
                transport_default,
            };
            (amount, RecordKind::Salary(details))
        }
    };

    let id = match present(obj, "id") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => display(other),
        None => uuid::Uuid::new_v4().to_string(),
    };
    let notes = match present(obj, "notes") {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };
    let created_at = timestamp(obj, "createdAt", now, &mut warnings);
    let updated_at = timestamp(obj, "updatedAt", now, &mut warnings).max(created_at);

    let record = Record {
        id,
        year,
        month,
        amount,
        notes,
        created_at,
        updated_at,
        kind,
    };
    Ok((record, warnings))
}

const MISSING_FIELDS: &str = "Missing required fields (year, month, category)";

/// Field value if present and truthy: not null, false, zero or "".
fn present<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    obj.get(name).filter(|v| truthy(v))
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numeric reading of a JSON value. Numbers go through their text form so
/// 150.55 stays exact. `None` when the value has no numeric reading.
fn number_of(value: &Value) -> Option<Decimal> {
    match value {
        Value::Null => Some(Decimal::ZERO),
        Value::Bool(b) => Some(if *b { Decimal::ONE } else { Decimal::ZERO }),
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(Decimal::ZERO)
            } else {
                parse_decimal(trimmed)
            }
        }
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn whole_number(value: &Value) -> Option<i64> {
    let n = number_of(value)?;
    if n.fract().is_zero() {
        n.to_i64()
    } else {
        None
    }
}

/// RFC 3339, a bare date, or epoch milliseconds. Absent means now; anything
/// unreadable also means now, with a warning.
fn timestamp(
    obj: &Map<String, Value>,
    name: &str,
    now: DateTime<Utc>,
    warnings: &mut Vec<String>,
) -> DateTime<Utc> {
    let Some(raw) = present(obj, name) else {
        return now;
    };
    let parsed = match raw {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|d| d.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|d| d.and_utc())
            }),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    };
    parsed.unwrap_or_else(|| {
        warnings.push(format!("Invalid {name} ({}), using current time", display(raw)));
        now
    })
}

/// Strings without their quotes, everything else as JSON text.
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Hints for text that failed to parse.
pub(crate) fn suggest_json_fixes(text: &str) -> Vec<&'static str> {
    let mut suggestions = Vec::new();
    let trimmed = text.trim();

    if text.contains("undefined") {
        suggestions.push("Replace \"undefined\" values with null or proper values");
    }
    if text.contains("NaN") {
        suggestions.push("Replace \"NaN\" values with valid numbers");
    }
    if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        suggestions.push("JSON should start with { or [");
    }
    if !trimmed.ends_with('}') && !trimmed.ends_with(']') {
        suggestions.push("JSON should end with } or ]");
    }
    if text.contains(",}") || text.contains(",]") {
        suggestions.push("Remove trailing commas before } or ]");
    }

    suggestions
}

#[cfg(test)]
#[path = "json_import_tests.rs"]
mod tests;
