mod storage;
mod transport;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::db::Database;
use crate::error::{LedgerError, StorageError};
use crate::models::{Record, RecordInput, RecordKind, SalaryDetails};
use crate::validate::{validate, ValidationError};

pub(crate) const SALARY_REQUIRED_MESSAGE: &str =
    "A salary entry must exist for this month before adding bonus/overtime/benefits entries";
pub(crate) const DUPLICATE_SALARY_MESSAGE: &str = "A salary entry already exists for this month";

/// Result of merging imported records into the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct MergeOutcome {
    pub(crate) added: usize,
    pub(crate) skipped: usize,
}

/// The in-memory collection and the store it mirrors to. Every mutation
/// writes the whole collection; the in-memory copy only changes once that
/// write has succeeded.
pub(crate) struct Ledger {
    db: Database,
    storage_key: String,
    records: Vec<Record>,
    load_error: Option<String>,
}

impl Ledger {
    pub(crate) fn open(db: Database, storage_key: impl Into<String>) -> Result<Self, StorageError> {
        let mut ledger = Self {
            db,
            storage_key: storage_key.into(),
            records: Vec::new(),
            load_error: None,
        };
        ledger.reload()?;
        Ok(ledger)
    }

    /// Re-read the stored collection. Malformed stored text leaves the
    /// collection empty and is kept as the load error. Unreadable entries
    /// are dropped and listed in the load error.
    pub(crate) fn reload(&mut self) -> Result<(), StorageError> {
        match storage::load_records(&self.db, &self.storage_key) {
            Ok(loaded) => {
                info!(
                    "Loaded {} records from '{}'",
                    loaded.records.len(),
                    self.storage_key
                );
                self.load_error = if loaded.skipped.is_empty() {
                    None
                } else {
                    let msg = format!(
                        "Skipped {} unreadable stored entries: {}",
                        loaded.skipped.len(),
                        loaded.skipped.join("; ")
                    );
                    warn!("{msg}");
                    Some(msg)
                };
                self.records = loaded.records;
            }
            Err(err @ StorageError::Corrupt(_)) => {
                warn!("{err}");
                self.records = Vec::new();
                self.load_error = Some(err.to_string());
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }

    pub(crate) fn records(&self) -> &[Record] {
        &self.records
    }

    pub(crate) fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    fn salary_for(&self, year: i32, month: u32) -> Option<&Record> {
        self.records
            .iter()
            .find(|r| r.is_salary() && r.is_in(year, month))
    }

    pub(crate) fn create(&mut self, input: RecordInput) -> Result<Record, LedgerError> {
        let errors = validate(&input);
        if !errors.is_empty() {
            return Err(LedgerError::Validation(errors));
        }

        let now = Utc::now();
        let record = realize(&input, uuid::Uuid::new_v4().to_string(), now, now)?;

        if record.is_salary() {
            if self.salary_for(record.year, record.month).is_some() {
                return Err(ValidationError::new("month", DUPLICATE_SALARY_MESSAGE).into());
            }
        } else if self.salary_for(record.year, record.month).is_none() {
            return Err(ValidationError::new("category", SALARY_REQUIRED_MESSAGE).into());
        }

        let mut next = self.records.clone();
        next.push(record.clone());
        self.commit(next)?;
        info!(
            "Created {} record {} for {}-{:02}",
            record.category(),
            record.id,
            record.year,
            record.month
        );
        Ok(record)
    }

    /// Merge `patch` onto the existing record and re-validate the merged
    /// result. The salary-first rule is not re-checked here.
    pub(crate) fn update(&mut self, id: &str, patch: &RecordInput) -> Result<Record, LedgerError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        let existing = &self.records[index];

        let merged = existing.to_input().merged_with(patch);
        let errors = validate(&merged);
        if !errors.is_empty() {
            return Err(LedgerError::Validation(errors));
        }

        let updated = realize(&merged, existing.id.clone(), existing.created_at, Utc::now())?;

        if updated.is_salary()
            && self
                .records
                .iter()
                .any(|r| r.id != updated.id && r.is_salary() && r.is_in(updated.year, updated.month))
        {
            return Err(ValidationError::new("month", DUPLICATE_SALARY_MESSAGE).into());
        }

        let mut next = self.records.clone();
        next[index] = updated.clone();
        self.commit(next)?;
        info!("Updated record {}", updated.id);
        Ok(updated)
    }

    /// Remove one record. Absent ids are not an error.
    pub(crate) fn delete(&mut self, id: &str) -> Result<(), LedgerError> {
        self.delete_many(&[id.to_string()]).map(|_| ())
    }

    /// Remove every record whose id is listed; returns how many went.
    pub(crate) fn delete_many(&mut self, ids: &[String]) -> Result<usize, LedgerError> {
        let next: Vec<Record> = self
            .records
            .iter()
            .filter(|r| !ids.contains(&r.id))
            .cloned()
            .collect();
        let removed = self.records.len() - next.len();
        self.commit(next)?;
        info!("Deleted {removed} of {} requested records", ids.len());
        Ok(removed)
    }

    /// Append imported records whose id is not already present. Colliding
    /// ids are dropped without touching the existing record.
    pub(crate) fn merge_imported(&mut self, records: Vec<Record>) -> Result<MergeOutcome, LedgerError> {
        let mut outcome = MergeOutcome::default();
        let mut next = self.records.clone();
        for record in records {
            if next.iter().any(|r| r.id == record.id) {
                outcome.skipped += 1;
            } else {
                next.push(record);
                outcome.added += 1;
            }
        }
        self.commit(next)?;
        info!(
            "Imported {} records, skipped {} existing ids",
            outcome.added, outcome.skipped
        );
        Ok(outcome)
    }

    /// Drop the stored collection entirely.
    pub(crate) fn clear(&mut self) -> Result<(), LedgerError> {
        storage::clear_records(&self.db, &self.storage_key)?;
        self.records.clear();
        self.load_error = None;
        warn!("Cleared all records under '{}'", self.storage_key);
        Ok(())
    }

    fn commit(&mut self, next: Vec<Record>) -> Result<(), StorageError> {
        storage::save_records(&self.db, &self.storage_key, &next)?;
        self.records = next;
        Ok(())
    }
}

/// Build a full record from a validated input. Salary fields missing from the
/// input take their defaults; for salary records `amount` mirrors `salary_net`.
fn realize(
    input: &RecordInput,
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Result<Record, LedgerError> {
    let (Some(year), Some(month), Some(category)) = (input.year, input.month, input.category)
    else {
        return Err(LedgerError::Validation(validate(input)));
    };

    let (amount, kind) = match RecordKind::other(category) {
        Some(kind) => {
            let amount = input
                .amount
                .filter(|a| *a > Decimal::ZERO)
                .ok_or_else(|| ValidationError::new("amount", "Amount must be greater than 0"))?;
            (amount, kind)
        }
        None => {
            let defaults = SalaryDetails::default();
            let details = SalaryDetails {
                salary_net: input.salary_net.unwrap_or(defaults.salary_net),
                swile_payment: input.swile_payment.unwrap_or(defaults.swile_payment),
                transport_paid: input.transport_paid.unwrap_or(defaults.transport_paid),
                worked: input.worked.unwrap_or(defaults.worked),
                transport_default: input.transport_default,
            };
            (details.salary_net, RecordKind::Salary(details))
        }
    };

    Ok(Record {
        id,
        year,
        month,
        amount,
        notes: input.notes.clone().unwrap_or_default(),
        created_at,
        updated_at: updated_at.max(created_at),
        kind,
    })
}
