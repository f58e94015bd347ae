use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use super::Ledger;
use crate::error::LedgerError;
use crate::models::{Category, Record, RecordInput};
use crate::validate::{year_in_range, ValidationError, MAX_YEAR, MIN_YEAR};

impl Ledger {
    /// The recurring transport amount for `year`: the snapshot carried by the
    /// most recently updated salary record of that year, or zero.
    pub(crate) fn transport_default(&self, year: i32) -> Decimal {
        self.records
            .iter()
            .filter(|r| r.year == year)
            .filter_map(|r| {
                r.salary()
                    .and_then(|s| s.transport_default)
                    .map(|value| (r.updated_at, value))
            })
            .max_by_key(|(updated_at, _)| *updated_at)
            .map_or(Decimal::ZERO, |(_, value)| value)
    }

    /// Stamp `value` onto every salary record of `year`. Other categories
    /// keep their timestamps. Returns how many records were rewritten.
    pub(crate) fn set_transport_default(
        &mut self,
        year: i32,
        value: Decimal,
    ) -> Result<usize, LedgerError> {
        if !year_in_range(i64::from(year)) {
            return Err(ValidationError::new(
                "year",
                format!("Year must be between {MIN_YEAR} and {MAX_YEAR}"),
            )
            .into());
        }
        if value < Decimal::ZERO {
            return Err(ValidationError::new(
                "transportDefault",
                "Transport default cannot be negative",
            )
            .into());
        }

        let now = Utc::now();
        let mut touched = 0;
        let next: Vec<Record> = self
            .records
            .iter()
            .cloned()
            .map(|mut record| {
                if record.year == year {
                    if let Some(details) = record.salary_mut() {
                        details.transport_default = Some(value);
                        record.touch(now);
                        touched += 1;
                    }
                }
                record
            })
            .collect();

        self.commit(next)?;
        info!("Transport default for {year} set to {value} on {touched} records");
        Ok(touched)
    }

    /// Create a record, pre-filling a salary record's transport snapshot from
    /// the year's current default when the caller left it unset.
    pub(crate) fn create_with_defaults(&mut self, mut input: RecordInput) -> Result<Record, LedgerError> {
        if input.category == Some(Category::Salary) && input.transport_default.is_none() {
            if let Some(year) = input.year {
                let current = self.transport_default(year);
                if current > Decimal::ZERO {
                    input.transport_default = Some(current);
                }
            }
        }
        self.create(input)
    }
}
