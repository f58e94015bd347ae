use rust_decimal::Decimal;

use crate::models::{Category, RecordInput};

pub(crate) const MIN_YEAR: i32 = 1900;
pub(crate) const MAX_YEAR: i32 = 2100;

/// One field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidationError {
    pub(crate) field: &'static str,
    pub(crate) message: String,
}

impl ValidationError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

pub(crate) fn year_in_range(year: i64) -> bool {
    (i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)).contains(&year)
}

pub(crate) fn month_in_range(month: i64) -> bool {
    (1..=12).contains(&month)
}

/// Check a candidate record against the manual-entry rules. Fields that a
/// partial candidate omits are only checked when they are required.
pub(crate) fn validate(candidate: &RecordInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !candidate.year.is_some_and(|y| year_in_range(i64::from(y))) {
        errors.push(ValidationError::new(
            "year",
            format!("Year must be between {MIN_YEAR} and {MAX_YEAR}"),
        ));
    }

    if !candidate.month.is_some_and(|m| month_in_range(i64::from(m))) {
        errors.push(ValidationError::new(
            "month",
            "Month must be between 1 and 12",
        ));
    }

    match candidate.category {
        None => errors.push(ValidationError::new("category", "Category is required")),
        Some(Category::Salary) => {
            if candidate.salary_net.is_some_and(|v| v < Decimal::ZERO) {
                errors.push(ValidationError::new("salaryNet", "Salary cannot be negative"));
            }
            if candidate.swile_payment.is_some_and(|v| v < Decimal::ZERO) {
                errors.push(ValidationError::new(
                    "swilePayment",
                    "Swile payment cannot be negative",
                ));
            }
        }
        Some(_) => {
            if candidate.amount.is_some_and(|v| v <= Decimal::ZERO) {
                errors.push(ValidationError::new(
                    "amount",
                    "Amount must be greater than 0",
                ));
            }
        }
    }

    errors
}

/// Parse a category typed by a user; the error names the accepted values.
pub(crate) fn parse_category(raw: &str) -> Result<Category, ValidationError> {
    Category::parse(raw.trim().to_lowercase().as_str()).ok_or_else(|| {
        ValidationError::new(
            "category",
            format!("Invalid category '{raw}'. Must be: salary, bonus, overtime, or benefits"),
        )
    })
}

pub(crate) fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests;
