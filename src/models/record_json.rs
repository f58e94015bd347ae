use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Category, Record, RecordKind, SalaryDetails};

/// On-disk and export shape of a record: one flat object tagged by `category`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecordJson {
    pub(crate) id: String,
    pub(crate) year: i32,
    pub(crate) month: u32,
    pub(crate) category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) amount: Decimal,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub(crate) salary_net: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub(crate) swile_payment: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) transport_paid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) worked: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub(crate) transport_default: Option<Decimal>,
    #[serde(default)]
    pub(crate) notes: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl From<&Record> for RecordJson {
    fn from(record: &Record) -> Self {
        let salary = record.salary();
        Self {
            id: record.id.clone(),
            year: record.year,
            month: record.month,
            category: record.category(),
            amount: record.amount,
            salary_net: salary.map(|s| s.salary_net),
            swile_payment: salary.map(|s| s.swile_payment),
            transport_paid: salary.map(|s| s.transport_paid),
            worked: salary.map(|s| s.worked),
            transport_default: salary.and_then(|s| s.transport_default),
            notes: record.notes.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl From<RecordJson> for Record {
    fn from(json: RecordJson) -> Self {
        let kind = match RecordKind::other(json.category) {
            Some(kind) => kind,
            None => {
                let defaults = SalaryDetails::default();
                RecordKind::Salary(SalaryDetails {
                    salary_net: json.salary_net.unwrap_or(defaults.salary_net),
                    swile_payment: json.swile_payment.unwrap_or(defaults.swile_payment),
                    transport_paid: json.transport_paid.unwrap_or(defaults.transport_paid),
                    worked: json.worked.unwrap_or(defaults.worked),
                    transport_default: json.transport_default,
                })
            }
        };
        Self {
            id: json.id,
            year: json.year,
            month: json.month,
            amount: json.amount,
            notes: json.notes,
            created_at: json.created_at,
            updated_at: json.updated_at,
            kind,
        }
    }
}
