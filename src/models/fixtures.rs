#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::*;

pub(crate) fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

pub(crate) fn salary_record(
    id: &str,
    year: i32,
    month: u32,
    salary_net: Decimal,
    swile_payment: Decimal,
    transport_paid: bool,
    worked: bool,
) -> Record {
    Record {
        id: id.into(),
        year,
        month,
        amount: salary_net,
        notes: String::new(),
        created_at: ts("2024-01-01T00:00:00Z"),
        updated_at: ts("2024-01-01T00:00:00Z"),
        kind: RecordKind::Salary(SalaryDetails {
            salary_net,
            swile_payment,
            transport_paid,
            worked,
            transport_default: None,
        }),
    }
}

pub(crate) fn other_record(
    id: &str,
    year: i32,
    month: u32,
    category: Category,
    amount: Decimal,
) -> Record {
    Record {
        id: id.into(),
        year,
        month,
        amount,
        notes: String::new(),
        created_at: ts("2024-01-01T00:00:00Z"),
        updated_at: ts("2024-01-01T00:00:00Z"),
        kind: RecordKind::other(category).unwrap(),
    }
}
