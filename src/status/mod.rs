use rust_decimal::Decimal;

use crate::models::{MonthStatus, Record, SalaryDetails, YearStatistics};

/// Completeness of one month, derived from its salary record.
pub(crate) fn month_status(records: &[Record], year: i32, month: u32) -> MonthStatus {
    let salary = records
        .iter()
        .filter(|r| r.is_in(year, month))
        .find_map(Record::salary);

    let base = MonthStatus {
        year,
        month,
        has_salary: false,
        has_swile: false,
        has_transport: false,
        not_worked: true,
        is_complete: false,
    };

    match salary {
        None => base,
        // A month explicitly marked as not worked counts as done
        Some(details) if !details.worked => MonthStatus {
            is_complete: true,
            ..base
        },
        Some(details) => {
            let has_salary = details.salary_net > Decimal::ZERO;
            let has_swile = details.swile_payment > Decimal::ZERO;
            MonthStatus {
                has_salary,
                has_swile,
                has_transport: details.transport_paid,
                not_worked: false,
                is_complete: has_salary && has_swile,
                ..base
            }
        }
    }
}

/// Status for January through December, always twelve entries.
pub(crate) fn year_months_status(records: &[Record], year: i32) -> [MonthStatus; 12] {
    std::array::from_fn(|i| month_status(records, year, i as u32 + 1))
}

pub(crate) fn is_month_complete(records: &[Record], year: i32, month: u32) -> bool {
    month_status(records, year, month).is_complete
}

pub(crate) fn completed_months(records: &[Record], year: i32) -> usize {
    year_months_status(records, year)
        .iter()
        .filter(|s| s.is_complete)
        .count()
}

pub(crate) fn year_statistics(records: &[Record], year: i32) -> YearStatistics {
    let in_year: Vec<&Record> = records.iter().filter(|r| r.year == year).collect();
    let salaries: Vec<&SalaryDetails> = in_year.iter().filter_map(|r| r.salary()).collect();
    let worked: Vec<&SalaryDetails> = salaries.iter().copied().filter(|s| s.worked).collect();

    let worked_total: Decimal = worked.iter().map(|s| s.salary_net).sum();
    let average_salary = if worked.is_empty() {
        Decimal::ZERO
    } else {
        worked_total / Decimal::from(worked.len())
    };
    let paid_transport_count = worked.iter().filter(|s| s.transport_paid).count();

    YearStatistics {
        total_entries: in_year.len(),
        worked_months: worked.len(),
        not_worked_months: salaries.len() - worked.len(),
        total_salary: salaries.iter().map(|s| s.salary_net).sum(),
        total_swile_payments: salaries.iter().map(|s| s.swile_payment).sum(),
        average_salary,
        paid_transport_count,
        unpaid_transport_count: worked.len() - paid_transport_count,
    }
}
