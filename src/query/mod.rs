use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{FilterOptions, Record, SortDirection, SortField, SortOptions};

/// Select a year's records, narrow them by the active filters and search
/// term, then order them. The input collection is never reordered.
pub(crate) fn query<'a>(
    records: &'a [Record],
    year: i32,
    filters: &FilterOptions,
    search: Option<&str>,
    sort: Option<&SortOptions>,
) -> Vec<&'a Record> {
    let mut rows: Vec<&Record> = records.iter().filter(|r| r.year == year).collect();

    if let Some(category) = filters.category {
        rows.retain(|r| r.category() == category);
    }

    if let Some(paid) = filters.transport_paid {
        rows.retain(|r| r.salary().is_some_and(|s| s.transport_paid == paid));
    }

    if let Some(range) = filters.month_range {
        rows.retain(|r| range.contains(r.year, r.month));
    }

    if let Some(term) = search.filter(|t| !t.is_empty()) {
        let term = term.to_lowercase();
        rows.retain(|r| matches_search(r, &term));
    }

    if let Some(sort) = sort {
        sort_records(&mut rows, sort);
    }

    rows
}

/// `term` must already be lowercase.
fn matches_search(record: &Record, term: &str) -> bool {
    record.notes.to_lowercase().contains(term)
        || record.category().as_str().contains(term)
        || record.year.to_string().contains(term)
        || record.month.to_string().contains(term)
}

/// A sortable field value. Fields a variant does not carry are `None`.
#[derive(Debug, PartialEq, PartialOrd)]
enum SortKey<'a> {
    Int(i64),
    Money(Decimal),
    Text(&'a str),
    Time(DateTime<Utc>),
}

fn sort_key(record: &Record, field: SortField) -> Option<SortKey<'_>> {
    match field {
        SortField::Year => Some(SortKey::Int(i64::from(record.year))),
        SortField::Month => Some(SortKey::Int(i64::from(record.month))),
        SortField::Category => Some(SortKey::Text(record.category().as_str())),
        SortField::Amount => Some(SortKey::Money(record.amount)),
        SortField::SalaryNet => record.salary().map(|s| SortKey::Money(s.salary_net)),
        SortField::SwilePayment => record.salary().map(|s| SortKey::Money(s.swile_payment)),
        SortField::Notes => Some(SortKey::Text(&record.notes)),
        SortField::CreatedAt => Some(SortKey::Time(record.created_at)),
        SortField::UpdatedAt => Some(SortKey::Time(record.updated_at)),
    }
}

/// Missing values compare equal to everything.
fn compare(a: &Record, b: &Record, sort: &SortOptions) -> Ordering {
    let ordering = match (sort_key(a, sort.field), sort_key(b, sort.field)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    };
    match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Stable insertion sort. The comparator treats missing values as equal to
/// everything, which is not a total order, so `slice::sort_by` is not safe
/// to hand it.
fn sort_records(rows: &mut [&Record], sort: &SortOptions) {
    for i in 1..rows.len() {
        let mut j = i;
        while j > 0 && compare(rows[j - 1], rows[j], sort) == Ordering::Greater {
            rows.swap(j - 1, j);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests;
