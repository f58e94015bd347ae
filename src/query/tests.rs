#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::fixtures::*;
use crate::models::{Category, MonthRange};

fn ids(rows: &[&Record]) -> Vec<String> {
    rows.iter().map(|r| r.id.clone()).collect()
}

fn sample() -> Vec<Record> {
    let mut jan = salary_record("s1", 2024, 1, dec!(2500), dec!(150), true, true);
    jan.notes = "January pay".into();
    let mut mar = salary_record("s3", 2024, 3, dec!(2400), dec!(0), false, true);
    mar.notes = "Late".into();
    let mut bonus = other_record("b3", 2024, 3, Category::Bonus, dec!(500));
    bonus.notes = "Year-end bonus".into();
    vec![
        jan,
        mar,
        bonus,
        other_record("o12", 2024, 12, Category::Overtime, dec!(80)),
        salary_record("old", 2023, 12, dec!(2300), dec!(140), true, true),
    ]
}

#[test]
fn test_scopes_to_year_and_keeps_input_order_without_sort() {
    let records = sample();
    let rows = query(&records, 2024, &FilterOptions::default(), None, None);
    assert_eq!(ids(&rows), vec!["s1", "s3", "b3", "o12"]);
    let rows = query(&records, 2023, &FilterOptions::default(), None, None);
    assert_eq!(ids(&rows), vec!["old"]);
    assert!(query(&records, 2020, &FilterOptions::default(), None, None).is_empty());
}

#[test]
fn test_category_filter() {
    let records = sample();
    let f = FilterOptions {
        category: Some(Category::Bonus),
        ..FilterOptions::default()
    };
    assert_eq!(ids(&query(&records, 2024, &f, None, None)), vec!["b3"]);
}

#[test]
fn test_transport_filter_excludes_other_records() {
    let records = sample();
    let paid = FilterOptions {
        transport_paid: Some(true),
        ..FilterOptions::default()
    };
    assert_eq!(ids(&query(&records, 2024, &paid, None, None)), vec!["s1"]);
    let unpaid = FilterOptions {
        transport_paid: Some(false),
        ..FilterOptions::default()
    };
    assert_eq!(ids(&query(&records, 2024, &unpaid, None, None)), vec!["s3"]);
}

#[test]
fn test_salary_then_paid_never_returns_other() {
    let records = sample();
    let f = FilterOptions {
        category: Some(Category::Salary),
        transport_paid: Some(true),
        ..FilterOptions::default()
    };
    let rows = query(&records, 2024, &f, None, None);
    assert!(rows.iter().all(|r| r.is_salary()));
}

#[test]
fn test_month_range_filter() {
    let records = sample();
    let f = FilterOptions {
        month_range: Some(MonthRange::new(2024, 2, 2024, 11)),
        ..FilterOptions::default()
    };
    assert_eq!(ids(&query(&records, 2024, &f, None, None)), vec!["s3", "b3"]);

    // Range reaching into another year still only sees the scoped year
    let f = FilterOptions {
        month_range: Some(MonthRange::new(2023, 6, 2024, 1)),
        ..FilterOptions::default()
    };
    assert_eq!(ids(&query(&records, 2024, &f, None, None)), vec!["s1"]);
}

#[test]
fn test_search_matches_any_field_case_insensitively() {
    let records = sample();
    let none = FilterOptions::default();
    assert_eq!(ids(&query(&records, 2024, &none, Some("JANUARY"), None)), vec!["s1"]);
    assert_eq!(ids(&query(&records, 2024, &none, Some("over"), None)), vec!["o12"]);
    // "12" hits the month of o12; "2024" hits every year
    assert_eq!(ids(&query(&records, 2024, &none, Some("12"), None)), vec!["o12"]);
    assert_eq!(query(&records, 2024, &none, Some("2024"), None).len(), 4);
    // "bonus" hits the category of b3 and nothing else
    assert_eq!(ids(&query(&records, 2024, &none, Some("bonus"), None)), vec!["b3"]);
    assert_eq!(query(&records, 2024, &none, Some(""), None).len(), 4);
}

#[test]
fn test_sort_by_month_desc_is_stable() {
    let records = sample();
    let sort = SortOptions::default();
    let rows = query(&records, 2024, &FilterOptions::default(), None, Some(&sort));
    assert_eq!(ids(&rows), vec!["o12", "s3", "b3", "s1"]);
}

#[test]
fn test_sort_by_amount_asc() {
    let records = sample();
    let sort = SortOptions {
        field: SortField::Amount,
        direction: SortDirection::Asc,
    };
    let rows = query(&records, 2024, &FilterOptions::default(), None, Some(&sort));
    assert_eq!(ids(&rows), vec!["o12", "b3", "s3", "s1"]);
}

#[test]
fn test_sort_by_category_text() {
    let records = sample();
    let sort = SortOptions {
        field: SortField::Category,
        direction: SortDirection::Asc,
    };
    let rows = query(&records, 2024, &FilterOptions::default(), None, Some(&sort));
    assert_eq!(ids(&rows), vec!["b3", "o12", "s1", "s3"]);
}

#[test]
fn test_missing_values_compare_equal() {
    // Only salary records carry salaryNet; the rest never move relative to them
    let records = vec![
        other_record("b", 2024, 1, Category::Bonus, dec!(1)),
        salary_record("s", 2024, 2, dec!(100), dec!(0), false, true),
    ];
    let sort = SortOptions {
        field: SortField::SalaryNet,
        direction: SortDirection::Desc,
    };
    let rows = query(&records, 2024, &FilterOptions::default(), None, Some(&sort));
    assert_eq!(ids(&rows), vec!["b", "s"]);
}

#[test]
fn test_sort_by_salary_net_among_salary_records() {
    let records = sample();
    let f = FilterOptions {
        category: Some(Category::Salary),
        ..FilterOptions::default()
    };
    let sort = SortOptions {
        field: SortField::SalaryNet,
        direction: SortDirection::Asc,
    };
    let rows = query(&records, 2024, &f, None, Some(&sort));
    assert_eq!(ids(&rows), vec!["s3", "s1"]);
}

#[test]
fn test_query_does_not_mutate_input() {
    let records = sample();
    let before = records.clone();
    let _ = query(
        &records,
        2024,
        &FilterOptions::default(),
        Some("a"),
        Some(&SortOptions::default()),
    );
    assert_eq!(records, before);
}
