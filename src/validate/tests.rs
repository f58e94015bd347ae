#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

fn fields(errors: &[ValidationError]) -> Vec<&'static str> {
    errors.iter().map(|e| e.field).collect()
}

#[test]
fn test_valid_salary() {
    let input = RecordInput::salary(2024, 1, dec!(2500), dec!(150), true);
    assert!(validate(&input).is_empty());
}

#[test]
fn test_valid_other() {
    let input = RecordInput::other(2024, 6, Category::Overtime, dec!(0.01));
    assert!(validate(&input).is_empty());
}

#[test]
fn test_year_bounds() {
    for (year, ok) in [(1899, false), (1900, true), (2100, true), (2101, false)] {
        let input = RecordInput::salary(year, 1, dec!(1), dec!(1), false);
        assert_eq!(validate(&input).is_empty(), ok, "year {year}");
    }
}

#[test]
fn test_month_bounds() {
    for (month, ok) in [(0, false), (1, true), (12, true), (13, false)] {
        let input = RecordInput::salary(2024, month, dec!(1), dec!(1), false);
        assert_eq!(validate(&input).is_empty(), ok, "month {month}");
    }
}

#[test]
fn test_required_fields() {
    let errors = validate(&RecordInput::default());
    assert_eq!(fields(&errors), vec!["year", "month", "category"]);
}

#[test]
fn test_negative_salary_fields() {
    let input = RecordInput::salary(2024, 1, dec!(-1), dec!(-0.01), false);
    let errors = validate(&input);
    assert_eq!(fields(&errors), vec!["salaryNet", "swilePayment"]);
    assert_eq!(errors[0].message, "Salary cannot be negative");
}

#[test]
fn test_zero_salary_is_allowed() {
    let input = RecordInput::salary(2024, 1, dec!(0), dec!(0), false);
    assert!(validate(&input).is_empty());
}

#[test]
fn test_salary_fields_optional() {
    let input = RecordInput {
        year: Some(2024),
        month: Some(2),
        category: Some(Category::Salary),
        ..RecordInput::default()
    };
    assert!(validate(&input).is_empty());
}

#[test]
fn test_other_amount_must_be_positive() {
    for amount in [dec!(0), dec!(-5)] {
        let input = RecordInput::other(2024, 1, Category::Bonus, amount);
        let errors = validate(&input);
        assert_eq!(fields(&errors), vec!["amount"]);
        assert_eq!(errors[0].message, "Amount must be greater than 0");
    }
}

#[test]
fn test_other_ignores_salary_fields() {
    let input = RecordInput {
        salary_net: Some(dec!(-100)),
        ..RecordInput::other(2024, 1, Category::Benefits, dec!(10))
    };
    assert!(validate(&input).is_empty());
}

#[test]
fn test_salary_ignores_amount() {
    let input = RecordInput {
        amount: Some(dec!(-100)),
        ..RecordInput::salary(2024, 1, dec!(10), dec!(0), false)
    };
    assert!(validate(&input).is_empty());
}

#[test]
fn test_parse_category() {
    assert_eq!(parse_category("Bonus").unwrap(), Category::Bonus);
    assert_eq!(parse_category(" salary ").unwrap(), Category::Salary);
    let err = parse_category("bogus").unwrap_err();
    assert_eq!(err.field, "category");
    assert!(err.message.contains("bogus"));
}

#[test]
fn test_join_messages() {
    let errors = vec![
        ValidationError::new("year", "a"),
        ValidationError::new("month", "b"),
    ];
    assert_eq!(join_messages(&errors), "a, b");
    assert_eq!(join_messages(&[]), "");
}

#[test]
fn test_range_helpers() {
    assert!(year_in_range(1900));
    assert!(!year_in_range(0));
    assert!(month_in_range(12));
    assert!(!month_in_range(-1));
}
