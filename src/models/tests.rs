#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::fixtures::*;
use super::*;

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_parse() {
    assert_eq!(Category::parse("salary"), Some(Category::Salary));
    assert_eq!(Category::parse("bonus"), Some(Category::Bonus));
    assert_eq!(Category::parse("overtime"), Some(Category::Overtime));
    assert_eq!(Category::parse("benefits"), Some(Category::Benefits));
    assert_eq!(Category::parse("bogus"), None);
    // Wire names are exact
    assert_eq!(Category::parse("Salary"), None);
}

#[test]
fn test_category_roundtrip() {
    for c in &[
        Category::Salary,
        Category::Bonus,
        Category::Overtime,
        Category::Benefits,
    ] {
        assert_eq!(Category::parse(c.as_str()), Some(*c), "Roundtrip failed for {c}");
    }
}

#[test]
fn test_category_display_and_label() {
    assert_eq!(format!("{}", Category::Overtime), "overtime");
    assert_eq!(Category::Overtime.label(), "Overtime");
}

#[test]
fn test_category_serde_lowercase() {
    assert_eq!(
        serde_json::to_string(&Category::Benefits).unwrap(),
        "\"benefits\""
    );
    let c: Category = serde_json::from_str("\"bonus\"").unwrap();
    assert_eq!(c, Category::Bonus);
}

// ── RecordKind ────────────────────────────────────────────────

#[test]
fn test_record_kind_other() {
    assert_eq!(RecordKind::other(Category::Bonus), Some(RecordKind::Bonus));
    assert_eq!(RecordKind::other(Category::Salary), None);
    assert_eq!(RecordKind::Benefits.category(), Category::Benefits);
}

#[test]
fn test_salary_details_default() {
    let d = SalaryDetails::default();
    assert_eq!(d.salary_net, Decimal::ZERO);
    assert_eq!(d.swile_payment, Decimal::ZERO);
    assert!(!d.transport_paid);
    assert!(d.worked);
    assert!(d.transport_default.is_none());
}

// ── Record ────────────────────────────────────────────────────

#[test]
fn test_record_accessors() {
    let r = salary_record("a", 2024, 3, dec!(2500), dec!(150), true, true);
    assert!(r.is_salary());
    assert_eq!(r.category(), Category::Salary);
    assert_eq!(r.salary().unwrap().salary_net, dec!(2500));
    assert!(r.is_in(2024, 3));
    assert!(!r.is_in(2024, 4));

    let b = other_record("b", 2024, 3, Category::Bonus, dec!(300));
    assert!(!b.is_salary());
    assert!(b.salary().is_none());
}

#[test]
fn test_touch_never_precedes_created_at() {
    let mut r = salary_record("a", 2024, 1, dec!(1), dec!(1), false, true);
    r.touch(ts("2023-01-01T00:00:00Z"));
    assert_eq!(r.updated_at, r.created_at);
    r.touch(ts("2025-06-01T12:00:00Z"));
    assert_eq!(r.updated_at, ts("2025-06-01T12:00:00Z"));
}

#[test]
fn test_to_input_carries_every_field() {
    let mut r = salary_record("a", 2024, 5, dec!(2000), dec!(120), true, false);
    r.notes = "May".into();
    r.salary_mut().unwrap().transport_default = Some(dec!(75));
    let input = r.to_input();
    assert_eq!(input.year, Some(2024));
    assert_eq!(input.month, Some(5));
    assert_eq!(input.category, Some(Category::Salary));
    assert_eq!(input.amount, Some(dec!(2000)));
    assert_eq!(input.salary_net, Some(dec!(2000)));
    assert_eq!(input.swile_payment, Some(dec!(120)));
    assert_eq!(input.transport_paid, Some(true));
    assert_eq!(input.worked, Some(false));
    assert_eq!(input.transport_default, Some(dec!(75)));
    assert_eq!(input.notes.as_deref(), Some("May"));
}

#[test]
fn test_to_input_other_has_no_salary_fields() {
    let r = other_record("b", 2024, 5, Category::Overtime, dec!(80));
    let input = r.to_input();
    assert_eq!(input.amount, Some(dec!(80)));
    assert!(input.salary_net.is_none());
    assert!(input.worked.is_none());
}

// ── RecordInput ───────────────────────────────────────────────

#[test]
fn test_input_constructors() {
    let s = RecordInput::salary(2024, 1, dec!(2500), dec!(150), true);
    assert_eq!(s.category, Some(Category::Salary));
    assert_eq!(s.worked, Some(true));

    let skipped = RecordInput::not_worked(2024, 2);
    assert_eq!(skipped.worked, Some(false));
    assert_eq!(skipped.salary_net, Some(Decimal::ZERO));

    let o = RecordInput::other(2024, 1, Category::Bonus, dec!(500)).with_notes("Q1");
    assert_eq!(o.amount, Some(dec!(500)));
    assert_eq!(o.notes.as_deref(), Some("Q1"));
}

#[test]
fn test_merged_with_overlays_only_set_fields() {
    let base = RecordInput::salary(2024, 1, dec!(2500), dec!(150), false).with_notes("old");
    let patch = RecordInput {
        swile_payment: Some(dec!(160)),
        transport_paid: Some(true),
        ..RecordInput::default()
    };
    let merged = base.merged_with(&patch);
    assert_eq!(merged.year, Some(2024));
    assert_eq!(merged.salary_net, Some(dec!(2500)));
    assert_eq!(merged.swile_payment, Some(dec!(160)));
    assert_eq!(merged.transport_paid, Some(true));
    assert_eq!(merged.notes.as_deref(), Some("old"));
}

// ── RecordJson ────────────────────────────────────────────────

#[test]
fn test_record_json_salary_layout() {
    let r = salary_record("id-1", 2024, 1, dec!(2500), dec!(150.55), true, true);
    let value = serde_json::to_value(RecordJson::from(&r)).unwrap();
    assert_eq!(value["id"], "id-1");
    assert_eq!(value["category"], "salary");
    assert_eq!(value["salaryNet"], 2500.0);
    assert_eq!(value["swilePayment"], 150.55);
    assert_eq!(value["transportPaid"], true);
    assert_eq!(value["worked"], true);
    assert!(value.get("transportDefault").is_none());
    assert_eq!(value["createdAt"], "2024-01-01T00:00:00Z");
}

#[test]
fn test_record_json_other_omits_salary_fields() {
    let r = other_record("id-2", 2024, 2, Category::Bonus, dec!(500));
    let value = serde_json::to_value(RecordJson::from(&r)).unwrap();
    assert_eq!(value["category"], "bonus");
    assert_eq!(value["amount"], 500.0);
    assert!(value.get("salaryNet").is_none());
    assert!(value.get("worked").is_none());
}

#[test]
fn test_record_json_back_to_record() {
    let mut r = salary_record("id-3", 2023, 12, dec!(1999.99), dec!(0), false, false);
    r.notes = "December".into();
    r.salary_mut().unwrap().transport_default = Some(dec!(42.5));
    let text = serde_json::to_string(&RecordJson::from(&r)).unwrap();
    let json: RecordJson = serde_json::from_str(&text).unwrap();
    assert_eq!(Record::from(json), r);
}

#[test]
fn test_record_json_other_drops_transport_default() {
    // Only salary records carry the snapshot
    let text = r#"{"id":"o","year":2024,"month":4,"category":"bonus","amount":10,
        "transportDefault":60,
        "createdAt":"2024-04-01T00:00:00Z","updatedAt":"2024-04-01T00:00:00Z"}"#;
    let json: RecordJson = serde_json::from_str(text).unwrap();
    let r = Record::from(json);
    assert!(r.salary().is_none());
    let value = serde_json::to_value(RecordJson::from(&r)).unwrap();
    assert!(value.get("transportDefault").is_none());
}

#[test]
fn test_record_json_missing_salary_fields_take_defaults() {
    let text = r#"{"id":"x","year":2024,"month":4,"category":"salary","amount":10,
        "createdAt":"2024-04-01T00:00:00Z","updatedAt":"2024-04-01T00:00:00Z"}"#;
    let json: RecordJson = serde_json::from_str(text).unwrap();
    let r = Record::from(json);
    let s = r.salary().unwrap();
    assert_eq!(s.salary_net, Decimal::ZERO);
    assert!(s.worked);
    assert!(r.notes.is_empty());
}

// ── Query options ─────────────────────────────────────────────

#[test]
fn test_month_range_is_lexicographic() {
    let range = MonthRange::new(2023, 11, 2024, 2);
    assert!(range.contains(2023, 11));
    assert!(range.contains(2023, 12));
    assert!(range.contains(2024, 1));
    assert!(range.contains(2024, 2));
    assert!(!range.contains(2023, 10));
    assert!(!range.contains(2024, 3));
}

#[test]
fn test_filter_options_active() {
    assert!(!FilterOptions::default().is_active());
    let f = FilterOptions {
        transport_paid: Some(false),
        ..FilterOptions::default()
    };
    assert!(f.is_active());
}

#[test]
fn test_sort_field_parse() {
    assert_eq!(SortField::parse("salaryNet"), Some(SortField::SalaryNet));
    assert_eq!(SortField::parse("salary-net"), Some(SortField::SalaryNet));
    assert_eq!(SortField::parse("swile"), Some(SortField::SwilePayment));
    assert_eq!(SortField::parse("created_at"), Some(SortField::CreatedAt));
    assert_eq!(SortField::parse("nope"), None);
    for f in SortField::all() {
        assert_eq!(SortField::parse(f.as_str()), Some(*f));
    }
}

#[test]
fn test_sort_options_default_is_month_desc() {
    let s = SortOptions::default();
    assert_eq!(s.field, SortField::Month);
    assert_eq!(s.direction, SortDirection::Desc);
    assert_eq!(s.to_string(), "month desc");
}
