#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::fixtures::ts;
use rust_decimal_macros::dec;
use std::io::Write;

fn now() -> DateTime<Utc> {
    ts("2025-03-01T10:00:00Z")
}

fn check(text: &str) -> ImportReport {
    JsonImporter::validate_at(text, now())
}

fn processed(report: &ImportReport) -> &[Record] {
    report.processed.as_deref().unwrap()
}

// ── Document shape ────────────────────────────────────────────

#[test]
fn test_malformed_text_is_hard_error() {
    let report = check("{not json");
    assert!(!report.is_valid);
    assert!(report.processed.is_none());
    assert_eq!(report.errors.len(), 1);
    assert!(matches!(report.errors[0], ImportError::Parse(_)));
    assert!(report.errors[0].to_string().starts_with("JSON Parse Error: "));
}

#[test]
fn test_unknown_shape_is_hard_error() {
    for text in [r#"{"entries":[]}"#, "42", r#""text""#, r#"{"yearlyData":{}}"#] {
        let report = check(text);
        assert!(!report.is_valid, "{text}");
        assert_eq!(report.errors, vec![ImportError::Shape]);
        assert!(report.processed.is_none());
    }
}

#[test]
fn test_accepted_shapes() {
    let entry = r#"{"year":2024,"month":1,"category":"salary","salaryNet":2500}"#;
    for text in [
        format!("[{entry}]"),
        format!(r#"{{"yearlyData":[{entry}]}}"#),
        format!(r#"{{"data":[{entry}]}}"#),
    ] {
        let report = check(&text);
        assert!(report.is_valid, "{text}");
        assert_eq!(report.entries_found, 1);
        assert_eq!(processed(&report).len(), 1);
    }
}

#[test]
fn test_yearly_data_preferred_over_data() {
    let text = r#"{"yearlyData":[],"data":[{"year":2024,"month":1,"category":"salary"}]}"#;
    let report = check(text);
    assert_eq!(report.entries_found, 0);
    assert!(processed(&report).is_empty());
}

#[test]
fn test_empty_array_is_valid_with_nothing_processed() {
    let report = check("[]");
    assert!(report.is_valid);
    assert_eq!(report.processed, Some(Vec::new()));
}

// ── Entry rejection ───────────────────────────────────────────

#[test]
fn test_invalid_category_is_warning_only() {
    let report = check(r#"{"yearlyData":[{"year":2024,"month":1,"category":"bogus"}]}"#);
    assert!(report.is_valid);
    assert!(report.errors.is_empty());
    assert!(processed(&report).is_empty());
    assert_eq!(report.warnings, vec!["Entry 1: Invalid category (bogus)"]);
}

#[test]
fn test_entry_rejections() {
    let text = r#"[
        5,
        {"month":1,"category":"salary"},
        {"year":0,"month":1,"category":"salary"},
        {"year":1899,"month":1,"category":"salary"},
        {"year":2024,"month":13,"category":"salary"},
        {"year":"abc","month":1,"category":"salary"},
        {"year":2024,"month":1.5,"category":"salary"},
        {"year":2024,"month":1,"category":"Salary"},
        {"year":2024,"month":1,"category":"bonus","amount":0},
        {"year":2024,"month":1,"category":"bonus","amount":-3},
        {"year":2024,"month":1,"category":"bonus"},
        null
    ]"#;
    let report = check(text);
    assert!(report.is_valid);
    assert!(processed(&report).is_empty());
    assert_eq!(report.entries_found, 12);
    assert_eq!(
        report.warnings,
        vec![
            "Entry 1: Invalid item structure",
            "Entry 2: Missing required fields (year, month, category)",
            "Entry 3: Missing required fields (year, month, category)",
            "Entry 4: Invalid year (1899)",
            "Entry 5: Invalid month (13)",
            "Entry 6: Invalid year (abc)",
            "Entry 7: Invalid month (1.5)",
            "Entry 8: Invalid category (Salary)",
            "Entry 9: Amount must be greater than 0",
            "Entry 10: Amount must be greater than 0",
            "Entry 11: Amount must be greater than 0",
            "Entry 12: Invalid item structure",
        ]
    );
}

#[test]
fn test_bad_entries_do_not_stop_good_ones() {
    let text = r#"[
        {"year":2024,"month":1,"category":"nope"},
        {"id":"keep","year":2024,"month":2,"category":"overtime","amount":75.5}
    ]"#;
    let report = check(text);
    let rows = processed(&report);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "keep");
    assert_eq!(rows[0].amount, dec!(75.5));
    assert_eq!(report.warnings.len(), 1);
}

// ── Salary normalization ──────────────────────────────────────

#[test]
fn test_salary_full_entry() {
    let text = r#"[{
        "id":"s1","year":2024,"month":1,"category":"salary",
        "salaryNet":2500.55,"swilePayment":150,"transportPaid":true,"worked":true,
        "transportDefault":75,"amount":2500.55,"notes":"January",
        "createdAt":"2024-01-31T08:00:00.000Z","updatedAt":"2024-02-01T09:30:00Z"
    }]"#;
    let report = check(text);
    assert!(report.warnings.is_empty());
    let r = &processed(&report)[0];
    assert_eq!(r.id, "s1");
    assert_eq!((r.year, r.month), (2024, 1));
    assert_eq!(r.amount, dec!(2500.55));
    assert_eq!(r.notes, "January");
    assert_eq!(r.created_at, ts("2024-01-31T08:00:00Z"));
    assert_eq!(r.updated_at, ts("2024-02-01T09:30:00Z"));
    let s = r.salary().unwrap();
    assert_eq!(s.salary_net, dec!(2500.55));
    assert_eq!(s.swile_payment, dec!(150));
    assert!(s.transport_paid);
    assert!(s.worked);
    assert_eq!(s.transport_default, Some(dec!(75)));
}

#[test]
fn test_salary_defaults() {
    let report = check(r#"[{"year":2024,"month":3,"category":"salary"}]"#);
    let r = &processed(&report)[0];
    assert!(!r.id.is_empty());
    assert_eq!(r.amount, Decimal::ZERO);
    assert!(r.notes.is_empty());
    assert_eq!(r.created_at, now());
    assert_eq!(r.updated_at, now());
    let s = r.salary().unwrap();
    assert_eq!(s.salary_net, Decimal::ZERO);
    assert_eq!(s.swile_payment, Decimal::ZERO);
    assert!(!s.transport_paid);
    assert!(s.worked);
    assert!(s.transport_default.is_none());
}

#[test]
fn test_salary_amount_falls_back_to_legacy_amount() {
    let report = check(r#"[{"year":2024,"month":3,"category":"salary","amount":1800}]"#);
    let r = &processed(&report)[0];
    assert_eq!(r.amount, dec!(1800));
    assert_eq!(r.salary().unwrap().salary_net, Decimal::ZERO);
}

#[test]
fn test_salary_coercions() {
    let text = r#"[{"year":"2024","month":"4","category":"salary",
        "salaryNet":"2100.10","swilePayment":"oops","transportPaid":"yes","worked":0,
        "transportPayment":40}]"#;
    let report = check(text);
    let r = &processed(&report)[0];
    assert_eq!((r.year, r.month), (2024, 4));
    let s = r.salary().unwrap();
    assert_eq!(s.salary_net, dec!(2100.10));
    assert_eq!(s.swile_payment, Decimal::ZERO);
    assert!(s.transport_paid);
    assert!(!s.worked);
    assert!(s.transport_default.is_none());
}

#[test]
fn test_worked_null_means_worked() {
    let report = check(r#"[{"year":2024,"month":4,"category":"salary","worked":null}]"#);
    assert!(processed(&report)[0].salary().unwrap().worked);
}

#[test]
fn test_negative_salary_fields_warn_but_keep_entry() {
    let text = r#"[{"year":2024,"month":5,"category":"salary","salaryNet":-10,"swilePayment":-1}]"#;
    let report = check(text);
    assert_eq!(processed(&report).len(), 1);
    assert_eq!(
        report.warnings,
        vec!["Entry 1: Negative salary amount", "Entry 1: Negative Swile payment"]
    );
    assert_eq!(processed(&report)[0].salary().unwrap().salary_net, dec!(-10));
}

#[test]
fn test_numeric_id_is_kept_as_text() {
    let report = check(r#"[{"id":17,"year":2024,"month":5,"category":"salary"}]"#);
    assert_eq!(processed(&report)[0].id, "17");
}

// ── Timestamps ────────────────────────────────────────────────

#[test]
fn test_timestamp_forms() {
    let text = r#"[
        {"year":2024,"month":1,"category":"salary","createdAt":"2024-01-15"},
        {"year":2024,"month":2,"category":"salary","createdAt":1706745600000}
    ]"#;
    let report = check(text);
    let rows = processed(&report);
    assert_eq!(rows[0].created_at, ts("2024-01-15T00:00:00Z"));
    assert_eq!(rows[1].created_at, ts("2024-02-01T00:00:00Z"));
    assert!(report.warnings.is_empty());
}

#[test]
fn test_unreadable_timestamp_warns_and_uses_now() {
    let text = r#"[{"year":2024,"month":1,"category":"salary","createdAt":"last week"}]"#;
    let report = check(text);
    assert_eq!(processed(&report)[0].created_at, now());
    assert_eq!(
        report.warnings,
        vec!["Entry 1: Invalid createdAt (last week), using current time"]
    );
}

#[test]
fn test_updated_at_clamped_to_created_at() {
    let text = r#"[{"year":2024,"month":1,"category":"salary",
        "createdAt":"2024-06-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}]"#;
    let report = check(text);
    let r = &processed(&report)[0];
    assert_eq!(r.updated_at, r.created_at);
}

// ── Other normalization ───────────────────────────────────────

#[test]
fn test_other_entry() {
    let text = r#"[{"id":"b","year":2024,"month":6,"category":"benefits","amount":"120",
        "salaryNet":999,"notes":"Mutuelle"}]"#;
    let report = check(text);
    let r = &processed(&report)[0];
    assert_eq!(r.category(), Category::Benefits);
    assert_eq!(r.amount, dec!(120));
    assert!(r.salary().is_none());
    assert_eq!(r.notes, "Mutuelle");
}

// ── Messages and helpers ──────────────────────────────────────

#[test]
fn test_summary_message_caps_warnings() {
    let entries: Vec<String> = (0..8)
        .map(|_| r#"{"year":2024,"month":1,"category":"x"}"#.to_string())
        .collect();
    let report = check(&format!("[{}]", entries.join(",")));
    let msg = report.summary_message();
    assert!(msg.starts_with("Processed 0 of 8 entries with 8 warnings:"));
    assert!(msg.contains("Entry 5: Invalid category (x)"));
    assert!(!msg.contains("Entry 6:"));
    assert!(msg.ends_with("... and 3 more"));
}

#[test]
fn test_summary_message_for_rejected_document() {
    let report = check("[1,");
    assert!(report.summary_message().starts_with("JSON Parse Error: "));
    let report = check("{}");
    assert_eq!(
        report.summary_message(),
        "Invalid JSON structure: Expected array or object with yearlyData/data property"
    );
}

#[test]
fn test_summary_message_clean() {
    let report = check(r#"[{"year":2024,"month":1,"category":"salary"}]"#);
    assert_eq!(report.summary_message(), "Processed 1 of 1 entries");
}

#[test]
fn test_suggest_json_fixes() {
    let hints = suggest_json_fixes("x: undefined, y: NaN,}");
    assert_eq!(
        hints,
        vec![
            "Replace \"undefined\" values with null or proper values",
            "Replace \"NaN\" values with valid numbers",
            "JSON should start with { or [",
            "Remove trailing commas before } or ]",
        ]
    );
    assert!(suggest_json_fixes(r#"{"a":1}"#).is_empty());
    assert!(suggest_json_fixes("[1").contains(&"JSON should end with } or ]"));
}

#[test]
fn test_read_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[]").unwrap();
    assert_eq!(JsonImporter::read(file.path()).unwrap(), "[]");
    assert!(JsonImporter::read(Path::new("/nonexistent/salary.json")).is_err());
}
