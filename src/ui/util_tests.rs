#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount() {
    assert_eq!(format_amount(dec!(0)), "€0.00");
    assert_eq!(format_amount(dec!(2500)), "€2,500.00");
    assert_eq!(format_amount(dec!(1234567.891)), "€1,234,567.89");
    assert_eq!(format_amount(dec!(-150.5)), "-€150.50");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello", 5), "hello");
    assert_eq!(truncate("hello world", 5), "hell…");
    assert_eq!(truncate("hello", 0), "");
    assert_eq!(truncate("prime d'activité", 7), "prime …");
}

// ── months ────────────────────────────────────────────────────

#[test]
fn test_month_names() {
    assert_eq!(month_name(1), "January");
    assert_eq!(month_name(12), "December");
    assert_eq!(month_name(0), "?");
    assert_eq!(month_name(13), "?");
    assert_eq!(month_short(9), "Sep");
}

#[test]
fn test_parse_month() {
    assert_eq!(parse_month("3"), Some(3));
    assert_eq!(parse_month("03"), Some(3));
    assert_eq!(parse_month("mar"), Some(3));
    assert_eq!(parse_month("September"), Some(9));
    assert_eq!(parse_month("ju"), None);
    assert_eq!(parse_month("jun"), Some(6));
    assert_eq!(parse_month("13"), None);
    assert_eq!(parse_month("0"), None);
    assert_eq!(parse_month("xyz"), None);
}

#[test]
fn test_parse_year_month() {
    assert_eq!(parse_year_month("2024-03"), Some((2024, 3)));
    assert_eq!(parse_year_month("2024-dec"), Some((2024, 12)));
    assert_eq!(parse_year_month("2024"), None);
    assert_eq!(parse_year_month("2024-13"), None);
}

// ── parse_amount / parse_bool ─────────────────────────────────

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("2500"), Some(dec!(2500)));
    assert_eq!(parse_amount("€2,500.50"), Some(dec!(2500.50)));
    assert_eq!(parse_amount("-3"), Some(dec!(-3)));
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("abc"), None);
}

#[test]
fn test_parse_bool() {
    assert_eq!(parse_bool("yes"), Some(true));
    assert_eq!(parse_bool("Paid"), Some(true));
    assert_eq!(parse_bool("n"), Some(false));
    assert_eq!(parse_bool("0"), Some(false));
    assert_eq!(parse_bool("maybe"), None);
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 3, 10);
    assert_eq!(index, 2);
}

#[test]
fn test_scroll_up_and_bounds() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
    scroll_up(&mut index, &mut scroll);
    assert_eq!(index, 0);
    scroll_to_bottom(&mut index, &mut scroll, 20, 5);
    assert_eq!((index, scroll), (19, 15));
}

#[test]
fn test_expand_home_leaves_plain_paths() {
    assert_eq!(expand_home("/tmp/out.json"), "/tmp/out.json");
    assert!(!expand_home("~/out.json").starts_with('~'));
}
