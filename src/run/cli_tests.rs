#![allow(clippy::unwrap_used)]

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_flag_value() {
    let a = args(&["2024", "--category", "bonus", "--asc"]);
    assert_eq!(flag(&a, "--category"), Some("bonus"));
    assert_eq!(flag(&a, "--paid"), None);
}

#[test]
fn test_positional_skips_flags_and_values() {
    assert_eq!(positional(&args(&["--year", "2024", "out.json"])), Some("out.json"));
    assert_eq!(positional(&args(&["--asc", "2023"])), Some("2023"));
    assert_eq!(positional(&args(&["--sort", "amount"])), None);
    assert_eq!(positional(&[]), None);
}

#[test]
fn test_year_arg() {
    assert_eq!(year_arg(Some("2024")).unwrap(), 2024);
    assert!(year_arg(Some("twenty")).is_err());
    assert_eq!(year_arg(None).unwrap(), Local::now().year());
}
