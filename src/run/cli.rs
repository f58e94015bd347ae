use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use std::path::PathBuf;

use crate::export;
use crate::import::{suggest_json_fixes, JsonImporter};
use crate::ledger::Ledger;
use crate::models::{FilterOptions, SortDirection, SortField, SortOptions};
use crate::query::query;
use crate::status::{completed_months, year_months_status, year_statistics};
use crate::ui::util::{expand_home, format_amount, month_name, parse_amount, parse_bool, truncate};
use crate::validate::parse_category;

pub(crate) fn as_cli(args: &[String], ledger: &mut Ledger) -> Result<()> {
    if let Some(err) = ledger.load_error() {
        eprintln!("Warning: {err}");
    }

    match args[1].as_str() {
        "import" | "i" => cli_import(&args[2..], ledger),
        "export" | "e" => cli_export(&args[2..], ledger),
        "status" => cli_status(&args[2..], ledger),
        "summary" | "s" => cli_summary(&args[2..], ledger),
        "list" | "ls" => cli_list(&args[2..], ledger),
        "transport-default" | "td" => cli_transport_default(&args[2..], ledger),
        "sample" => cli_sample(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("salaryui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SalaryUI - local-only salary and supplementary income ledger");
    println!();
    println!("Usage: salaryui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  import <file.json>            Merge a JSON export into the ledger");
    println!("  export [path]                 Export entries to JSON");
    println!("    --year <YYYY>               Only this year (default: every year)");
    println!("  status [YYYY]                 Month-by-month completeness");
    println!("  summary [YYYY]                Yearly statistics");
    println!("  list [YYYY]                   List a year's entries");
    println!("    --category <name>           salary, bonus, overtime or benefits");
    println!("    --paid <yes|no>             Transport paid flag");
    println!("    --search <text>             Match notes, category or amounts");
    println!("    --sort <field> [--asc]      Sort field (default: month, descending)");
    println!("  transport-default <YYYY> [amount]");
    println!("                                Show or set the year's transport default");
    println!("  sample [path]                 Write a sample import file");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Environment: SALARYUI_DB, SALARYUI_STORAGE_KEY, SALARYUI_LOG");
}

/// Value following `--name`, if any.
fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

/// First argument that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Option<&str> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--asc" {
            continue;
        }
        if arg.starts_with("--") {
            skip_next = true;
            continue;
        }
        return Some(arg);
    }
    None
}

fn year_arg(arg: Option<&str>) -> Result<i32> {
    match arg {
        Some(s) => s.parse::<i32>().with_context(|| format!("Invalid year: {s}")),
        None => Ok(Local::now().year()),
    }
}

fn cli_import(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let Some(file_path) = positional(args) else {
        anyhow::bail!("Usage: salaryui import <file.json>");
    };
    let path = PathBuf::from(expand_home(file_path));
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let text = JsonImporter::read(&path)?;
    let report = JsonImporter::validate(&text);
    println!("{}", report.summary_message());

    if !report.is_valid {
        let fixes = suggest_json_fixes(&text);
        if !fixes.is_empty() {
            println!();
            println!("Suggestions:");
            for fix in fixes {
                println!("  - {fix}");
            }
        }
        anyhow::bail!("Import failed");
    }

    let outcome = ledger.merge_imported(report.processed.unwrap_or_default())?;
    println!(
        "Added {} entries, skipped {} already present",
        outcome.added, outcome.skipped
    );
    Ok(())
}

fn cli_export(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let year = flag(args, "--year").map(|y| year_arg(Some(y))).transpose()?;
    let output_path = positional(args).map_or_else(
        || PathBuf::from(export::default_file_name(year, Local::now().date_naive())),
        |p| PathBuf::from(expand_home(p)),
    );

    let json = export::export_json(ledger.records(), year)?;
    export::write_export(&output_path, &json)?;

    let count = ledger
        .records()
        .iter()
        .filter(|r| year.map_or(true, |y| r.year == y))
        .count();
    println!("Exported {count} entries to {}", output_path.display());
    Ok(())
}

fn cli_status(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let year = year_arg(positional(args))?;
    let records = ledger.records();

    println!(
        "SalaryUI - {year} ({}/12 complete)",
        completed_months(records, year)
    );
    println!("{}", "─".repeat(58));
    println!(
        "  {:<11} {:<10} {:<8} {:<8} {:<10}",
        "Month", "Status", "Salary", "Swile", "Transport"
    );
    for status in year_months_status(records, year) {
        let has_entry = records
            .iter()
            .any(|r| r.is_salary() && r.is_in(year, status.month));
        let label = if !has_entry {
            "-"
        } else if status.not_worked {
            "off"
        } else if status.is_complete {
            "complete"
        } else {
            "pending"
        };
        let mark = |b: bool| if b { "yes" } else { "no" };
        println!(
            "  {:<11} {:<10} {:<8} {:<8} {:<10}",
            month_name(status.month),
            label,
            mark(status.has_salary),
            mark(status.has_swile),
            mark(status.has_transport),
        );
    }
    Ok(())
}

fn cli_summary(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let year = year_arg(positional(args))?;
    let stats = year_statistics(ledger.records(), year);

    println!("SalaryUI - {year}");
    println!("{}", "─".repeat(40));
    println!("  Entries:            {}", stats.total_entries);
    println!("  Worked months:      {}", stats.worked_months);
    println!("  Not worked months:  {}", stats.not_worked_months);
    println!("  Total salary:       {}", format_amount(stats.total_salary));
    println!("  Average salary:     {}", format_amount(stats.average_salary));
    println!("  Swile payments:     {}", format_amount(stats.total_swile_payments));
    println!(
        "  Transport paid:     {} of {}",
        stats.paid_transport_count,
        stats.paid_transport_count + stats.unpaid_transport_count
    );
    println!(
        "  Transport default:  {}",
        format_amount(ledger.transport_default(year))
    );
    Ok(())
}

fn cli_list(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let year = year_arg(positional(args))?;

    let mut filters = FilterOptions::default();
    if let Some(name) = flag(args, "--category") {
        filters.category = Some(parse_category(name).map_err(|e| anyhow::anyhow!("{e}"))?);
    }
    if let Some(paid) = flag(args, "--paid") {
        filters.transport_paid =
            Some(parse_bool(paid).with_context(|| format!("Expected yes or no, got '{paid}'"))?);
    }

    let mut sort = SortOptions::default();
    if let Some(field) = flag(args, "--sort") {
        sort.field =
            SortField::parse(field).with_context(|| format!("Unknown sort field: {field}"))?;
    }
    if args.iter().any(|a| a == "--asc") {
        sort.direction = SortDirection::Asc;
    }

    let rows = query(
        ledger.records(),
        year,
        &filters,
        flag(args, "--search"),
        Some(&sort),
    );
    if rows.is_empty() {
        println!("No entries for {year}");
        return Ok(());
    }

    println!(
        "{:<10} {:<9} {:>12} {:>11} {:<9} Notes",
        "Month", "Category", "Amount", "Swile", "Transport"
    );
    println!("{}", "─".repeat(70));
    for r in &rows {
        let (swile, transport) = match r.salary() {
            Some(s) if !s.worked => (String::new(), "off"),
            Some(s) => (
                format_amount(s.swile_payment),
                if s.transport_paid { "paid" } else { "unpaid" },
            ),
            None => (String::new(), ""),
        };
        println!(
            "{:<10} {:<9} {:>12} {:>11} {:<9} {}",
            month_name(r.month),
            r.category().as_str(),
            format_amount(r.amount),
            swile,
            transport,
            truncate(&r.notes, 30)
        );
    }
    println!("{} entries", rows.len());
    Ok(())
}

fn cli_transport_default(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let Some(year) = args.first() else {
        anyhow::bail!("Usage: salaryui transport-default <YYYY> [amount]");
    };
    let year = year_arg(Some(year))?;

    match args.get(1) {
        None => {
            println!(
                "Transport default for {year}: {}",
                format_amount(ledger.transport_default(year))
            );
        }
        Some(raw) => {
            let value = parse_amount(raw).with_context(|| format!("Invalid amount: {raw}"))?;
            let touched = ledger.set_transport_default(year, value)?;
            println!(
                "Transport default for {year} set to {} on {touched} salary entries",
                format_amount(value)
            );
        }
    }
    Ok(())
}

fn cli_sample(args: &[String]) -> Result<()> {
    let path = positional(args).map_or_else(
        || PathBuf::from("salary-data-sample.json"),
        |p| PathBuf::from(expand_home(p)),
    );
    export::write_export(&path, &export::sample_json()?)?;
    println!("Sample written to {}", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
