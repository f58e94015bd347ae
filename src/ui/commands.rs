use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::Result;
use chrono::Local;
use rust_decimal::Decimal;

use super::app::{App, LineKind, PendingAction, Screen};
use super::util::{expand_home, format_amount, month_name, parse_amount, parse_bool, parse_month, parse_year_month};
use crate::export;
use crate::import::{suggest_json_fixes, JsonImporter};
use crate::ledger::Ledger;
use crate::models::{Category, MonthRange, Record, RecordInput, SortDirection, SortField, SortOptions};
use crate::status::is_month_complete;
use crate::validate::{parse_category, year_in_range, MAX_YEAR, MIN_YEAR};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Ledger) -> Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit SalaryUI", cmd_quit, r);
    register_command!("quit", "Quit SalaryUI", cmd_quit, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("o", "Go to Overview", cmd_overview, r);
    register_command!("overview", "Go to Overview", cmd_overview, r);
    register_command!("e", "Go to Entries", cmd_entries, r);
    register_command!("entries", "Go to Entries", cmd_entries, r);
    register_command!("t", "Go to Import/Export", cmd_transfer, r);
    register_command!("transfer", "Go to Import/Export", cmd_transfer, r);

    register_command!("year", "Select year (e.g. :year 2024)", cmd_year, r);
    register_command!("y", "Select year (e.g. :y 2024)", cmd_year, r);
    register_command!("next-year", "Go to next year", cmd_next_year, r);
    register_command!("prev-year", "Go to previous year", cmd_prev_year, r);
    register_command!("month", "Select month (e.g. :month mar)", cmd_month, r);
    register_command!("m", "Select month (e.g. :m 3)", cmd_month, r);

    register_command!(
        "salary",
        "Add salary (e.g. :salary [mar] 2500 150 paid)",
        cmd_salary,
        r
    );
    register_command!(
        "skip",
        "Mark a month as not worked (e.g. :skip [aug])",
        cmd_skip,
        r
    );
    register_command!(
        "bonus",
        "Add bonus (e.g. :bonus [dec] 500 year end)",
        cmd_bonus,
        r
    );
    register_command!(
        "overtime",
        "Add overtime (e.g. :overtime [mar] 120)",
        cmd_overtime,
        r
    );
    register_command!(
        "benefits",
        "Add benefits (e.g. :benefits [mar] 80 meal vouchers)",
        cmd_benefits,
        r
    );

    register_command!("net", "Set net salary of selected entry", cmd_net, r);
    register_command!("swile", "Set Swile payment of selected entry", cmd_swile, r);
    register_command!(
        "transport",
        "Set or toggle transport paid (e.g. :transport yes)",
        cmd_transport,
        r
    );
    register_command!(
        "worked",
        "Set or toggle worked flag (e.g. :worked no)",
        cmd_worked,
        r
    );
    register_command!("note", "Set notes of selected entry", cmd_note, r);
    register_command!("amount", "Set amount of selected entry", cmd_amount, r);
    register_command!(
        "retype",
        "Change category of selected entry (e.g. :retype bonus)",
        cmd_retype,
        r
    );
    register_command!("delete", "Delete selected entry", cmd_delete, r);
    register_command!(
        "delete-marked",
        "Delete all marked entries",
        cmd_delete_marked,
        r
    );

    register_command!(
        "category",
        "Filter by category (e.g. :category bonus, :category all)",
        cmd_category,
        r
    );
    register_command!(
        "paid",
        "Filter by transport paid (e.g. :paid no, :paid all)",
        cmd_paid,
        r
    );
    register_command!(
        "range",
        "Filter by month range (e.g. :range jan jun, :range 2024-01 2024-06)",
        cmd_range,
        r
    );
    register_command!(
        "sort",
        "Sort entries (e.g. :sort amount asc)",
        cmd_sort,
        r
    );
    register_command!("search", "Search entries (e.g. :search bonus)", cmd_search, r);
    register_command!("s", "Search entries (e.g. :s bonus)", cmd_search, r);
    register_command!("clear", "Clear filters, search and sort", cmd_clear, r);

    register_command!(
        "transport-default",
        "Show or set the year's transport default (e.g. :transport-default 75)",
        cmd_transport_default,
        r
    );
    register_command!("td", "Show or set transport default", cmd_transport_default, r);
    register_command!(
        "export",
        "Export to JSON (e.g. :export ~/salary.json [all])",
        cmd_export,
        r
    );
    register_command!(
        "import",
        "Import a JSON file (e.g. :import ~/salary.json)",
        cmd_import,
        r
    );
    register_command!(
        "sample",
        "Write a sample import file (e.g. :sample ~/sample.json)",
        cmd_sample,
        r
    );
    register_command!("wipe", "Delete every stored entry", cmd_wipe, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, ledger)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Navigation ───────────────────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &mut Ledger) -> Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &mut Ledger) -> Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_overview(_args: &str, app: &mut App, _ledger: &mut Ledger) -> Result<()> {
    app.screen = Screen::Overview;
    Ok(())
}

fn cmd_entries(_args: &str, app: &mut App, _ledger: &mut Ledger) -> Result<()> {
    app.screen = Screen::Entries;
    Ok(())
}

fn cmd_transfer(_args: &str, app: &mut App, _ledger: &mut Ledger) -> Result<()> {
    app.screen = Screen::Transfer;
    Ok(())
}

fn cmd_year(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match args.parse::<i32>() {
        Ok(year) => select_year(app, ledger, year),
        Err(_) => app.set_status("Usage: :year <YYYY>"),
    }
    Ok(())
}

fn cmd_next_year(_args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let year = app.selected_year + 1;
    select_year(app, ledger, year);
    Ok(())
}

fn cmd_prev_year(_args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let year = app.selected_year - 1;
    select_year(app, ledger, year);
    Ok(())
}

fn select_year(app: &mut App, ledger: &Ledger, year: i32) {
    if !year_in_range(i64::from(year)) {
        app.set_status(format!("Year must be between {MIN_YEAR} and {MAX_YEAR}"));
        return;
    }
    app.selected_year = year;
    app.clear_marks();
    app.entry_index = 0;
    app.entry_scroll = 0;
    app.refresh(ledger);
    app.set_status(format!("Year: {year}"));
}

fn cmd_month(args: &str, app: &mut App, _ledger: &mut Ledger) -> Result<()> {
    match parse_month(args) {
        Some(month) => {
            app.month_index = month as usize - 1;
            app.screen = Screen::Overview;
            app.set_status(format!("{} {}", month_name(month), app.selected_year));
        }
        None => app.set_status("Usage: :month <1-12 or name>"),
    }
    Ok(())
}

// ── Creating entries ─────────────────────────────────────────

/// Split an optional leading month off `tokens`. The first token only counts
/// as a month when the token after it reads as an amount, so `:bonus 5 x`
/// is an amount of 5 rather than May.
fn leading_month<'a>(app: &App, tokens: &'a [&'a str]) -> (u32, &'a [&'a str]) {
    if let [first, second, ..] = tokens {
        if let (Some(month), Some(_)) = (parse_month(first), parse_amount(second)) {
            return (month, &tokens[1..]);
        }
    }
    (app.selected_month(), tokens)
}

fn cmd_salary(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    let (month, rest) = leading_month(app, &tokens);

    let Some(net) = rest.first().and_then(|t| parse_amount(t)) else {
        app.set_status("Usage: :salary [month] <net> [swile] [paid]");
        return Ok(());
    };
    let swile = match rest.get(1) {
        Some(t) => match parse_amount(t) {
            Some(v) => v,
            None => {
                app.set_status(format!("Invalid Swile amount: {t}"));
                return Ok(());
            }
        },
        None => Decimal::ZERO,
    };
    let paid = match rest.get(2) {
        Some(t) => match parse_bool(t) {
            Some(v) => v,
            None => {
                app.set_status(format!("Invalid transport paid flag: {t}"));
                return Ok(());
            }
        },
        None => false,
    };

    let input = RecordInput::salary(app.selected_year, month, net, swile, paid);
    create_entry(app, ledger, input)
}

fn cmd_skip(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let month = if args.is_empty() {
        app.selected_month()
    } else {
        match parse_month(args) {
            Some(m) => m,
            None => {
                app.set_status("Usage: :skip [month]");
                return Ok(());
            }
        }
    };
    let input = RecordInput::not_worked(app.selected_year, month);
    create_entry(app, ledger, input)
}

fn cmd_bonus(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    add_other(args, app, ledger, Category::Bonus)
}

fn cmd_overtime(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    add_other(args, app, ledger, Category::Overtime)
}

fn cmd_benefits(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    add_other(args, app, ledger, Category::Benefits)
}

fn add_other(args: &str, app: &mut App, ledger: &mut Ledger, category: Category) -> Result<()> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    let (month, rest) = leading_month(app, &tokens);

    let Some(amount) = rest.first().and_then(|t| parse_amount(t)) else {
        app.set_status(format!("Usage: :{category} [month] <amount> [notes]"));
        return Ok(());
    };
    let notes = rest.get(1..).unwrap_or_default().join(" ");

    let input = RecordInput::other(app.selected_year, month, category, amount).with_notes(notes);
    create_entry(app, ledger, input)
}

fn create_entry(app: &mut App, ledger: &mut Ledger, input: RecordInput) -> Result<()> {
    let record = ledger.create_with_defaults(input)?;
    app.month_index = record.month as usize - 1;
    app.refresh(ledger);
    app.set_status(format!(
        "Added {} for {} {}{}",
        record.category(),
        month_name(record.month),
        record.year,
        completion_note(ledger, &record)
    ));
    Ok(())
}

fn completion_note(ledger: &Ledger, record: &Record) -> &'static str {
    if record.is_salary() && is_month_complete(ledger.records(), record.year, record.month) {
        " (month complete)"
    } else {
        ""
    }
}

// ── Editing the selected entry ───────────────────────────────

/// The record an edit applies to: the highlighted row on Entries, otherwise
/// the salary record of the month under the overview cursor.
fn target_record(app: &App, ledger: &Ledger) -> Option<Record> {
    match app.screen {
        Screen::Entries => app.selected_entry().cloned(),
        _ => {
            let (year, month) = (app.selected_year, app.selected_month());
            ledger
                .records()
                .iter()
                .find(|r| r.is_salary() && r.is_in(year, month))
                .cloned()
        }
    }
}

fn apply_patch(app: &mut App, ledger: &mut Ledger, patch: RecordInput) -> Result<()> {
    let Some(record) = target_record(app, ledger) else {
        app.set_status("No entry selected");
        return Ok(());
    };
    let updated = ledger.update(&record.id, &patch)?;
    app.refresh(ledger);
    app.set_status(format!(
        "Updated {} for {} {}{}",
        updated.category(),
        month_name(updated.month),
        updated.year,
        completion_note(ledger, &updated)
    ));
    Ok(())
}

fn amount_patch(args: &str, app: &mut App, usage: &str) -> Option<Decimal> {
    let value = parse_amount(args);
    if value.is_none() {
        app.set_status(usage.to_string());
    }
    value
}

fn cmd_net(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let Some(value) = amount_patch(args, app, "Usage: :net <amount>") else {
        return Ok(());
    };
    let patch = RecordInput {
        salary_net: Some(value),
        ..RecordInput::default()
    };
    apply_patch(app, ledger, patch)
}

fn cmd_swile(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let Some(value) = amount_patch(args, app, "Usage: :swile <amount>") else {
        return Ok(());
    };
    let patch = RecordInput {
        swile_payment: Some(value),
        ..RecordInput::default()
    };
    apply_patch(app, ledger, patch)
}

fn cmd_amount(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let Some(value) = amount_patch(args, app, "Usage: :amount <amount>") else {
        return Ok(());
    };
    let patch = RecordInput {
        amount: Some(value),
        ..RecordInput::default()
    };
    apply_patch(app, ledger, patch)
}

/// Explicit value from `args`, or the opposite of the current one when empty.
fn flag_value(
    args: &str,
    app: &mut App,
    ledger: &Ledger,
    current: fn(&Record) -> Option<bool>,
) -> Option<bool> {
    if args.is_empty() {
        let value = target_record(app, ledger).and_then(|r| current(&r)).map(|v| !v);
        if value.is_none() {
            app.set_status("Select a salary entry first");
        }
        return value;
    }
    let value = parse_bool(args);
    if value.is_none() {
        app.set_status(format!("Expected yes or no, got '{args}'"));
    }
    value
}

fn cmd_transport(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let Some(value) = flag_value(args, app, ledger, |r| r.salary().map(|s| s.transport_paid))
    else {
        return Ok(());
    };
    let patch = RecordInput {
        transport_paid: Some(value),
        ..RecordInput::default()
    };
    apply_patch(app, ledger, patch)
}

fn cmd_worked(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let Some(value) = flag_value(args, app, ledger, |r| r.salary().map(|s| s.worked)) else {
        return Ok(());
    };
    let patch = RecordInput {
        worked: Some(value),
        ..RecordInput::default()
    };
    apply_patch(app, ledger, patch)
}

fn cmd_note(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let patch = RecordInput::default().with_notes(args);
    apply_patch(app, ledger, patch)
}

fn cmd_retype(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let category = match parse_category(args) {
        Ok(c) => c,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };
    let patch = RecordInput {
        category: Some(category),
        ..RecordInput::default()
    };
    apply_patch(app, ledger, patch)
}

fn cmd_delete(_args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let Some(record) = target_record(app, ledger) else {
        app.set_status("No entry selected");
        return Ok(());
    };
    let label = format!(
        "{} {} {}",
        record.category(),
        month_name(record.month),
        record.year
    );
    app.confirm(
        PendingAction::DeleteRecord {
            id: record.id,
            label: label.clone(),
        },
        format!("Delete {label}?"),
    );
    Ok(())
}

fn cmd_delete_marked(_args: &str, app: &mut App, _ledger: &mut Ledger) -> Result<()> {
    if app.marked.is_empty() {
        app.set_status("No entries marked. Use Space on Entries to mark");
        return Ok(());
    }
    let ids: Vec<String> = app.marked.iter().cloned().collect();
    let count = ids.len();
    app.confirm(
        PendingAction::DeleteMarked { ids },
        format!("Delete {count} marked entr{}?", if count == 1 { "y" } else { "ies" }),
    );
    Ok(())
}

// ── Filters, search and sort ─────────────────────────────────

fn show_entries(app: &mut App, ledger: &Ledger) {
    app.screen = Screen::Entries;
    app.entry_index = 0;
    app.entry_scroll = 0;
    app.refresh_entries(ledger);
}

fn cmd_category(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let arg = args.to_lowercase();
    if arg.is_empty() || arg == "all" {
        app.filters.category = None;
        app.set_status("Category filter cleared");
    } else {
        match parse_category(&arg) {
            Ok(category) => {
                app.filters.category = Some(category);
                app.set_status(format!("Showing {} entries", category.label()));
            }
            Err(e) => {
                app.set_status(format!("{e}. Use :category all to clear"));
                return Ok(());
            }
        }
    }
    show_entries(app, ledger);
    Ok(())
}

fn cmd_paid(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    if args.is_empty() || args.eq_ignore_ascii_case("all") {
        app.filters.transport_paid = None;
        app.set_status("Transport filter cleared");
    } else if let Some(paid) = parse_bool(args) {
        app.filters.transport_paid = Some(paid);
        app.set_status(if paid {
            "Showing entries with transport paid"
        } else {
            "Showing entries with transport unpaid"
        });
    } else {
        app.set_status("Usage: :paid <yes|no|all>");
        return Ok(());
    }
    show_entries(app, ledger);
    Ok(())
}

/// `YYYY-MM`, or a bare month taken in the selected year.
fn range_bound(app: &App, token: &str) -> Option<(i32, u32)> {
    parse_year_month(token).or_else(|| parse_month(token).map(|m| (app.selected_year, m)))
}

fn cmd_range(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    match tokens.as_slice() {
        [] | ["all"] => {
            app.filters.month_range = None;
            app.set_status("Month range cleared");
        }
        [from, to] => match (range_bound(app, from), range_bound(app, to)) {
            (Some(start), Some(end)) => {
                app.filters.month_range = Some(MonthRange::new(start.0, start.1, end.0, end.1));
                app.set_status(format!(
                    "Range: {} {} to {} {}",
                    month_name(start.1),
                    start.0,
                    month_name(end.1),
                    end.0
                ));
            }
            _ => {
                app.set_status("Usage: :range <from> <to> (month or YYYY-MM)");
                return Ok(());
            }
        },
        _ => {
            app.set_status("Usage: :range <from> <to> (month or YYYY-MM)");
            return Ok(());
        }
    }
    show_entries(app, ledger);
    Ok(())
}

fn cmd_sort(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    let sort = match tokens.as_slice() {
        [] => SortOptions::default(),
        [field, rest @ ..] => {
            let Some(field) = SortField::parse(field) else {
                let names: Vec<&str> = SortField::all().iter().map(SortField::as_str).collect();
                app.set_status(format!("Sort fields: {}", names.join(", ")));
                return Ok(());
            };
            let direction = match rest.first().map(|d| d.to_lowercase()).as_deref() {
                None | Some("desc") => SortDirection::Desc,
                Some("asc") => SortDirection::Asc,
                Some(other) => {
                    app.set_status(format!("Unknown direction '{other}'. Use asc or desc"));
                    return Ok(());
                }
            };
            SortOptions { field, direction }
        }
    };
    app.sort = sort;
    show_entries(app, ledger);
    app.set_status(format!("Sorted by {sort}"));
    Ok(())
}

fn cmd_search(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    app.search_input = args.to_string();
    show_entries(app, ledger);

    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        app.set_status(format!("Searching: {args}"));
    }
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    app.filters = Default::default();
    app.sort = SortOptions::default();
    app.search_input.clear();
    show_entries(app, ledger);
    app.set_status("Filters, search and sort cleared");
    Ok(())
}

// ── Transport default ────────────────────────────────────────

fn cmd_transport_default(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let year = app.selected_year;
    if args.is_empty() {
        let current = ledger.transport_default(year);
        app.set_status(format!(
            "Transport default for {year}: {}",
            format_amount(current)
        ));
        return Ok(());
    }

    let Some(value) = parse_amount(args) else {
        app.set_status("Usage: :transport-default <amount>");
        return Ok(());
    };
    let touched = ledger.set_transport_default(year, value)?;
    app.refresh(ledger);
    app.set_status(format!(
        "Transport default for {year} set to {} on {touched} salary entr{}",
        format_amount(value),
        if touched == 1 { "y" } else { "ies" }
    ));
    Ok(())
}

// ── Import / export ──────────────────────────────────────────

fn home_file(name: &str) -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join(name)
}

fn cmd_export(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let mut year = Some(app.selected_year);
    let mut path = None;
    for token in args.split_whitespace() {
        if token.eq_ignore_ascii_case("all") {
            year = None;
        } else {
            path = Some(PathBuf::from(expand_home(token)));
        }
    }
    let path = path.unwrap_or_else(|| {
        home_file(&export::default_file_name(year, Local::now().date_naive()))
    });

    let json = export::export_json(ledger.records(), year)?;
    export::write_export(&path, &json)?;

    let count = ledger
        .records()
        .iter()
        .filter(|r| year.map_or(true, |y| r.year == y))
        .count();
    let scope = year.map_or_else(|| "all years".to_string(), |y| y.to_string());
    let msg = format!("Exported {count} entries ({scope}) to {}", path.display());
    app.log_transfer(LineKind::Info, msg.clone());
    app.screen = Screen::Transfer;
    app.set_status(msg);
    Ok(())
}

fn cmd_import(args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :import <file.json>");
        return Ok(());
    }
    let path = PathBuf::from(expand_home(args));
    let text = JsonImporter::read(&path)?;
    let report = JsonImporter::validate(&text);

    app.screen = Screen::Transfer;
    app.log_transfer(LineKind::Info, format!("Import {}", path.display()));

    if !report.is_valid {
        for error in &report.errors {
            app.log_transfer(LineKind::Error, error.to_string());
        }
        for fix in suggest_json_fixes(&text) {
            app.log_transfer(LineKind::Warning, format!("Hint: {fix}"));
        }
        app.set_status("Import failed");
        return Ok(());
    }

    let summary = report.summary_message();
    let mut lines = summary.lines();
    if let Some(head) = lines.next() {
        app.log_transfer(LineKind::Info, head.to_string());
    }
    for line in lines {
        app.log_transfer(LineKind::Warning, line.to_string());
    }

    let outcome = ledger.merge_imported(report.processed.unwrap_or_default())?;
    let msg = format!(
        "Added {} entries, skipped {} already present",
        outcome.added, outcome.skipped
    );
    app.log_transfer(LineKind::Info, msg.clone());
    app.refresh(ledger);
    app.set_status(msg);
    Ok(())
}

fn cmd_sample(args: &str, app: &mut App, _ledger: &mut Ledger) -> Result<()> {
    let path = if args.is_empty() {
        home_file("salary-data-sample.json")
    } else {
        PathBuf::from(expand_home(args))
    };
    export::write_export(&path, &export::sample_json()?)?;
    let msg = format!("Sample written to {}", path.display());
    app.log_transfer(LineKind::Info, msg.clone());
    app.screen = Screen::Transfer;
    app.set_status(msg);
    Ok(())
}

fn cmd_wipe(_args: &str, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let count = ledger.records().len();
    app.confirm(
        PendingAction::ClearAll,
        format!("Delete all {count} stored entries? This cannot be undone"),
    );
    Ok(())
}

/// Carry out a confirmed action.
pub(crate) fn run_pending(action: PendingAction, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match action {
        PendingAction::DeleteRecord { id, label } => {
            ledger.delete(&id)?;
            app.marked.remove(&id);
            app.set_status(format!("Deleted {label}"));
        }
        PendingAction::DeleteMarked { ids } => {
            let removed = ledger.delete_many(&ids)?;
            app.clear_marks();
            app.set_status(format!("Deleted {removed} entries"));
        }
        PendingAction::ClearAll => {
            ledger.clear()?;
            app.clear_marks();
            app.set_status("All entries deleted");
        }
    }
    app.refresh(ledger);
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
