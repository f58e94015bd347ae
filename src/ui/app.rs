use chrono::{Datelike, Local};
use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::ledger::Ledger;
use crate::models::*;
use crate::{query, status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Overview,
    Entries,
    Transfer,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Overview, Self::Entries, Self::Transfer]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overview => write!(f, "Overview"),
            Self::Entries => write!(f, "Entries"),
            Self::Transfer => write!(f, "Import/Export"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingAction {
    DeleteRecord { id: String, label: String },
    DeleteMarked { ids: Vec<String> },
    ClearAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    Info,
    Warning,
    Error,
}

/// One row of the overview grid.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthLine {
    pub(crate) status: MonthStatus,
    pub(crate) salary: Option<SalaryDetails>,
    /// Sum of bonus, overtime and benefits amounts.
    pub(crate) extras: Decimal,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) selected_year: i32,

    // Overview
    pub(crate) months: Vec<MonthLine>,
    pub(crate) statistics: YearStatistics,
    pub(crate) completed: usize,
    pub(crate) transport_default: Decimal,
    pub(crate) month_index: usize,

    // Entries
    pub(crate) entries: Vec<Record>,
    pub(crate) entry_index: usize,
    pub(crate) entry_scroll: usize,
    pub(crate) marked: HashSet<String>,
    pub(crate) filters: FilterOptions,
    pub(crate) sort: SortOptions,

    // Import/Export
    pub(crate) transfer_log: Vec<(LineKind, String)>,

    pub(crate) load_error: Option<String>,
    pub(crate) total_records: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        let today = Local::now().date_naive();
        let mut app = Self::for_year(today.year());
        app.month_index = today.month0() as usize;
        app
    }

    pub(crate) fn for_year(year: i32) -> Self {
        Self {
            running: true,
            screen: Screen::Overview,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            status_message: String::new(),
            show_help: false,
            selected_year: year,

            months: Vec::new(),
            statistics: YearStatistics::default(),
            completed: 0,
            transport_default: Decimal::ZERO,
            month_index: 0,

            entries: Vec::new(),
            entry_index: 0,
            entry_scroll: 0,
            marked: HashSet::new(),
            filters: FilterOptions::default(),
            sort: SortOptions::default(),

            transfer_log: Vec::new(),

            load_error: None,
            total_records: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Recompute every derived view of the selected year from the ledger.
    pub(crate) fn refresh(&mut self, ledger: &Ledger) {
        let records = ledger.records();
        let year = self.selected_year;

        self.months = status::year_months_status(records, year)
            .into_iter()
            .map(|status| MonthLine {
                status,
                salary: records
                    .iter()
                    .filter(|r| r.is_in(year, status.month))
                    .find_map(|r| r.salary().cloned()),
                extras: records
                    .iter()
                    .filter(|r| r.is_in(year, status.month) && !r.is_salary())
                    .map(|r| r.amount)
                    .sum(),
            })
            .collect();
        self.statistics = status::year_statistics(records, year);
        self.completed = status::completed_months(records, year);
        self.transport_default = ledger.transport_default(year);

        self.refresh_entries(ledger);
        self.load_error = ledger.load_error().map(String::from);
        self.total_records = records.len();
    }

    /// Re-run the query for the Entries table only.
    pub(crate) fn refresh_entries(&mut self, ledger: &Ledger) {
        let search = (!self.search_input.is_empty()).then_some(self.search_input.as_str());
        self.entries = query::query(
            ledger.records(),
            self.selected_year,
            &self.filters,
            search,
            Some(&self.sort),
        )
        .into_iter()
        .cloned()
        .collect();

        let entries = &self.entries;
        self.marked.retain(|id| entries.iter().any(|r| &r.id == id));
        if self.entry_index >= self.entries.len() {
            self.entry_index = self.entries.len().saturating_sub(1);
        }
        if self.entry_scroll > self.entry_index {
            self.entry_scroll = self.entry_index;
        }
    }

    pub(crate) fn selected_entry(&self) -> Option<&Record> {
        self.entries.get(self.entry_index)
    }

    /// Month under the overview cursor, 1-based.
    pub(crate) fn selected_month(&self) -> u32 {
        self.month_index as u32 + 1
    }

    pub(crate) fn entries_page(&self) -> usize {
        self.visible_rows.saturating_sub(3).max(1)
    }

    pub(crate) fn toggle_mark(&mut self) {
        if let Some(id) = self.selected_entry().map(|r| r.id.clone()) {
            if !self.marked.remove(&id) {
                self.marked.insert(id);
            }
        }
    }

    pub(crate) fn clear_marks(&mut self) {
        self.marked.clear();
    }

    pub(crate) fn confirm(&mut self, action: PendingAction, message: impl Into<String>) {
        self.confirm_message = message.into();
        self.pending_action = Some(action);
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn log_transfer(&mut self, kind: LineKind, line: impl Into<String>) {
        self.transfer_log.push((kind, line.into()));
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
