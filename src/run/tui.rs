use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

use crate::ledger::Ledger;
use crate::models::MonthRange;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{month_name, scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(ledger: &mut Ledger) -> Result<()> {
    let mut app = App::new();
    app.refresh(ledger);
    info!("Starting TUI on {}", app.selected_year);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ledger);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        error!("TUI exited with error: {e:#}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &mut Ledger,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars
            let content_height = f.area().height.saturating_sub(3) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, ledger)?,
                InputMode::Command => handle_command_input(key, app, ledger),
                InputMode::Search => handle_search_input(key, app, ledger),
                InputMode::Confirm => handle_confirm_input(key, app, ledger),
            }
        }
    }
    Ok(())
}

/// Run a command line, turning a failure into the status message. Engine
/// errors leave the ledger untouched, so the session carries on.
fn dispatch(input: &str, app: &mut App, ledger: &mut Ledger) {
    if let Err(e) = commands::handle_command(input, app, ledger) {
        error!("Command ':{input}' failed: {e:#}");
        app.set_status(format!("{e:#}"));
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.search_input.clear();
            app.screen = Screen::Entries;
            app.refresh_entries(ledger);
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, Screen::Overview),
        KeyCode::Char('2') => switch_screen(app, Screen::Entries),
        KeyCode::Char('3') => switch_screen(app, Screen::Transfer),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, screens[prev]);
        }
        KeyCode::Enter if app.screen == Screen::Overview => show_month_entries(app, ledger),
        KeyCode::Esc => handle_escape(app, ledger),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('H') => dispatch("prev-year", app, ledger),
        KeyCode::Char('L') => dispatch("next-year", app, ledger),
        KeyCode::Char('t') if app.screen == Screen::Overview => {
            dispatch("transport", app, ledger);
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        KeyCode::Char('D') if app.screen == Screen::Entries && !app.marked.is_empty() => {
            dispatch("delete-marked", app, ledger);
        }
        KeyCode::Char('D') => dispatch("delete", app, ledger),
        KeyCode::Char(' ') if app.screen == Screen::Entries => {
            app.toggle_mark();
            handle_move_down(app);
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            dispatch(&input, app, ledger);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

/// Search is re-run on every keystroke.
fn handle_search_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.search_input.clear();
            app.refresh_entries(ledger);
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            reset_entry_cursor(app);
            app.refresh_entries(ledger);
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            reset_entry_cursor(app);
            app.refresh_entries(ledger);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                if let Err(e) = commands::run_pending(action, app, ledger) {
                    error!("Confirmed action failed: {e:#}");
                    app.set_status(format!("{e:#}"));
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, screen: Screen) {
    app.screen = screen;
    app.set_status(format!("{screen}"));
}

fn reset_entry_cursor(app: &mut App) {
    app.entry_index = 0;
    app.entry_scroll = 0;
}

/// Narrow Entries to the month under the overview cursor.
fn show_month_entries(app: &mut App, ledger: &Ledger) {
    let (year, month) = (app.selected_year, app.selected_month());
    app.filters.month_range = Some(MonthRange::new(year, month, year, month));
    app.screen = Screen::Entries;
    reset_entry_cursor(app);
    app.refresh_entries(ledger);
    app.set_status(format!("{} {year}. Esc shows the whole year", month_name(month)));
}

fn handle_escape(app: &mut App, ledger: &Ledger) {
    match app.screen {
        Screen::Entries if !app.marked.is_empty() => {
            app.clear_marks();
            app.set_status("Marks cleared");
        }
        Screen::Entries if app.filters.month_range.is_some() => {
            app.filters.month_range = None;
            reset_entry_cursor(app);
            app.refresh_entries(ledger);
            app.set_status("Showing the whole year");
        }
        Screen::Entries | Screen::Transfer => app.screen = Screen::Overview,
        Screen::Overview => app.status_message.clear(),
    }
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Overview => {
            if app.month_index < 11 {
                app.month_index += 1;
            }
        }
        Screen::Entries => {
            let page = app.entries_page();
            scroll_down(
                &mut app.entry_index,
                &mut app.entry_scroll,
                app.entries.len(),
                page,
            );
        }
        Screen::Transfer => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Overview => app.month_index = app.month_index.saturating_sub(1),
        Screen::Entries => scroll_up(&mut app.entry_index, &mut app.entry_scroll),
        Screen::Transfer => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Overview => app.month_index = 0,
        Screen::Entries => scroll_to_top(&mut app.entry_index, &mut app.entry_scroll),
        Screen::Transfer => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Overview => app.month_index = 11,
        Screen::Entries => {
            let page = app.entries_page();
            scroll_to_bottom(
                &mut app.entry_index,
                &mut app.entry_scroll,
                app.entries.len(),
                page,
            );
        }
        Screen::Transfer => {}
    }
}
