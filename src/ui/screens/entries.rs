use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::Record;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, month_short, truncate};

fn title(app: &App) -> String {
    let mut parts = vec![format!("Entries {} ({})", app.selected_year, app.entries.len())];
    if !app.marked.is_empty() {
        parts.push(format!("[{} marked]", app.marked.len()));
    }
    if let Some(category) = app.filters.category {
        parts.push(format!("category: {category}"));
    }
    if let Some(paid) = app.filters.transport_paid {
        parts.push(format!("transport: {}", if paid { "paid" } else { "unpaid" }));
    }
    if let Some(range) = app.filters.month_range {
        parts.push(format!(
            "range: {}-{:02}..{}-{:02}",
            range.start.0, range.start.1, range.end.0, range.end.1
        ));
    }
    if !app.search_input.is_empty() {
        parts.push(format!("search: '{}'", app.search_input));
    }
    parts.push(format!("sort: {}", app.sort));
    format!(" {} ", parts.join(" | "))
}

/// Salary-only columns, blank for other categories.
fn salary_cells(record: &Record) -> [Cell<'static>; 3] {
    match record.salary() {
        Some(s) if !s.worked => [
            Cell::from(Span::styled("not worked", theme::dim_style())),
            Cell::from(""),
            Cell::from(""),
        ],
        Some(s) => [
            Cell::from(format_amount(s.salary_net)),
            Cell::from(format_amount(s.swile_payment)),
            Cell::from(Span::styled(
                if s.transport_paid { "paid" } else { "unpaid" },
                theme::flag_style(s.transport_paid),
            )),
        ],
        None => [Cell::from(""), Cell::from(""), Cell::from("")],
    }
}

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(title(app), theme::title_style()));

    if app.entries.is_empty() {
        let hint = if app.filters.is_active() || !app.search_input.is_empty() {
            "Nothing matches. :clear resets filters and search"
        } else {
            "No entries for this year. Add one with :salary or :import a file"
        };
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("No entries for {}", app.selected_year),
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(hint, theme::dim_style())),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = [
        "Month", "Category", "Amount", "Net", "Swile", "Transport", "Notes",
    ]
    .iter()
    .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .entries
        .iter()
        .enumerate()
        .skip(app.entry_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, record)| {
            let is_marked = app.marked.contains(&record.id);
            let is_cursor = i == app.entry_index;

            let month_cell = if is_marked {
                format!("\u{2022} {}", month_short(record.month))
            } else {
                format!("  {}", month_short(record.month))
            };

            let mut cells = vec![
                Cell::from(month_cell),
                Cell::from(record.category().label()),
                Cell::from(Span::styled(
                    format_amount(record.amount),
                    theme::income_style(),
                )),
            ];
            cells.extend(salary_cells(record));
            cells.push(Cell::from(truncate(&record.notes, 40)));

            let style = if is_cursor && is_marked {
                Style::default().fg(theme::HEADER_BG).bg(theme::YELLOW)
            } else if is_cursor {
                theme::selected_style()
            } else if is_marked {
                theme::marked_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(cells).style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Length(13),
        Constraint::Length(13),
        Constraint::Length(11),
        Constraint::Length(10),
        Constraint::Min(12),
    ];

    let table = Table::new(rows, widths).header(header).block(block);

    f.render_widget(table, area);
}
