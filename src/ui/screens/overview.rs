use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Sparkline, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::{App, MonthLine};
use crate::ui::theme;
use crate::ui::util::{format_amount, month_name};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(8),    // Month grid
            Constraint::Length(3), // Salary sparkline
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_month_grid(f, chunks[1], app);
    render_salary_sparkline(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    let stats = &app.statistics;
    let completed_color = if app.completed == 12 {
        theme::GREEN
    } else {
        theme::PEACH
    };

    render_card(
        f,
        cards[0],
        "Completed",
        format!("{}/12", app.completed),
        completed_color,
    );
    render_card(
        f,
        cards[1],
        "Total Salary",
        format_amount(stats.total_salary),
        theme::GREEN,
    );
    render_card(
        f,
        cards[2],
        "Swile",
        format_amount(stats.total_swile_payments),
        theme::ACCENT,
    );
    render_card(
        f,
        cards[3],
        "Average Salary",
        format_amount(stats.average_salary),
        theme::TEXT,
    );
    render_card(
        f,
        cards[4],
        "Transport Default",
        format_amount(app.transport_default),
        theme::YELLOW,
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn status_label(line: &MonthLine) -> (&'static str, Style) {
    let status = &line.status;
    match &line.salary {
        None => ("no entry", theme::dim_style()),
        Some(_) if status.not_worked => ("not worked", theme::dim_style()),
        Some(_) => {
            let label = if status.is_complete {
                "complete"
            } else if !status.has_salary {
                "salary missing"
            } else {
                "swile missing"
            };
            (label, theme::month_style(status.is_complete, false))
        }
    }
}

fn render_month_grid(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["Month", "Status", "Net", "Swile", "Transport", "Extras"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .months
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let (label, label_style) = status_label(line);
            let money = |v: Option<Decimal>| v.map(format_amount).unwrap_or_else(|| "-".into());

            let transport = match &line.salary {
                Some(s) if s.worked => Span::styled(
                    if s.transport_paid { "paid" } else { "unpaid" },
                    theme::flag_style(s.transport_paid),
                ),
                _ => Span::styled("-", theme::dim_style()),
            };
            let extras = if line.extras > Decimal::ZERO {
                Span::styled(format_amount(line.extras), theme::income_style())
            } else {
                Span::styled("-", theme::dim_style())
            };

            let row = Row::new(vec![
                Cell::from(month_name(line.status.month)),
                Cell::from(Span::styled(label, label_style)),
                Cell::from(money(line.salary.as_ref().map(|s| s.salary_net))),
                Cell::from(money(line.salary.as_ref().map(|s| s.swile_payment))),
                Cell::from(transport),
                Cell::from(extras),
            ]);

            if i == app.month_index {
                row.style(theme::selected_style())
            } else if i % 2 == 1 {
                row.style(theme::alt_row_style())
            } else {
                row.style(theme::normal_style())
            }
        })
        .collect();

    let widths = [
        Constraint::Length(11),
        Constraint::Length(16),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Min(12),
    ];

    let stats = &app.statistics;
    let title = format!(
        " {} | {} worked, {} not worked | transport {} paid / {} unpaid ",
        app.selected_year,
        stats.worked_months,
        stats.not_worked_months,
        stats.paid_transport_count,
        stats.unpaid_transport_count
    );

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(title, theme::title_style())),
    );

    f.render_widget(table, area);
}

fn render_salary_sparkline(f: &mut Frame, area: Rect, app: &App) {
    let data: Vec<u64> = app
        .months
        .iter()
        .map(|line| {
            line.salary
                .as_ref()
                .and_then(|s| s.salary_net.to_u64())
                .unwrap_or(0)
        })
        .collect();

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(" Net Salary by Month ", theme::title_style())),
        )
        .data(&data)
        .style(Style::default().fg(theme::GREEN));

    f.render_widget(sparkline, area);
}
