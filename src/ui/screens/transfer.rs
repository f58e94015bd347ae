use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::app::{App, LineKind};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(5)])
        .split(area);

    render_instructions(f, chunks[0], app);
    render_log(f, chunks[1], app);
}

fn render_instructions(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("  :export [path] [all]  ", theme::section_style()),
            Span::styled(
                format!("Write {} (or every year with 'all') as JSON", app.selected_year),
                theme::normal_style(),
            ),
        ]),
        Line::from(vec![
            Span::styled("  :import <path>        ", theme::section_style()),
            Span::styled(
                "Merge a JSON export; entries whose id already exists are skipped",
                theme::normal_style(),
            ),
        ]),
        Line::from(vec![
            Span::styled("  :sample [path]        ", theme::section_style()),
            Span::styled("Write an example import file", theme::normal_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {} entries stored", app.total_records),
            theme::dim_style(),
        )),
    ];
    if let Some(err) = &app.load_error {
        lines.push(Line::from(Span::styled(
            format!("  {err}"),
            theme::error_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Import / Export ", theme::title_style()));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_log(f: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = app.transfer_log.len().saturating_sub(visible);

    let lines: Vec<Line> = if app.transfer_log.is_empty() {
        vec![Line::from(Span::styled(
            "  Nothing imported or exported yet",
            theme::dim_style(),
        ))]
    } else {
        app.transfer_log
            .iter()
            .skip(skip)
            .map(|(kind, text)| {
                let style = match kind {
                    LineKind::Info => theme::normal_style(),
                    LineKind::Warning => theme::warning_style(),
                    LineKind::Error => theme::error_style(),
                };
                Line::from(Span::styled(format!("  {text}"), style))
            })
            .collect()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Log ", theme::title_style()));
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}
