//! TUI rendering with ratatui

use super::app::{App, MessageStyle};
use crate::core::Feedback;
use crate::game::{Cell, RowKind, SessionState};
use crate::output::{countdown, match_pill, share_text};
use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Board and side panel
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_board(f, app, main_chunks[0]);
    render_side_panel(f, app, main_chunks[1]);
    render_status(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let snapshot = app.game.session_snapshot();
    let title = format!(
        "BRACKLE  {}  {}",
        snapshot.date.format("%Y-%m-%d"),
        if app.game.is_practice() {
            "(practice)"
        } else {
            ""
        }
    );
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn cell_style(cell: &Cell, selected: bool) -> Style {
    let style = match cell.feedback {
        Some(Feedback::Hit) => Style::default().fg(Color::Black).bg(Color::Green),
        Some(Feedback::Near) => Style::default().fg(Color::Black).bg(Color::Yellow),
        Some(Feedback::Far) => Style::default().fg(Color::White).bg(Color::DarkGray),
        None if cell.clickable => Style::default().fg(Color::Yellow),
        None => Style::default().fg(Color::White),
    };
    if selected || cell.cursor {
        style.add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        style
    }
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let rows = app.game.current_display_rows();
    let snapshot = app.game.session_snapshot();
    let len = rows.first().map_or(0, |r| r.cells.len());

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Match: "),
            Span::styled(
                match_pill(snapshot.last_match_count, len),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                if snapshot.show_heights {
                    "   showing heights"
                } else {
                    ""
                },
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
    ];

    for row in &rows {
        let dim = matches!(row.kind, RowKind::Future | RowKind::Empty);
        let spans: Vec<Span> = row
            .cells
            .iter()
            .enumerate()
            .flat_map(|(i, cell)| {
                let selected = cell.clickable && i == app.selected;
                let text = if cell.text.is_empty() {
                    "·"
                } else {
                    cell.text.as_str()
                };
                let style = if dim {
                    Style::default().fg(Color::DarkGray)
                } else {
                    cell_style(cell, selected)
                };
                [Span::styled(format!(" {text:>1} "), style), Span::raw(" ")]
            })
            .collect();
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    if let Some(answer) = &snapshot.answer {
        lines.push(Line::from(vec![
            Span::raw("Answer: "),
            Span::styled(
                answer.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    let board = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Board ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(board, area);
}

fn render_side_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    if app.show_stats {
        render_stats(f, app, chunks[0]);
    } else {
        render_help(f, app, chunks[0]);
    }
    render_messages(f, app, chunks[1]);
}

fn render_help(f: &mut Frame, app: &App, area: Rect) {
    let tries = app.game.session().day().tries_used();
    let max = app.game.session_snapshot().max_tries;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(area);

    let content = vec![
        Line::from("Find the hidden sequence of ( ) *."),
        Line::from("Height starts at 0: ( goes up, ) down."),
        Line::from("It never drops below 0 and ends at 0."),
        Line::from(""),
        Line::from("After a miss, reveal one cell:"),
        Line::from(vec![
            Span::styled("   ", Style::default().bg(Color::Green)),
            Span::raw(" same height"),
        ]),
        Line::from(vec![
            Span::styled("   ", Style::default().bg(Color::Yellow)),
            Span::raw(" off by 1–2"),
        ]),
        Line::from(vec![
            Span::styled("   ", Style::default().bg(Color::DarkGray)),
            Span::raw(" off by 3 or more"),
        ]),
    ];
    let help = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" How to play ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(help, chunks[0]);

    let pct = u16::try_from(tries * 100 / max.max(1)).unwrap_or(100);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(pct)
        .label(format!("{tries}/{max} tries"));
    f.render_widget(gauge, chunks[1]);
}

fn render_stats(f: &mut Frame, app: &App, area: Rect) {
    let stats = app.game.stats_snapshot();
    let max = stats.max_count();

    let mut lines = vec![
        Line::from(format!(
            "Played {}   Win % {}   Streak {}   Max {}",
            stats.played, stats.win_percent, stats.current_streak, stats.max_streak
        )),
        Line::from(""),
    ];

    for row in &stats.rows {
        let width = row.bar_percent(max) as usize * 20 / 100;
        let color = if row.is_today {
            Color::Green
        } else {
            Color::DarkGray
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{}: ", row.key)),
            Span::styled("█".repeat(width), Style::default().fg(color)),
            Span::raw(format!(" {}", row.count)),
        ]));
    }

    let snapshot = app.game.session_snapshot();
    if snapshot.state.is_terminal() {
        lines.push(Line::from(""));
        for text in share_text(&app.game.share_summary()).lines() {
            lines.push(Line::from(text.to_string()));
        }
        if !app.game.is_practice() {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("Next puzzle in "),
                Span::styled(countdown(Utc::now()), Style::default().fg(Color::Cyan)),
            ]));
        }
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(" Statistics ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Color::Green)),
    );
    f.render_widget(panel, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.game.session().state() {
        SessionState::Editing => "( ) *: Type | Backspace | Enter: Submit | b: Heights | s: Stats | q: Quit",
        SessionState::AwaitingReveal => "←/→ or 1-8: Pick cell | Enter: Reveal | b: Heights | q: Quit",
        SessionState::Won | SessionState::Lost => "b: Heights | s: Stats | q: Quit",
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}
