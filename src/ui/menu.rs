use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use soundpath::difficulty::Difficulty;

use crate::App;

/// Pure presenter for one difficulty row
pub fn present_row(difficulty: Difficulty, selected: bool) -> Row<'static> {
    let s = difficulty.settings();
    let marker = if selected { "▶" } else { " " };
    let rule = if s.hardened {
        "one slip and it's over"
    } else {
        "decoys off the path"
    };

    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if s.hardened {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    Row::new(vec![
        Cell::from(format!("{marker} {}", difficulty.index() + 1)),
        Cell::from(s.display_name),
        Cell::from(format!("{0}×{0}", s.grid_size)),
        Cell::from(s.lives.to_string()),
        Cell::from(format!("{}s", s.timer_seconds)),
        Cell::from(rule),
    ])
    .style(style)
}

pub fn render_difficulty_menu(app: &App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Tiers
            Constraint::Length(2), // Instructions
        ])
        .split(f.area());

    let title = Paragraph::new("Walk from the top-left to the bottom-right on words that share one sound")
        .block(Block::default().borders(Borders::ALL).title("soundpath"))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let header = Row::new(vec!["", "Tier", "Grid", "Lives", "Timer", ""]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let rows: Vec<Row> = Difficulty::ALL
        .into_iter()
        .map(|d| present_row(d, d.index() == app.menu_index))
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Choose a difficulty"));
    f.render_widget(table, chunks[1]);

    let help = Paragraph::new("(↑/↓) select / (enter) or (1-4) start / (esc)ape")
        .style(Style::default().add_modifier(Modifier::ITALIC))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);
}
