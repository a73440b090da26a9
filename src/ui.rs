pub mod menu;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use soundpath::{
    game::{GameState, Snapshot},
    maze::Position,
    streak::FeedbackKind,
};
use unicode_width::UnicodeWidthChar;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 2;
const MAX_CELL_WIDTH: u16 = 12;
const MAX_CELL_HEIGHT: u16 = 3;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.game.snapshot();
        let finished = matches!(snap.state, GameState::Won | GameState::Lost);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(1), // title / target sound
                    Constraint::Length(1), // lives, timer, moves
                    Constraint::Length(1), // streak feedback
                    Constraint::Min(1),    // board
                    Constraint::Length(if finished { 2 } else { 0 }),
                    Constraint::Length(1), // legend
                ]
                .as_ref(),
            )
            .split(area);

        header_line(&snap).render(chunks[0], buf);
        Paragraph::new(status_line(&snap))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        if self.show_feedback {
            if let Some(fb) = snap.feedback {
                let color = match fb.kind {
                    FeedbackKind::Cheer => Color::Green,
                    FeedbackKind::Jeer => Color::Red,
                };
                Paragraph::new(Span::styled(
                    fb.message,
                    Style::default().fg(color).add_modifier(Modifier::ITALIC),
                ))
                .alignment(Alignment::Center)
                .render(chunks[2], buf);
            }
        }

        BoardWidget {
            snap: &snap,
            reveal: snap.state == GameState::Lost,
        }
        .render(chunks[3], buf);

        if finished {
            let (text, color) = if snap.state == GameState::Won {
                (format!("You made it in {} moves!", snap.moves), Color::Green)
            } else {
                ("Out of lives. The true path is shown in cyan.".to_string(), Color::Red)
            };
            Paragraph::new(Span::styled(
                text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[4], buf);
        }

        let legend = if finished {
            "(n)ew maze / (r)estart / (esc)ape"
        } else {
            "arrows or hjkl to step / (r)estart / (esc)ape"
        };
        Paragraph::new(Span::styled(
            legend,
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[5], buf);
    }
}

fn header_line<'a>(snap: &Snapshot<'a>) -> Paragraph<'a> {
    let tier = snap
        .difficulty
        .map(|d| d.settings().display_name)
        .unwrap_or_default();
    let mut spans = vec![Span::styled(
        format!("{tier}  "),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(label) = snap.target_label {
        spans.push(Span::raw("follow the "));
        spans.push(Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" words"));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

fn status_line(snap: &Snapshot<'_>) -> Line<'static> {
    let lost = snap.max_lives.saturating_sub(snap.lives) as usize;
    let hearts = format!(
        "{}{}",
        "♥".repeat(snap.lives as usize),
        "♡".repeat(lost)
    );
    let timer_style = if snap.timer <= 3 && snap.state == GameState::Playing {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    Line::from(vec![
        Span::styled(hearts, Style::default().fg(Color::Red)),
        Span::raw("   "),
        Span::styled(format!("{}s", snap.timer), timer_style),
        Span::raw(format!("   {} moves", snap.moves)),
    ])
}

/// The word grid
pub struct BoardWidget<'a, 'b> {
    pub snap: &'b Snapshot<'a>,
    pub reveal: bool,
}

impl Widget for BoardWidget<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(level) = self.snap.level else {
            return;
        };
        let size = level.grid_size as u16;
        if size == 0 || area.width < size || area.height < size {
            return;
        }

        let cell_w = (area.width / size).min(MAX_CELL_WIDTH);
        let cell_h = (area.height / size).min(MAX_CELL_HEIGHT);
        let x0 = area.x + (area.width - cell_w * size) / 2;
        let y0 = area.y + (area.height - cell_h * size) / 2;

        for (pos, cell) in level.grid.cells() {
            let rect = Rect::new(
                x0 + pos.col as u16 * cell_w,
                y0 + pos.row as u16 * cell_h,
                cell_w,
                cell_h,
            );
            let style = self.cell_style(pos, cell.is_path, level.terminal());
            buf.set_style(rect, style);

            let text = fit_word(&cell.word, cell_w.saturating_sub(1) as usize);
            let text_w: u16 = text.chars().filter_map(|c| c.width()).sum::<usize>() as u16;
            let tx = rect.x + (cell_w.saturating_sub(text_w)) / 2;
            let ty = rect.y + cell_h / 2;
            buf.set_stringn(tx, ty, &text, cell_w as usize, style);
        }
    }
}

impl BoardWidget<'_, '_> {
    fn cell_style(&self, pos: Position, is_path: bool, terminal: Position) -> Style {
        let base = Style::default();
        if pos == self.snap.player_pos {
            base.fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if self.snap.player_path.contains(&pos) {
            base.fg(Color::Black).bg(Color::Green)
        } else if self.reveal && is_path {
            base.fg(Color::Black).bg(Color::Cyan)
        } else if pos == terminal {
            base.fg(Color::Magenta)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else if (pos.row + pos.col) % 2 == 0 {
            base.bg(Color::DarkGray)
        } else {
            base
        }
    }
}

/// Truncate `word` to at most `max_width` terminal columns, marking the cut with '…'.
pub fn fit_word(word: &str, max_width: usize) -> String {
    let total: usize = word.chars().filter_map(|c| c.width()).sum();
    if total <= max_width {
        return word.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in word.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
