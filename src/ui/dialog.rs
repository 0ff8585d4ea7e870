use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::theme::{COLOR_ACCENT, COLOR_MUTED};
use super::widgets::centered_box;
use crate::app::App;
use crate::utils::text_width;

const MIN_DIALOG_WIDTH: u16 = 36;

pub fn render(frame: &mut Frame, app: &App) {
    let Some(dialog) = app.dialog.as_ref() else {
        return;
    };

    let accent = Style::default()
        .fg(dialog.level.color())
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(COLOR_MUTED);

    let mut lines = dialog
        .message
        .lines()
        .map(|line| {
            Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(Color::White),
            ))
        })
        .collect::<Vec<_>>();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            "Enter",
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ok", label_style),
    ]));

    let text_cols = dialog
        .message
        .lines()
        .map(text_width)
        .max()
        .unwrap_or(0) as u16;
    let width = (text_cols + 4).max(MIN_DIALOG_WIDTH);
    let height = lines.len() as u16 + 2;
    let area = centered_box(width, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(dialog.level.title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(dialog.level.color()))
        .title_style(accent);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
