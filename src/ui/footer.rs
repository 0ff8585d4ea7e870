use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_MUTED};
use crate::app::{App, Focus};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default()
        .fg(COLOR_ACCENT)
        .add_modifier(Modifier::BOLD);
    let hint_style = Style::default().fg(COLOR_MUTED);

    let line = if let Some(status) = app.status.as_ref() {
        Line::from(Span::styled(status.text.as_str(), status.level.style()))
    } else {
        let field_hint = match app.focus {
            Focus::Name => ("type", "name"),
            Focus::Distro => ("left/right", "distro"),
            Focus::CreateButton => ("enter", "create"),
            Focus::ListButton => ("enter", "list"),
        };
        let mut spans = vec![
            Span::styled("tab", key_style),
            Span::styled(" next  ", hint_style),
            Span::styled(field_hint.0, key_style),
            Span::styled(format!(" {}  ", field_hint.1), hint_style),
            Span::styled("F5", key_style),
            Span::styled(" refresh  ", hint_style),
            Span::styled("F1", key_style),
            Span::styled(" help  ", hint_style),
        ];
        if !app.focus.accepts_text() {
            spans.push(Span::styled("q", key_style));
            spans.push(Span::styled(" quit  ", hint_style));
        }
        spans.push(Span::styled("ctrl+c", key_style));
        spans.push(Span::styled(" exit", hint_style));
        Line::from(spans)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER));
    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
