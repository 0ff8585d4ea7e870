use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_MUTED};
use super::widgets::centered_rect;
use crate::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    if !app.show_help {
        return;
    }

    let area = centered_rect(72, 70, frame.area());
    frame.render_widget(Clear, area);

    let key_style = Style::default()
        .fg(COLOR_ACCENT)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default()
        .fg(COLOR_MUTED)
        .add_modifier(Modifier::BOLD);
    let hint_style = Style::default().fg(COLOR_MUTED);

    let entry = |key: &'static str, hint: &'static str| {
        Line::from(vec![
            Span::styled(format!("{key:<14}"), key_style),
            Span::styled(hint, hint_style),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("Form", label_style)),
        entry("Tab/Down", "next field"),
        entry("Shift+Tab/Up", "previous field"),
        entry("Left/Right", "choose distro"),
        entry("Enter", "confirm field / press button"),
        entry("Esc", "clear name"),
        entry("Name", "up to 64 characters"),
        Line::from(""),
        Line::from(Span::styled("Containers", label_style)),
        entry("Up/Down", "move"),
        entry("PgUp/PgDn", "page"),
        entry("Home/End", "top/bottom"),
        entry("r", "refresh"),
        entry("Esc/q", "close"),
        Line::from(""),
        Line::from(Span::styled("Anywhere", label_style)),
        entry("F1", "toggle help"),
        entry("F5/Ctrl+R", "refresh container list"),
        entry("q", "quit (outside the name field)"),
        entry("Ctrl+C", "quit"),
    ];

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title_style(
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        );
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
