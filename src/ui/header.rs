use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::panel_block;
use super::theme::{COLOR_ACCENT, COLOR_GOOD, COLOR_HOT, COLOR_MUTED};
use crate::app::App;
use crate::utils::{fit_text, format_age};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let title_style = Style::default()
        .fg(COLOR_ACCENT)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default()
        .fg(COLOR_MUTED)
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(Color::White);

    let first_line = Line::from(vec![
        Span::styled("DistroHub", title_style),
        Span::raw("  "),
        Span::styled("distrobox manager", Style::default().fg(COLOR_MUTED)),
        Span::raw("  "),
        Span::styled("containers ", label_style),
        Span::styled(app.container_rows.len().to_string(), value_style),
        Span::raw("  "),
        Span::styled("running ", label_style),
        Span::styled(
            app.running_container_count().to_string(),
            Style::default().fg(COLOR_GOOD),
        ),
        Span::raw("  "),
        Span::styled("nvidia ", label_style),
        Span::styled(
            if app.nvidia { "on" } else { "off" },
            Style::default().fg(COLOR_ACCENT),
        ),
    ]);

    let refreshed = match app.last_refresh {
        Some(at) => format_age(at.elapsed()),
        None => "waiting for first poll".to_string(),
    };
    let mut second_line = vec![
        Span::styled("updated ", label_style),
        Span::styled(refreshed, value_style),
    ];
    if let Some(err) = app.list_error.as_deref() {
        let room = (area.width as usize).saturating_sub(40);
        second_line.push(Span::raw("  "));
        second_line.push(Span::styled("list error ", label_style));
        second_line.push(Span::styled(
            fit_text(err, room),
            Style::default().fg(COLOR_HOT),
        ));
    }

    let paragraph =
        Paragraph::new(vec![first_line, Line::from(second_line)]).block(panel_block("Summary"));
    frame.render_widget(paragraph, area);
}
