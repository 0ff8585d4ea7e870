mod containers;
mod dialog;
mod footer;
mod form;
mod header;
mod help;
pub mod theme;
mod widgets;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use theme::COLOR_BORDER;

const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 20;

pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();
    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        let msg = Paragraph::new(format!(
            "Terminal too small. Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}."
        ))
        .block(panel_block("DistroHub"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(msg, size);
        return;
    }

    let header_height = 4;
    let footer_height = 3;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Length(form::CREATE_HEIGHT),
            Constraint::Min(form::MANAGE_HEIGHT),
            Constraint::Length(footer_height),
        ])
        .split(size);

    header::render(frame, chunks[0], app);
    form::render_create(frame, chunks[1], app);
    form::render_manage(frame, chunks[2], app);
    footer::render(frame, chunks[3], app);

    if app.show_containers {
        containers::render(frame, app);
    }
    help::render(frame, app);
    dialog::render(frame, app);
}

pub fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title_style(
            Style::default()
                .fg(theme::COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )
}

pub fn panel_block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(theme::COLOR_ACCENT))
        .title_style(
            Style::default()
                .fg(theme::COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )
}
