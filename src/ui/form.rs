use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::theme::{COLOR_ACCENT, COLOR_MUTED, COLOR_SELECTED_BG, color_for_status};
use super::{panel_block, panel_block_focused};
use crate::app::{App, Focus};
use crate::utils::{fit_text, tail_width, text_width};

pub const CREATE_HEIGHT: u16 = 7;
pub const MANAGE_HEIGHT: u16 = 5;

const LABEL_WIDTH: usize = 8;
const DISTRO_PLACEHOLDER: &str = "Select Distro";

pub fn render_create(frame: &mut Frame, area: Rect, app: &App) {
    let focused = matches!(
        app.focus,
        Focus::Name | Focus::Distro | Focus::CreateButton
    );
    let block = if focused {
        panel_block_focused("Create")
    } else {
        panel_block("Create")
    };
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let width = inner.width as usize;
    let lines = vec![
        name_line(app, width),
        Line::from(""),
        distro_line(app, width),
        Line::from(""),
        create_button_line(app),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn render_manage(frame: &mut Frame, area: Rect, app: &App) {
    let block = if app.focus == Focus::ListButton {
        panel_block_focused("Manage")
    } else {
        panel_block("Manage")
    };
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut lines = vec![
        button_line("List Containers", app.focus == Focus::ListButton),
        Line::from(""),
    ];

    let label_style = Style::default().fg(COLOR_MUTED);
    let width = inner.width as usize;
    let preview_rows = (inner.height as usize).saturating_sub(lines.len());
    if app.container_rows.is_empty() {
        let text = if app.last_refresh.is_some() {
            "No containers found"
        } else {
            "Loading containers..."
        };
        lines.push(Line::from(Span::styled(text, label_style)));
    } else {
        for row in app.container_rows.iter().take(preview_rows) {
            let name = fit_text(&row.name, width.saturating_sub(4).min(32));
            let pad = 34usize.saturating_sub(text_width(&name));
            lines.push(Line::from(vec![
                Span::styled("  ", label_style),
                Span::styled(name, Style::default().fg(Color::White)),
                Span::raw(" ".repeat(pad)),
                Span::styled(
                    fit_text(&row.status, width.saturating_sub(38)),
                    Style::default().fg(color_for_status(&row.status)),
                ),
            ]));
        }
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn name_line(app: &App, width: usize) -> Line<'static> {
    let active = app.focus == Focus::Name;
    let room = width.saturating_sub(LABEL_WIDTH + 2);
    let value = if app.name_input.is_empty() && !active {
        Span::styled("Enter Name", Style::default().fg(COLOR_MUTED))
    } else {
        let mut shown = tail_width(&app.name_input, room);
        if active {
            shown.push('|');
        }
        Span::styled(shown, input_style(active))
    };
    Line::from(vec![label_span("Name", active), value])
}

fn distro_line(app: &App, width: usize) -> Line<'static> {
    let active = app.focus == Focus::Distro;
    let room = width.saturating_sub(LABEL_WIDTH + 4);
    let selected = app.selected_distro.and_then(|idx| app.distros.get(idx));
    let text = match selected {
        Some(distro) => format!("{} ({})", distro.name, distro.image),
        None => DISTRO_PLACEHOLDER.to_string(),
    };
    let value_style = if selected.is_some() {
        input_style(active)
    } else {
        input_style(active).fg(COLOR_MUTED)
    };
    let arrow_style = if active {
        Style::default().fg(COLOR_ACCENT)
    } else {
        Style::default().fg(COLOR_MUTED)
    };
    Line::from(vec![
        label_span("Distro", active),
        Span::styled("< ", arrow_style),
        Span::styled(fit_text(&text, room), value_style),
        Span::styled(" >", arrow_style),
    ])
}

fn create_button_line(app: &App) -> Line<'static> {
    let label = match app.creating.as_deref() {
        Some(name) => format!("Creating {name}..."),
        None => "Create Container".to_string(),
    };
    let mut line = button_line(&label, app.focus == Focus::CreateButton);
    line.spans.insert(0, Span::raw(" ".repeat(LABEL_WIDTH)));
    line
}

fn button_line(label: &str, active: bool) -> Line<'static> {
    let style = if active {
        Style::default()
            .fg(Color::White)
            .bg(COLOR_SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_ACCENT)
    };
    Line::from(Span::styled(format!("[ {label} ]"), style))
}

fn label_span(label: &str, active: bool) -> Span<'static> {
    let style = if active {
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(COLOR_MUTED)
            .add_modifier(Modifier::BOLD)
    };
    Span::styled(format!("{label:<LABEL_WIDTH$}"), style)
}

fn input_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::White).bg(COLOR_SELECTED_BG)
    } else {
        Style::default().fg(Color::White)
    }
}
