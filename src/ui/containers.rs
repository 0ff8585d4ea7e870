use ratatui::prelude::*;
use ratatui::widgets::{Cell, Clear, HighlightSpacing, Paragraph, Row, Table, TableState};

use super::panel_block_focused;
use super::theme::{COLOR_HOT, COLOR_MUTED, COLOR_SELECTED_BG, color_for_status};
use super::widgets::centered_rect;
use crate::app::App;
use crate::data::{ContainerColumn, ContainerRow};
use crate::utils::text_width;

const TITLE: &str = "List Containers";
const MAX_COLUMN_WIDTH: usize = 48;

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect(90, 80, frame.area());
    frame.render_widget(Clear, area);
    if area.width == 0 || area.height == 0 {
        return;
    }

    if app.container_rows.is_empty() {
        let (text, style) = match app.list_error.as_deref() {
            Some(err) => (err.to_string(), Style::default().fg(COLOR_HOT)),
            None if app.last_refresh.is_none() => (
                "Loading containers...".to_string(),
                Style::default().fg(COLOR_MUTED),
            ),
            None => (
                "No containers found".to_string(),
                Style::default().fg(COLOR_MUTED),
            ),
        };
        let paragraph = Paragraph::new(Span::styled(text, style))
            .block(panel_block_focused(TITLE))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let max_rows = area.height.saturating_sub(3) as usize;
    app.ensure_container_visible(max_rows);

    let start = app.container_scroll.min(app.container_rows.len());
    let end = (start + max_rows).min(app.container_rows.len());
    let visible_rows = if start < end {
        &app.container_rows[start..end]
    } else {
        &[]
    };

    let table_rows = visible_rows
        .iter()
        .map(|row| {
            Row::new(
                ContainerColumn::ALL
                    .iter()
                    .map(|&column| {
                        let cell = Cell::from(row.cell(column).to_string());
                        if column == ContainerColumn::Status {
                            cell.style(Style::default().fg(color_for_status(&row.status)))
                        } else {
                            cell
                        }
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect::<Vec<_>>();

    let header = Row::new(
        ContainerColumn::ALL
            .iter()
            .map(|column| Cell::from(column.label()))
            .collect::<Vec<_>>(),
    )
    .style(
        Style::default()
            .fg(COLOR_MUTED)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(table_rows, column_widths(&app.container_rows))
        .header(header)
        .block(panel_block_focused(TITLE))
        .column_spacing(2)
        .row_highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(COLOR_SELECTED_BG)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ")
        .highlight_spacing(HighlightSpacing::Always);

    let mut state = TableState::default();
    if let Some(selected) = app.container_table_state.selected()
        && selected >= start
        && selected < end
    {
        state.select(Some(selected - start));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

/// Sizes each column to its widest cell; IMAGE takes the remaining space.
fn column_widths(rows: &[ContainerRow]) -> Vec<Constraint> {
    ContainerColumn::ALL
        .iter()
        .map(|&column| {
            let widest = rows
                .iter()
                .map(|row| text_width(row.cell(column)))
                .chain(std::iter::once(text_width(column.label())))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH) as u16;
            if column == ContainerColumn::Image {
                Constraint::Min(widest)
            } else {
                Constraint::Length(widest)
            }
        })
        .collect()
}
