use ratatui::style::Color;

pub const COLOR_ACCENT: Color = Color::Rgb(78, 190, 210);
pub const COLOR_MUTED: Color = Color::Rgb(138, 148, 158);
pub const COLOR_BORDER: Color = Color::Rgb(78, 86, 96);
pub const COLOR_GOOD: Color = Color::Rgb(95, 200, 120);
pub const COLOR_WARN: Color = Color::Rgb(230, 180, 70);
pub const COLOR_HOT: Color = Color::Rgb(230, 90, 70);
pub const COLOR_SELECTED_BG: Color = Color::Rgb(40, 48, 58);

/// Colour for a `distrobox-list` status cell.
pub fn color_for_status(status: &str) -> Color {
    let status = status.to_ascii_lowercase();
    if status.starts_with("up") || status.starts_with("running") {
        COLOR_GOOD
    } else if status.starts_with("created") || status.starts_with("paused") {
        COLOR_WARN
    } else if status.starts_with("exited") || status.starts_with("dead") {
        COLOR_HOT
    } else {
        COLOR_MUTED
    }
}
