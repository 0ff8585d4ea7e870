use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::types::{AppEvent, EventResult};
use crate::app::{App, Focus};

/// Rows moved by PageUp/PageDown in the containers table.
const PAGE_ROWS: i32 = 10;

/// Handle an application event
pub fn handle_event(app: &mut App, event: AppEvent) -> EventResult {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Tick => {
            app.tick();
            EventResult::Continue
        }
        AppEvent::ListUpdate(snapshot) => {
            app.apply_list_snapshot(snapshot);
            EventResult::Continue
        }
        AppEvent::Resize(_, _) => EventResult::Continue,
        AppEvent::Quit => EventResult::Exit,
    }
}

/// Handle a key event, returns EventResult
pub fn handle_key(app: &mut App, key: KeyEvent) -> EventResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return EventResult::Exit,
        KeyCode::Char('r') if ctrl => {
            app.request_refresh();
            return EventResult::Continue;
        }
        KeyCode::F(5) => {
            app.request_refresh();
            return EventResult::Continue;
        }
        _ => {}
    }

    if app.dialog.is_some() {
        if matches!(
            key.code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char(' ')
        ) {
            app.dismiss_dialog();
        }
        return EventResult::Continue;
    }

    if key.code == KeyCode::F(1) {
        app.toggle_help();
        return EventResult::Continue;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
            app.close_overlay();
        }
        return EventResult::Continue;
    }

    if app.show_containers {
        return handle_containers_key(app, key);
    }

    handle_form_key(app, key)
}

fn handle_containers_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_containers(),
        KeyCode::Up => app.move_container_selection(-1),
        KeyCode::Down => app.move_container_selection(1),
        KeyCode::PageUp => app.move_container_selection(-PAGE_ROWS),
        KeyCode::PageDown => app.move_container_selection(PAGE_ROWS),
        KeyCode::Home => app.select_first_container(),
        KeyCode::End => app.select_last_container(),
        KeyCode::Char('r') => app.request_refresh(),
        _ => {}
    }
    EventResult::Continue
}

fn handle_form_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            app.focus_next();
            return EventResult::Continue;
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.focus_prev();
            return EventResult::Continue;
        }
        _ => {}
    }

    match app.focus {
        Focus::Name => match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.push_name_char(ch);
            }
            KeyCode::Backspace => app.pop_name_char(),
            KeyCode::Enter => app.set_focus(Focus::Distro),
            KeyCode::Esc => app.clear_name(),
            _ => {}
        },
        Focus::Distro => match key.code {
            KeyCode::Char('q') => return EventResult::Exit,
            KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('l') => app.select_next_distro(),
            KeyCode::Left | KeyCode::Char('h') => app.select_prev_distro(),
            KeyCode::Enter => app.set_focus(Focus::CreateButton),
            _ => {}
        },
        Focus::CreateButton => match key.code {
            KeyCode::Char('q') => return EventResult::Exit,
            KeyCode::Enter | KeyCode::Char(' ') => app.submit_create(),
            _ => {}
        },
        Focus::ListButton => match key.code {
            KeyCode::Char('q') => return EventResult::Exit,
            KeyCode::Enter | KeyCode::Char(' ') => app.open_containers(),
            _ => {}
        },
    }
    EventResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Config, DialogLevel};
    use crate::data::{ContainerRow, ListSnapshot};

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> App {
        App::detached(Config::default())
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            handle_event(app, key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn ctrl_c_exits_everywhere() {
        let mut app = app();
        let ctrl_c = AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(handle_event(&mut app, ctrl_c).should_exit());
        assert!(handle_event(&mut app, AppEvent::Quit).should_exit());
    }

    #[test]
    fn q_is_text_in_name_field() {
        let mut app = app();
        type_text(&mut app, "quay");
        assert_eq!(app.name_input, "quay");
        handle_event(&mut app, key(KeyCode::Tab));
        assert!(handle_event(&mut app, key(KeyCode::Char('q'))).should_exit());
    }

    #[test]
    fn full_form_walk_rejects_missing_distro() {
        let mut app = app();
        type_text(&mut app, "dev");
        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.focus, Focus::Distro);
        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.focus, Focus::CreateButton);
        handle_event(&mut app, key(KeyCode::Enter));

        let dialog = app.dialog.as_ref().unwrap();
        assert_eq!(dialog.level, DialogLevel::Error);
        assert_eq!(dialog.message, "Please choose a distro first.");

        // Modal: typing does not reach the form until dismissed.
        handle_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::CreateButton);
        handle_event(&mut app, key(KeyCode::Esc));
        assert!(app.dialog.is_none());
    }

    #[test]
    fn distro_field_cycles() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Tab));
        handle_event(&mut app, key(KeyCode::Right));
        assert_eq!(app.selected_distro_name(), Some("Ubuntu"));
        handle_event(&mut app, key(KeyCode::Right));
        assert_eq!(app.selected_distro_name(), Some("Debian"));
        handle_event(&mut app, key(KeyCode::Right));
        assert_eq!(app.selected_distro_name(), None);
        handle_event(&mut app, key(KeyCode::Left));
        assert_eq!(app.selected_distro_name(), Some("Debian"));
    }

    #[test]
    fn list_button_opens_popup_and_navigates() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.focus, Focus::ListButton);
        handle_event(&mut app, key(KeyCode::Enter));
        assert!(app.show_containers);

        let rows = ["a", "b", "c"]
            .iter()
            .map(|id| ContainerRow {
                id: id.to_string(),
                ..ContainerRow::default()
            })
            .collect();
        handle_event(&mut app, AppEvent::ListUpdate(ListSnapshot::ok(rows)));
        handle_event(&mut app, key(KeyCode::End));
        assert_eq!(app.selected_container().unwrap().id, "c");
        handle_event(&mut app, key(KeyCode::Up));
        assert_eq!(app.selected_container().unwrap().id, "b");

        handle_event(&mut app, key(KeyCode::Esc));
        assert!(!app.show_containers);
    }

    #[test]
    fn help_toggles_with_f1() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::F(1)));
        assert!(app.show_help);
        handle_event(&mut app, key(KeyCode::Char('x')));
        assert!(app.name_input.is_empty());
        handle_event(&mut app, key(KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn backspace_and_escape_edit_name() {
        let mut app = app();
        type_text(&mut app, "devv");
        handle_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.name_input, "dev");
        handle_event(&mut app, key(KeyCode::Esc));
        assert!(app.name_input.is_empty());
    }
}
