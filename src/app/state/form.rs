use std::sync::mpsc::TryRecvError;

use super::App;
use crate::app::dialog::Dialog;
use crate::app::status::{StatusLevel, StatusMessage};
use crate::data::{CreateOutcome, CreateRequest, start_create};

/// Longest name the input accepts.
const MAX_NAME_LEN: usize = 64;

impl App {
    pub fn push_name_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        if self.name_input.chars().count() >= MAX_NAME_LEN {
            self.set_status(
                StatusLevel::Warn,
                format!("Name is limited to {MAX_NAME_LEN} characters"),
            );
            return;
        }
        self.name_input.push(ch);
    }

    pub fn pop_name_char(&mut self) {
        self.name_input.pop();
    }

    pub fn clear_name(&mut self) {
        self.name_input.clear();
    }

    pub fn select_next_distro(&mut self) {
        self.selected_distro = self.distros.next(self.selected_distro);
    }

    pub fn select_prev_distro(&mut self) {
        self.selected_distro = self.distros.prev(self.selected_distro);
    }

    pub fn selected_distro_name(&self) -> Option<&str> {
        self.selected_distro
            .and_then(|idx| self.distros.get(idx))
            .map(|distro| distro.name.as_str())
    }

    pub fn is_creating(&self) -> bool {
        self.creating.is_some()
    }

    /// Validates the form and starts a create run in the background.
    pub fn submit_create(&mut self) {
        if let Some(name) = self.creating.as_ref() {
            let message = format!("Still creating '{name}'");
            self.set_status(StatusLevel::Warn, message);
            return;
        }

        let image = self
            .selected_distro_name()
            .and_then(|name| self.distros.image_for(name));
        let request = match CreateRequest::new(&self.name_input, image, self.nvidia) {
            Ok(request) => request,
            Err(rejection) => {
                self.show_dialog(Dialog::error(rejection.message()));
                return;
            }
        };

        tracing::info!(name = %request.name, image = %request.image, "creating container");
        self.status = Some(StatusMessage::sticky(
            StatusLevel::Busy,
            format!("Creating '{}' from {}...", request.name, request.image),
        ));
        self.creating = Some(request.name.clone());
        self.create_rx = Some(start_create(self.create_settings.clone(), request));
    }

    pub fn poll_create(&mut self) {
        let Some(rx) = self.create_rx.as_ref() else {
            return;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                let name = self.creating.clone().unwrap_or_default();
                CreateOutcome::failed(&name)
            }
        };
        self.finish_create(outcome);
    }

    pub fn finish_create(&mut self, outcome: CreateOutcome) {
        self.create_rx = None;
        self.creating = None;
        self.status = None;
        self.show_dialog(Dialog::from(&outcome));
        if !outcome.is_error() {
            self.request_refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::{App, Config, DialogLevel, StatusLevel};
    use crate::data::{CreateOutcome, CreateOutcomeKind};

    fn app() -> App {
        App::detached(Config::default())
    }

    #[test]
    fn submit_without_distro_shows_error() {
        let mut app = app();
        app.name_input = "dev".to_string();
        app.submit_create();
        let dialog = app.dialog.as_ref().unwrap();
        assert_eq!(dialog.level, DialogLevel::Error);
        assert_eq!(dialog.message, "Please choose a distro first.");
        assert!(!app.is_creating());
    }

    #[test]
    fn submit_without_name_shows_error() {
        let mut app = app();
        app.select_next_distro();
        app.submit_create();
        assert_eq!(
            app.dialog.as_ref().unwrap().message,
            "Please enter a name first."
        );
    }

    #[test]
    fn submit_while_creating_is_refused() {
        let mut app = app();
        app.creating = Some("dev".to_string());
        app.name_input = "other".to_string();
        app.select_next_distro();
        app.submit_create();
        assert!(app.dialog.is_none());
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.level, StatusLevel::Warn);
        assert_eq!(app.creating.as_deref(), Some("dev"));
    }

    #[test]
    fn finish_create_shows_outcome() {
        let mut app = app();
        app.creating = Some("dev".to_string());
        app.finish_create(CreateOutcome {
            name: "dev".to_string(),
            kind: CreateOutcomeKind::AlreadyExists,
        });
        assert!(!app.is_creating());
        let dialog = app.dialog.as_ref().unwrap();
        assert_eq!(dialog.level, DialogLevel::Info);
        assert!(dialog.message.ends_with("distrobox enter dev"));

        app.finish_create(CreateOutcome::failed("dev"));
        assert_eq!(app.dialog.as_ref().unwrap().level, DialogLevel::Error);
    }

    #[test]
    fn name_input_editing() {
        let mut app = app();
        for ch in "dev\u{7}box".chars() {
            app.push_name_char(ch);
        }
        assert_eq!(app.name_input, "devbox");
        app.pop_name_char();
        assert_eq!(app.name_input, "devbo");
        app.clear_name();
        assert!(app.name_input.is_empty());
    }

    #[test]
    fn name_input_warns_at_length_limit() {
        let mut app = app();
        for _ in 0..70 {
            app.push_name_char('a');
        }
        assert_eq!(app.name_input.chars().count(), 64);
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.level, StatusLevel::Warn);
        assert_eq!(status.text, "Name is limited to 64 characters");
    }

    #[test]
    fn submit_uses_image_of_selected_distro() {
        let mut app = app();
        app.create_settings.command = "distrohub-definitely-missing-binary".to_string();
        app.name_input = "dev".to_string();
        app.select_prev_distro();
        app.submit_create();
        assert!(app.dialog.is_none());
        assert_eq!(app.creating.as_deref(), Some("dev"));
        assert!(app.status.as_ref().unwrap().text.contains("debian:latest"));
    }

    #[test]
    fn distro_selection_names() {
        let mut app = app();
        assert_eq!(app.selected_distro_name(), None);
        app.select_next_distro();
        assert_eq!(app.selected_distro_name(), Some("Ubuntu"));
        app.select_prev_distro();
        app.select_prev_distro();
        assert_eq!(app.selected_distro_name(), Some("Debian"));
    }
}
