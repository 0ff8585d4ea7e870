mod containers;
mod form;

use std::sync::mpsc;
use std::time::Instant;

use ratatui::widgets::TableState;

use super::config::Config;
use super::dialog::Dialog;
use super::focus::Focus;
use super::status::{StatusLevel, StatusMessage};
use crate::data::{
    ContainerRow, CreateOutcome, CreateSettings, DistroCatalog, ListMonitor, start_list_monitor,
};

pub struct App {
    pub focus: Focus,
    pub name_input: String,
    pub distros: DistroCatalog,
    pub selected_distro: Option<usize>,
    pub nvidia: bool,
    create_settings: CreateSettings,
    create_rx: Option<mpsc::Receiver<CreateOutcome>>,
    pub creating: Option<String>,
    pub container_rows: Vec<ContainerRow>,
    pub container_table_state: TableState,
    pub container_selected: Option<String>,
    pub container_scroll: usize,
    pub last_refresh: Option<Instant>,
    pub list_error: Option<String>,
    monitor: Option<ListMonitor>,
    pub show_containers: bool,
    pub show_help: bool,
    pub dialog: Option<Dialog>,
    pub status: Option<StatusMessage>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let monitor = start_list_monitor(config.list.clone());
        Self::with_monitor(config, Some(monitor))
    }

    /// Builds the app without starting the list poller.
    pub fn detached(config: Config) -> Self {
        Self::with_monitor(config, None)
    }

    fn with_monitor(config: Config, monitor: Option<ListMonitor>) -> Self {
        Self {
            focus: Focus::default(),
            name_input: String::new(),
            distros: config.distros,
            selected_distro: None,
            nvidia: config.nvidia,
            create_settings: config.create,
            create_rx: None,
            creating: None,
            container_rows: Vec::new(),
            container_table_state: TableState::default(),
            container_selected: None,
            container_scroll: 0,
            last_refresh: None,
            list_error: None,
            monitor,
            show_containers: false,
            show_help: false,
            dialog: None,
            status: None,
        }
    }

    pub fn tick(&mut self) {
        self.poll_list_updates();
        self.poll_create();
        self.clear_expired_status();
    }

    pub fn request_refresh(&mut self) {
        match self.monitor.as_ref() {
            Some(monitor) => {
                monitor.request_refresh();
                self.set_status(StatusLevel::Info, "Refreshing container list".to_string());
            }
            None => self.set_status(StatusLevel::Warn, "Container list is not polled".to_string()),
        }
    }

    pub fn set_status(&mut self, level: StatusLevel, message: String) {
        self.status = Some(StatusMessage::new(level, message));
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn show_dialog(&mut self, dialog: Dialog) {
        self.dialog = Some(dialog);
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn open_containers(&mut self) {
        self.show_containers = true;
        self.show_help = false;
        self.sync_container_selection();
    }

    pub fn close_containers(&mut self) {
        self.show_containers = false;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Closes the topmost overlay. Returns false when nothing was open.
    pub fn close_overlay(&mut self) -> bool {
        if self.dialog.is_some() {
            self.dismiss_dialog();
        } else if self.show_help {
            self.show_help = false;
        } else if self.show_containers {
            self.close_containers();
        } else {
            return false;
        }
        true
    }

    fn clear_expired_status(&mut self) {
        if let Some(status) = self.status.as_ref()
            && status.is_expired()
        {
            self.status = None;
        }
    }
}
