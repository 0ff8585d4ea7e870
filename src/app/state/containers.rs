use super::App;
use crate::data::{ContainerRow, ListSnapshot};

impl App {
    pub fn poll_list_updates(&mut self) {
        let latest = self.monitor.as_ref().and_then(|monitor| monitor.latest());
        if let Some(snapshot) = latest {
            self.apply_list_snapshot(snapshot);
        }
    }

    /// Replaces the container list with a fresh poll.
    pub fn apply_list_snapshot(&mut self, snapshot: ListSnapshot) {
        self.last_refresh = Some(snapshot.taken_at);
        self.list_error = snapshot.error;
        self.container_rows = snapshot.rows;
        self.sync_container_selection();
    }

    pub(super) fn sync_container_selection(&mut self) {
        if self.container_rows.is_empty() {
            self.container_table_state.select(None);
            self.container_selected = None;
            self.container_scroll = 0;
            return;
        }

        let selected_idx = self
            .container_selected
            .as_deref()
            .and_then(|id| self.unique_row_with_id(id))
            .or_else(|| self.container_table_state.selected())
            .filter(|&idx| idx < self.container_rows.len())
            .unwrap_or(0);

        self.container_table_state.select(Some(selected_idx));
        self.container_selected = Some(self.container_rows[selected_idx].id.clone());
    }

    /// Index of the only row carrying `id`. Blank or repeated ids identify nothing.
    fn unique_row_with_id(&self, id: &str) -> Option<usize> {
        if id.is_empty() {
            return None;
        }
        let mut matches = self
            .container_rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.id == id)
            .map(|(idx, _)| idx);
        let first = matches.next()?;
        matches.next().is_none().then_some(first)
    }

    pub fn move_container_selection(&mut self, delta: i32) {
        if self.container_rows.is_empty() {
            self.container_table_state.select(None);
            self.container_selected = None;
            return;
        }

        let current = self.container_table_state.selected().unwrap_or(0);
        let len = self.container_rows.len();
        let new_index = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (current + delta as usize).min(len.saturating_sub(1))
        };
        self.select_container(new_index);
    }

    pub fn select_first_container(&mut self) {
        if !self.container_rows.is_empty() {
            self.select_container(0);
        }
    }

    pub fn select_last_container(&mut self) {
        if let Some(last) = self.container_rows.len().checked_sub(1) {
            self.select_container(last);
        }
    }

    fn select_container(&mut self, index: usize) {
        self.container_table_state.select(Some(index));
        self.container_selected = Some(self.container_rows[index].id.clone());
    }

    pub fn selected_container(&self) -> Option<&ContainerRow> {
        self.container_table_state
            .selected()
            .and_then(|idx| self.container_rows.get(idx))
    }

    pub fn running_container_count(&self) -> usize {
        self.container_rows
            .iter()
            .filter(|row| row.is_running())
            .count()
    }

    pub fn ensure_container_visible(&mut self, max_rows: usize) {
        if max_rows == 0 {
            return;
        }
        if let Some(selected) = self.container_table_state.selected() {
            if selected < self.container_scroll {
                self.container_scroll = selected;
            } else if selected >= self.container_scroll + max_rows {
                self.container_scroll = selected + 1 - max_rows;
            }
        }
        let max_scroll = self.container_rows.len().saturating_sub(max_rows);
        if self.container_scroll > max_scroll {
            self.container_scroll = max_scroll;
        }
    }
}
