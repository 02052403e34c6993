use crate::app::{update, SelectionState};
use crate::app::types::{ActionButton, ActivePanel, App, HitAreas};
use crate::app_event::Msg;
use crate::config::Theme;
use crate::models::SshConnection;

use ratatui::widgets::ListState;
use std::time::Instant;

impl App {
    pub fn new(state: SelectionState, theme: Theme) -> Self {
        let mut host_list_state = ListState::default();
        if !state.connections.is_empty() {
            host_list_state.select(Some(state.selected));
        }
        Self {
            state,
            theme,
            active_panel: ActivePanel::Hosts,
            focused_button: ActionButton::Select,
            status_message: None,
            host_list_state,
            hit_areas: HitAreas::default(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.state.quit
    }

    /// Run `msg` through the state machine and keep the list widget in step.
    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        self.state = update(state, msg);
        if !self.state.connections.is_empty() {
            self.host_list_state.select(Some(self.state.selected));
        }
    }

    pub fn into_state(self) -> SelectionState {
        self.state
    }

    pub fn get_selected_host(&self) -> Option<&SshConnection> {
        self.state.selected_connection()
    }

    fn selected_index(&self) -> isize {
        self.state.selected as isize
    }

    // Navigation. All of these lean on SetSelected saturating at both ends.
    pub fn select_next(&mut self) {
        self.dispatch(Msg::SetSelected(self.selected_index() + 1));
    }

    pub fn select_previous(&mut self) {
        self.dispatch(Msg::SetSelected(self.selected_index() - 1));
    }

    pub fn select_first(&mut self) {
        self.dispatch(Msg::SetSelected(0));
    }

    pub fn select_last(&mut self) {
        self.dispatch(Msg::SetSelected(isize::MAX));
    }

    pub fn page_down(&mut self) {
        let page = self.page_size();
        self.dispatch(Msg::SetSelected(self.selected_index().saturating_add(page)));
    }

    pub fn page_up(&mut self) {
        let page = self.page_size();
        self.dispatch(Msg::SetSelected(self.selected_index().saturating_sub(page)));
    }

    /// Rows visible inside the bordered host list.
    fn page_size(&self) -> isize {
        (self.hit_areas.hosts_list.height.saturating_sub(2)).max(1) as isize
    }

    pub fn switch_panel(&mut self) {
        self.active_panel = match self.active_panel {
            ActivePanel::Hosts => ActivePanel::Actions,
            ActivePanel::Actions => ActivePanel::Hosts,
        };
        tracing::info!("Switched to {:?} panel", self.active_panel);
    }

    pub fn toggle_focused_button(&mut self) {
        self.focused_button = match self.focused_button {
            ActionButton::Select => ActionButton::Quit,
            ActionButton::Quit => ActionButton::Select,
        };
    }

    pub fn press_button(&mut self, button: ActionButton) {
        match button {
            ActionButton::Select => self.dispatch(Msg::Commit),
            ActionButton::Quit => self.dispatch(Msg::Cancel),
        }
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    /// Put the highlighted connection's ssh command on the system clipboard.
    pub fn copy_selected_command(&mut self) {
        let Some(command) = self.get_selected_host().map(SshConnection::command) else {
            return;
        };

        let result = arboard::Clipboard::new().and_then(|mut cb| cb.set_text(command.clone()));
        match result {
            Ok(()) => {
                tracing::info!("Copied to clipboard: {}", command);
                self.set_status_message(format!("Copied: {}", command));
            }
            Err(e) => {
                tracing::error!("Clipboard error: {}", e);
                self.set_status_message(format!("Clipboard error: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Phase;
    use ratatui::layout::Rect;

    fn app(n: usize) -> App {
        let connections = (0..n).map(|i| SshConnection::new(format!("h{}", i))).collect();
        App::new(SelectionState::new(connections, false, false), Theme::default())
    }

    #[test]
    fn test_navigation_saturates() {
        let mut app = app(3);
        app.select_previous();
        assert_eq!(app.state.selected, 0);
        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.state.selected, 2);
        assert_eq!(app.host_list_state.selected(), Some(2));
        app.select_first();
        assert_eq!(app.state.selected, 0);
        app.select_last();
        assert_eq!(app.state.selected, 2);
    }

    #[test]
    fn test_page_moves_by_visible_rows() {
        let mut app = app(30);
        app.hit_areas.hosts_list = Rect::new(0, 0, 40, 12);
        app.page_down();
        assert_eq!(app.state.selected, 10);
        app.page_down();
        app.page_down();
        assert_eq!(app.state.selected, 29);
        app.page_up();
        assert_eq!(app.state.selected, 19);
    }

    #[test]
    fn test_page_before_first_draw_moves_one() {
        let mut app = app(5);
        app.page_down();
        assert_eq!(app.state.selected, 1);
    }

    #[test]
    fn test_buttons() {
        let mut app = app(2);
        app.select_next();
        app.press_button(ActionButton::Select);
        assert_eq!(app.state.phase(), Phase::Committed);
        assert_eq!(app.state.pending_command.as_deref(), Some("ssh h1"));

        let mut app = self::app(2);
        app.press_button(ActionButton::Quit);
        assert_eq!(app.state.phase(), Phase::Cancelled);
        assert!(app.should_quit());
    }

    #[test]
    fn test_panel_and_button_focus() {
        let mut app = app(1);
        assert_eq!(app.active_panel, ActivePanel::Hosts);
        app.switch_panel();
        assert_eq!(app.active_panel, ActivePanel::Actions);
        app.toggle_focused_button();
        assert_eq!(app.focused_button, ActionButton::Quit);
        app.toggle_focused_button();
        assert_eq!(app.focused_button, ActionButton::Select);
        app.switch_panel();
        assert_eq!(app.active_panel, ActivePanel::Hosts);
    }
}
