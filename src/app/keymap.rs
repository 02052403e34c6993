use crate::app::{ActionButton, ActivePanel, App};
use crate::app_event::Msg;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

fn hit(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Windows reports releases too
        if key.kind == KeyEventKind::Release {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.handle_key_q();
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.handle_key_q(),
            KeyCode::Esc => self.handle_key_esc(),
            KeyCode::Enter => self.handle_key_enter(),
            KeyCode::Tab | KeyCode::BackTab => self.switch_panel(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            KeyCode::Left | KeyCode::Right => self.handle_key_left_right(),
            KeyCode::Char('y') => self.copy_selected_command(),
            _ => {}
        }
    }

    pub fn handle_key_enter(&mut self) {
        match self.active_panel {
            ActivePanel::Hosts => {
                if let Some(host) = self.get_selected_host() {
                    tracing::info!("Enter pressed, selected host: {:?}", host.host);
                }
                self.dispatch(Msg::Commit);
            }
            ActivePanel::Actions => self.press_button(self.focused_button),
        }
    }

    pub fn handle_key_q(&mut self) {
        self.dispatch(Msg::Cancel);
    }

    pub fn handle_key_esc(&mut self) {
        self.dispatch(Msg::Cancel);
    }

    fn handle_key_left_right(&mut self) {
        if self.active_panel == ActivePanel::Actions {
            self.toggle_focused_button();
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let areas = self.hit_areas;
        match mouse.kind {
            MouseEventKind::ScrollDown => self.select_next(),
            MouseEventKind::ScrollUp => self.select_previous(),
            MouseEventKind::Down(MouseButton::Left) => {
                if hit(areas.select_button, mouse.column, mouse.row) {
                    self.press_button(ActionButton::Select);
                } else if hit(areas.quit_button, mouse.column, mouse.row) {
                    self.press_button(ActionButton::Quit);
                } else if hit(areas.hosts_list, mouse.column, mouse.row) {
                    self.click_host_row(mouse.row);
                }
            }
            _ => {}
        }
    }

    fn click_host_row(&mut self, row: u16) {
        let list = self.hit_areas.hosts_list;
        // first and last rows are the border
        let inner_top = list.y.saturating_add(1);
        let inner_bottom = list.y.saturating_add(list.height).saturating_sub(1);
        if row < inner_top || row >= inner_bottom {
            return;
        }
        let index = self.host_list_state.offset() + (row - inner_top) as usize;
        if index < self.state.connections.len() {
            self.active_panel = ActivePanel::Hosts;
            self.dispatch(Msg::SetSelected(index as isize));
        }
    }
}
