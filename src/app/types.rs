use crate::app::state::SelectionState;
use crate::config::Theme;

use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePanel {
    Hosts,
    Actions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionButton {
    Select,
    Quit,
}

/// Screen areas from the last draw, used to resolve mouse clicks.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitAreas {
    pub hosts_list: Rect,
    pub select_button: Rect,
    pub quit_button: Rect,
}

#[derive(Debug)]
pub struct App {
    pub state: SelectionState,
    pub theme: Theme,

    pub active_panel: ActivePanel,
    pub focused_button: ActionButton,
    pub status_message: Option<(String, Instant)>,

    pub host_list_state: ListState,
    pub hit_areas: HitAreas,
}
