use crate::app_event::Msg;
use crate::models::SshConnection;

/// Where a session stands, derived from `quit` and `pending_command`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Browsing,
    Committed,
    Cancelled,
}

/// Everything the picker knows about the session.
///
/// Only [`update`] changes it. `connections` and `labels` are fixed once the
/// session starts, as are the `exec_requested` and `suppress_print` flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub connections: Vec<SshConnection>,
    pub labels: Vec<String>,
    pub selected: usize,
    pub quit: bool,
    pub pending_command: Option<String>,
    pub exec_requested: bool,
    pub suppress_print: bool,
}

impl SelectionState {
    pub fn new(connections: Vec<SshConnection>, exec_requested: bool, suppress_print: bool) -> Self {
        let labels = connections.iter().map(SshConnection::label).collect();
        Self {
            connections,
            labels,
            selected: 0,
            quit: false,
            pending_command: None,
            exec_requested,
            suppress_print,
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.quit, &self.pending_command) {
            (false, _) => Phase::Browsing,
            (true, Some(_)) => Phase::Committed,
            (true, None) => Phase::Cancelled,
        }
    }

    pub fn selected_connection(&self) -> Option<&SshConnection> {
        self.connections.get(self.selected)
    }

    /// The connection whose command is pending, once the user has committed.
    pub fn chosen_connection(&self) -> Option<&SshConnection> {
        self.pending_command
            .as_ref()
            .and_then(|_| self.selected_connection())
    }
}

fn clamp_index(index: isize, count: usize) -> usize {
    if count == 0 || index <= 0 {
        return 0;
    }
    (index as usize).min(count - 1)
}

/// Apply one message and return the resulting state.
pub fn update(mut state: SelectionState, msg: Msg) -> SelectionState {
    match msg {
        Msg::SetSelected(index) => {
            if state.quit {
                return state;
            }
            state.selected = clamp_index(index, state.connections.len());
        }
        Msg::Commit => {
            if let Some(connection) = state.connections.get(state.selected) {
                state.pending_command = Some(connection.command());
            }
            state.quit = true;
        }
        Msg::Cancel => {
            state.quit = true;
        }
    }
    tracing::debug!(
        "{:?} -> selected={} phase={:?}",
        msg,
        state.selected,
        state.phase()
    );
    state
}
