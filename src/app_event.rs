/// Input to the selection state machine, already decoupled from any key or
/// mouse event that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    /// Highlight the connection at this index. Out-of-range values saturate.
    SetSelected(isize),
    /// Accept the highlighted connection and end the session.
    Commit,
    /// End the session without choosing.
    Cancel,
}
