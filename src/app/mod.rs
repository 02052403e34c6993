mod actions;
pub mod keymap;
pub mod state;
mod types;

pub use state::{update, Phase, SelectionState};
pub use types::{ActionButton, ActivePanel, App};
