//! Ratatui front-end for the roster manager. The UI is a thin shell over the
//! store: every frame re-reads the collections, and every user action maps to
//! exactly one store operation. Destructive actions are staged as a pending
//! action and only applied once the user confirms.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
