//! Core library surface for the EduHub roster manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as the integration tests can reuse the same pieces.

pub mod models;
pub mod prefs;
pub mod store;
pub mod ui;

/// The domain record types manipulated by every other layer.
pub use models::{Course, Enrollment, Grade, Student, Teacher};

/// The theme preference and its tiny persistence layer.
pub use prefs::{load_theme, open_store, save_theme, Theme};

/// The in-memory roster container and its error taxonomy.
pub use store::{Roster, RosterError};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
