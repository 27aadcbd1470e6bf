//! Binary entry point that glues the preference store to the TUI. We open
//! the persisted theme, hydrate the seeded roster, and drive the Ratatui
//! event loop until the user exits. Roster data itself is session-only by
//! design; only the theme outlives the process.
use eduhub_roster::{load_theme, open_store, run_app, App, Roster};

/// Initialize the preference store, load the saved theme, and launch the
/// Ratatui event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for example
/// an unwritable home directory) to the terminal instead of crashing
/// silently.
fn main() -> anyhow::Result<()> {
    let prefs = open_store()?;
    let theme = load_theme(&prefs)?;

    let mut app = App::new(Roster::seeded(), prefs, theme);
    run_app(&mut app)
}
