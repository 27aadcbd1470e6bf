//! Persistence for the single cross-session preference: the display theme.
//! Roster data itself is session-only, so this module owns the only SQLite
//! footprint in the application, a one-table key-value store under the user's
//! home directory. The theme is read once at startup and written through on
//! every toggle.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::{params, Connection, OptionalExtension};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".eduhub-roster";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "prefs.sqlite";
/// Key under which the theme value is stored.
const THEME_KEY: &str = "theme";

/// The two supported display themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a stored value. Anything outside the enumerated set falls back
    /// to the light default rather than failing startup.
    pub fn parse(value: &str) -> Theme {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Open the preference store, creating the data directory and schema on
/// first launch, and return a live connection.
pub fn open_store() -> Result<Connection> {
    let db_path = store_path()?;

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(&db_path).context("failed to open preference store")?;
    ensure_schema(&conn)?;
    Ok(conn)
}

fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS preferences (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create preferences table")?;
    Ok(())
}

/// Resolve the absolute path to the preference database inside the user's
/// home.
fn store_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

/// Read the stored theme, defaulting to light when no value has ever been
/// written.
pub fn load_theme(conn: &Connection) -> Result<Theme> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM preferences WHERE key = ?1",
            params![THEME_KEY],
            |row| row.get(0),
        )
        .optional()
        .context("failed to read theme preference")?;

    Ok(value.map(|v| Theme::parse(&v)).unwrap_or_default())
}

/// Write the theme through to the store. Called on every toggle so the
/// preference survives however the session ends.
pub fn save_theme(conn: &Connection, theme: Theme) -> Result<()> {
    conn.execute(
        "INSERT INTO preferences (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![THEME_KEY, theme.as_str()],
    )
    .context("failed to save theme preference")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> Connection {
        let conn = Connection::open_in_memory().expect("open in-memory store");
        ensure_schema(&conn).expect("schema");
        conn
    }

    #[test]
    fn missing_key_defaults_to_light() {
        let conn = memory_store();
        assert_eq!(load_theme(&conn).expect("load"), Theme::Light);
    }

    #[test]
    fn theme_round_trips_through_the_store() {
        let conn = memory_store();
        save_theme(&conn, Theme::Dark).expect("save");
        assert_eq!(load_theme(&conn).expect("load"), Theme::Dark);
        save_theme(&conn, Theme::Light).expect("save again");
        assert_eq!(load_theme(&conn).expect("load"), Theme::Light);
    }

    #[test]
    fn unknown_stored_value_parses_as_light() {
        assert_eq!(Theme::parse("solarized"), Theme::Light);
        assert_eq!(Theme::parse("dark"), Theme::Dark);
    }

    #[test]
    fn toggled_flips_between_the_two_values() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
