use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;

use crate::prefs::Theme;

/// Accent colors for one theme. The terminal keeps its own background; the
/// theme only drives the foreground palette so "light" stays readable on
/// light terminals and "dark" on dark ones.
pub(crate) struct Palette {
    /// Selection highlight and active form field.
    pub(crate) accent: Color,
    /// Secondary text such as subtitles and placeholders.
    pub(crate) muted: Color,
    /// Success status messages.
    pub(crate) success: Color,
    /// Error status messages and destructive hints.
    pub(crate) danger: Color,
    /// Key labels in the footer.
    pub(crate) key: Color,
}

pub(crate) fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            accent: Color::Blue,
            muted: Color::DarkGray,
            success: Color::Green,
            danger: Color::Red,
            key: Color::Cyan,
        },
        Theme::Dark => Palette {
            accent: Color::Yellow,
            muted: Color::Gray,
            success: Color::LightGreen,
            danger: Color::LightRed,
            key: Color::LightCyan,
        },
    }
}

/// Up to two uppercase initials for the card avatar, `?` when the name is
/// blank or the record no longer resolves.
pub(crate) fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect::<String>()
        .to_uppercase();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters.chars().take(2).collect()
    }
}

/// Clamp-step a selection index within `0..len`, matching list navigation
/// everywhere in the UI.
pub(crate) fn step_selection(selected: usize, len: usize, offset: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let max = len as isize - 1;
    (selected as isize + offset).clamp(0, max) as usize
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_the_first_two_words() {
        assert_eq!(initials("Emma Johnson"), "EJ");
        assert_eq!(initials("Dr. Sarah Anne Williams"), "DS");
        assert_eq!(initials("Plato"), "P");
        assert_eq!(initials("   "), "?");
    }

    #[test]
    fn step_selection_clamps_at_both_ends() {
        assert_eq!(step_selection(0, 5, -1), 0);
        assert_eq!(step_selection(4, 5, 3), 4);
        assert_eq!(step_selection(2, 5, -1), 1);
        assert_eq!(step_selection(0, 0, 1), 0);
    }
}
