//! Formatting utilities for terminal output

use crate::core::{Feedback, Status, Word};
use crate::game::{KeyStatusMap, TileMark};
use colored::{ColoredString, Colorize};

/// Keyboard rows in display order
pub const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// Color a single letter tile by status
#[must_use]
pub fn colored_tile(letter: u8, status: Status) -> ColoredString {
    let text = format!(" {} ", char::from(letter).to_ascii_uppercase());
    match status {
        Status::Green => text.black().on_green().bold(),
        Status::Yellow => text.black().on_yellow().bold(),
        Status::Gray => text.white().on_bright_black().bold(),
    }
}

/// Marker appended after a tile in line output
#[must_use]
pub const fn mark_suffix(mark: TileMark) -> &'static str {
    match mark {
        TileMark::Plain => " ",
        TileMark::Checked => "·",
        TileMark::Verified => "✓",
        TileMark::GlitchDetected => "!",
        TileMark::Corrected => "*",
    }
}

/// Render a guess with its feedback as colored tiles
#[must_use]
pub fn format_row(guess: &Word, feedback: &Feedback, marks: &[TileMark]) -> String {
    guess
        .chars()
        .iter()
        .zip(feedback.statuses())
        .enumerate()
        .map(|(i, (&letter, &status))| {
            let mark = marks.get(i).copied().unwrap_or(TileMark::Plain);
            format!("{}{}", colored_tile(letter, status), mark_suffix(mark))
        })
        .collect()
}

/// Render the on-screen keyboard with known key statuses
#[must_use]
pub fn format_keyboard(keys: &KeyStatusMap) -> String {
    KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(indent, row)| {
            let keys: String = row
                .bytes()
                .map(|letter| {
                    let label = char::from(letter).to_ascii_uppercase().to_string();
                    match keys.get(letter) {
                        Some(Status::Green) => label.black().on_green().to_string(),
                        Some(Status::Yellow) => label.black().on_yellow().to_string(),
                        Some(Status::Gray) => label.bright_black().to_string(),
                        None => label,
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            format!("{}{keys}", " ".repeat(indent))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = if max > 0.0 {
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bar for an integer percentage
#[must_use]
pub fn percent_bar(percent: u8, width: usize) -> String {
    create_progress_bar(f64::from(percent), 100.0, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(5.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn percent_bar_rounds_down() {
        assert_eq!(percent_bar(45, 10), "████░░░░░░");
    }

    #[test]
    fn row_contains_letters_and_marks() {
        colored::control::set_override(false);
        let guess = Word::new("crane").unwrap();
        let feedback = Feedback::PERFECT;
        let marks = [
            TileMark::Plain,
            TileMark::Verified,
            TileMark::Plain,
            TileMark::Corrected,
            TileMark::GlitchDetected,
        ];

        let row = format_row(&guess, &feedback, &marks);
        assert_eq!(row, " C   R ✓ A   N * E !");
    }

    #[test]
    fn keyboard_has_three_rows() {
        colored::control::set_override(false);
        let text = format_keyboard(&KeyStatusMap::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Q W E"));
        assert!(lines[2].starts_with("  Z X C"));
    }
}
