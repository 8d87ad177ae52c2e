//! Simple interactive CLI mode
//!
//! Line-oriented game loop without the TUI. Reads guesses and commands from
//! any `BufRead` and writes the board to any `Write`.

use crate::core::WORD_LENGTH;
use crate::game::{Phase, Session, Submission};
use crate::glitch::{DiceRoll, Glitch};
use crate::output::formatters::{format_keyboard, format_row, percent_bar};
use colored::Colorize;
use rand::Rng;
use std::io::{self, BufRead, Write};

const RULE: &str = "────────────────────────────────────────────────────────────";

/// What the loop should do after handling one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the simple interactive CLI mode
///
/// Returns when the player quits or the input ends.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn run_simple<G: Rng, R: BufRead, W: Write>(
    session: &mut Session<'_, G>,
    mut input: R,
    output: &mut W,
) -> io::Result<()> {
    writeln!(output, "\n╔══════════════════════════════════════════════════════════════╗")?;
    writeln!(output, "║{:^62}║", session.config().title())?;
    writeln!(output, "╚══════════════════════════════════════════════════════════════╝\n")?;
    writeln!(output, "Type a {WORD_LENGTH}-letter guess and press Enter.")?;
    writeln!(
        output,
        "Commands: 'new' for a new game, 'quit' to exit, 'info' for glitch status"
    )?;
    if session.detector_info().is_some() {
        writeln!(output, "          'probe <row> <col>' checks a tile (1-based)")?;
    }
    if session.glitch().and_then(Glitch::as_dice_roll).is_some() {
        writeln!(output, "          'odds <row> <col>' shows the true-status odds of a tile")?;
    }
    writeln!(output)?;

    let mut line = String::new();
    loop {
        if session.is_over() {
            write!(output, "Play again? (yes/no): ")?;
        } else {
            write!(
                output,
                "Guess {}/{}: ",
                session.current_row() + 1,
                session.config().max_guesses
            )?;
        }
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }
        let command = line.trim().to_lowercase();

        if handle_line(session, &command, output)? == Flow::Quit {
            writeln!(output, "\n👋 Thanks for playing!\n")?;
            return Ok(());
        }
    }
}

fn handle_line<G: Rng, W: Write>(
    session: &mut Session<'_, G>,
    command: &str,
    output: &mut W,
) -> io::Result<Flow> {
    let mut parts = command.split_whitespace().peekable();
    let Some(head) = parts.next() else {
        return Ok(Flow::Continue);
    };
    // Bare "probe" is a guess like any other word
    let has_args = parts.peek().is_some();

    if session.is_over() {
        return match head {
            "yes" | "y" | "new" | "n" => {
                new_game(session, output)?;
                Ok(Flow::Continue)
            }
            "info" => {
                print_info(session, output)?;
                Ok(Flow::Continue)
            }
            _ => Ok(Flow::Quit),
        };
    }

    match head {
        "quit" | "q" | "exit" => return Ok(Flow::Quit),
        "new" | "n" => new_game(session, output)?,
        "info" => print_info(session, output)?,
        "probe" if has_args => match parse_tile(parts) {
            Some((row, col)) => match session.probe_tile(row, col) {
                Ok(outcome) => {
                    writeln!(output, "{outcome}")?;
                    print_board(session, output)?;
                }
                Err(rejection) => writeln!(output, "{}", rejection.to_string().red())?,
            },
            None => writeln!(output, "{}", "Usage: probe <row> <col>".red())?,
        },
        "odds" if has_args => match parse_tile(parts) {
            Some((row, col)) => print_tile_odds(session, row, col, output)?,
            None => writeln!(output, "{}", "Usage: odds <row> <col>".red())?,
        },
        guess => match session.submit_guess(guess) {
            Ok(submission) => report_submission(session, &submission, output)?,
            Err(err) => writeln!(output, "{}", err.to_string().red())?,
        },
    }

    Ok(Flow::Continue)
}

/// Parse 1-based "<row> <col>" into 0-based indices
fn parse_tile<'a>(mut parts: impl Iterator<Item = &'a str>) -> Option<(usize, usize)> {
    let row: usize = parts.next()?.parse().ok()?;
    let col: usize = parts.next()?.parse().ok()?;
    Some((row.checked_sub(1)?, col.checked_sub(1)?))
}

fn new_game<G: Rng, W: Write>(session: &mut Session<'_, G>, output: &mut W) -> io::Result<()> {
    session.reset();
    writeln!(output, "\n🔄 New game started!\n")
}

fn report_submission<G: Rng, W: Write>(
    session: &Session<'_, G>,
    submission: &Submission,
    output: &mut W,
) -> io::Result<()> {
    if let Some(fix) = submission.fix {
        writeln!(
            output,
            "{}",
            format!(
                "⏱ Row {} tile {} corrected to {}",
                fix.row + 1,
                fix.position + 1,
                fix.original
            )
            .cyan()
        )?;
    }

    print_board(session, output)?;

    if let Some(turn) = session
        .glitch()
        .and_then(Glitch::as_dice_roll)
        .and_then(DiceRoll::last_turn)
        .filter(|t| t.row == submission.row)
    {
        let [zero, one, two] = turn.rolls.faces();
        let odds = turn.odds;
        writeln!(
            output,
            "🎲 Dice {zero} {one} {two}  →  0 flips {}%, 1 flip {}%, 2 flips {}%",
            odds.zero, odds.one, odds.two
        )?;
    }

    if let Some(message) = session.end_message() {
        let styled = if submission.phase == Phase::Won {
            message.bright_green().bold()
        } else {
            message.red().bold()
        };
        writeln!(output, "\n{styled}\n")?;
    }
    Ok(())
}

/// Print every completed row and the keyboard
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn print_board<G: Rng, W: Write>(session: &Session<'_, G>, output: &mut W) -> io::Result<()> {
    writeln!(output, "{RULE}")?;
    for (i, row) in session.rows().iter().enumerate() {
        let marks: Vec<_> = (0..WORD_LENGTH).map(|p| session.tile_mark(i, p)).collect();
        writeln!(
            output,
            "{:>3}  {}",
            i + 1,
            format_row(&row.guess, &row.feedback, &marks)
        )?;
    }
    writeln!(output, "{RULE}")?;
    writeln!(output, "{}", format_keyboard(session.keys()))?;
    writeln!(output)
}

fn print_info<G: Rng, W: Write>(session: &Session<'_, G>, output: &mut W) -> io::Result<()> {
    writeln!(output, "Mode: {}", session.config().title())?;
    writeln!(output, "Guesses left: {}", session.guesses_left())?;

    if let Some(info) = session.detector_info() {
        if info.hard_mode {
            writeln!(output, "🔍 Detectors disabled in Hard Mode")?;
        } else {
            writeln!(output, "🔍 Detectors: {}/{} left", info.remaining, info.max)?;
        }
    }

    if let Some(dice) = session.glitch().and_then(Glitch::as_dice_roll) {
        match dice.last_turn() {
            Some(turn) => {
                let [zero, one, two] = turn.rolls.faces();
                writeln!(output, "🎲 Last dice: {zero} {one} {two}")?;
                for (label, pct) in ["0 flips", "1 flip ", "2 flips"]
                    .iter()
                    .zip(turn.odds.as_array())
                {
                    writeln!(output, "   {label} [{}] {pct:3}%", percent_bar(pct, 20))?;
                }
            }
            None => writeln!(output, "🎲 No dice rolled yet")?,
        }
    }
    Ok(())
}

fn print_tile_odds<G: Rng, W: Write>(
    session: &Session<'_, G>,
    row: usize,
    col: usize,
    output: &mut W,
) -> io::Result<()> {
    match session.status_odds(row, col) {
        Some(odds) => writeln!(
            output,
            "Row {} tile {}: green {}%, yellow {}%, gray {}%",
            row + 1,
            col + 1,
            odds.green,
            odds.yellow,
            odds.gray
        ),
        None => writeln!(output, "{}", "No odds available for that tile".red()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameMode};
    use crate::glitch::GlitchKind;
    use crate::wordlists::WordList;
    use crate::wordlists::loader::words_from_slice;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;

    fn words() -> WordList {
        WordList::new(
            words_from_slice(&["slate"]),
            words_from_slice(&["crane", "moist"]),
        )
        .unwrap()
    }

    fn play(mode: GameMode, script: &str) -> String {
        colored::control::set_override(false);
        let words = words();
        let mut session =
            Session::with_rng(GameConfig::new(mode, false), &words, StdRng::seed_from_u64(1));
        let mut output = Vec::new();
        run_simple(&mut session, Cursor::new(script), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn classic_win_then_quit() {
        let text = play(GameMode::Classic, "crane\nslate\nno\n");
        assert!(text.contains("🎉 You win!"));
        assert!(text.contains("Thanks for playing"));
    }

    #[test]
    fn rejections_are_reported() {
        let text = play(GameMode::Classic, "abc\nzzzzz\nquit\n");
        assert!(text.contains("Guess needs 5 letters, got 3"));
        assert!(text.contains("❌ Not in word list"));
    }

    #[test]
    fn probe_in_classic_is_unavailable() {
        let text = play(GameMode::Classic, "crane\nprobe 1 1\nquit\n");
        assert!(text.contains("No detectors in this mode!"));
    }

    #[test]
    fn probe_usage_and_unsubmitted_row() {
        let text = play(
            GameMode::Glitch(GlitchKind::SingleFalse),
            "probe 1\nprobe 3 1\ninfo\nquit\n",
        );
        assert!(text.contains("Usage: probe <row> <col>"));
        assert!(text.contains("Only completed tiles can be checked!"));
        assert!(text.contains("Detectors: 5/5 left"));
    }

    #[test]
    fn dice_roll_shows_dice_and_odds() {
        let text = play(
            GameMode::Glitch(GlitchKind::DiceRoll),
            "crane\nodds 1 1\nquit\n",
        );
        assert!(text.contains("🎲 Dice"));
        assert!(text.contains("Row 1 tile 1: green"));
    }

    #[test]
    fn timed_info_keeps_the_wrong_row_secret() {
        let text = play(
            GameMode::Glitch(GlitchKind::TimedCorrect),
            "crane\ninfo\nquit\n",
        );
        assert!(text.contains("Mode: Glitchdle - Timed Correct"));
        assert!(!text.contains("pending"));
    }

    #[test]
    fn end_of_input_stops_the_loop() {
        let text = play(GameMode::Classic, "crane\n");
        assert!(!text.contains("Thanks for playing"));
    }

    #[test]
    fn parse_tile_is_one_based() {
        assert_eq!(parse_tile("2 5".split_whitespace()), Some((1, 4)));
        assert_eq!(parse_tile("0 1".split_whitespace()), None);
        assert_eq!(parse_tile("x 1".split_whitespace()), None);
    }
}
