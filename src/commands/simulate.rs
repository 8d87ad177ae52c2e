//! Glitch simulation - Monte-Carlo run of a strategy
//!
//! Plays many seeded games with random guesses and counts how many tiles are
//! wrong on each row, both when the row is first shown and on the final board.

use crate::core::Feedback;
use crate::game::{GameConfig, GameMode, Phase, Session};
use crate::glitch::GlitchKind;
use crate::wordlists::WordList;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Wrong-tile buckets: 0, 1, 2 or more
pub const BUCKETS: usize = 3;

/// Parameters for a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub kind: GlitchKind,
    pub hard_mode: bool,
    pub games: usize,
    pub guesses_per_game: usize,
    pub seed: u64,
}

/// Per-row wrong-tile counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub rows: usize,
    pub wins: usize,
    /// Rows by wrong tiles when first displayed
    pub shown: [usize; BUCKETS],
    /// Rows by wrong tiles on the board when the run stopped
    pub settled: [usize; BUCKETS],
    /// Delayed fixes applied
    pub fixes: usize,
}

impl Tally {
    fn merge(mut self, other: Self) -> Self {
        self.rows += other.rows;
        self.wins += other.wins;
        self.fixes += other.fixes;
        for i in 0..BUCKETS {
            self.shown[i] += other.shown[i];
            self.settled[i] += other.settled[i];
        }
        self
    }

    /// Mean wrong tiles per shown row, counting "2 or more" as 2
    #[must_use]
    pub fn mean_shown_errors(&self) -> f64 {
        if self.rows == 0 {
            return 0.0;
        }
        let weighted: usize = self.shown.iter().enumerate().map(|(i, &n)| i * n).sum();
        weighted as f64 / self.rows as f64
    }
}

/// Result of a simulation run
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub config: SimulationConfig,
    pub tally: Tally,
    pub duration: Duration,
}

fn bucket(wrong: usize) -> usize {
    wrong.min(BUCKETS - 1)
}

/// Play one seeded game and tally its rows
#[must_use]
pub fn simulate_game(words: &WordList, config: &SimulationConfig, game: usize) -> Tally {
    let game_config = GameConfig::new(GameMode::Glitch(config.kind), config.hard_mode);
    let game_seed = config.seed.wrapping_add(game as u64);
    let mut guess_rng = StdRng::seed_from_u64(game_seed.rotate_left(32));
    let mut session = Session::with_rng(game_config, words, StdRng::seed_from_u64(game_seed));

    let mut tally = Tally::default();
    let mut honest_rows: Vec<Feedback> = Vec::new();

    for _ in 0..config.guesses_per_game {
        let Some(guess) = words.answers().choose(&mut guess_rng) else {
            break;
        };
        let honest = Feedback::calculate(guess, session.target());

        let Ok(submission) = session.submit_guess(guess.text()) else {
            break;
        };

        tally.rows += 1;
        tally.shown[bucket(submission.feedback.diff_count(&honest))] += 1;
        if submission.fix.is_some() {
            tally.fixes += 1;
        }
        honest_rows.push(honest);

        if submission.phase != Phase::AwaitingInput {
            break;
        }
    }

    if session.phase() == Phase::Won {
        tally.wins += 1;
    }
    for (row, honest) in session.rows().iter().zip(&honest_rows) {
        tally.settled[bucket(row.feedback.diff_count(honest))] += 1;
    }

    tally
}

/// Run a simulation across all cores
///
/// Each game is seeded from `config.seed` and its index, so results do not
/// depend on thread scheduling.
///
/// # Panics
///
/// Panics if the progress bar template is invalid.
#[must_use]
pub fn run_simulation(words: &WordList, config: SimulationConfig) -> SimulationResult {
    let start = Instant::now();

    let pb = ProgressBar::new(config.games as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .unwrap()
            .progress_chars("█▓▒░"),
    );
    pb.set_message(config.kind.display_name());

    let tally = (0..config.games)
        .into_par_iter()
        .map(|game| {
            let tally = simulate_game(words, &config, game);
            pb.inc(1);
            tally
        })
        .reduce(Tally::default, Tally::merge);

    pb.finish_with_message("Complete!");
    log::info!(
        "simulated {} games of {} ({} rows)",
        config.games,
        config.kind.display_name(),
        tally.rows
    );

    SimulationResult {
        config,
        tally,
        duration: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::loader::words_from_slice;

    fn words() -> WordList {
        WordList::new(
            words_from_slice(&["slate", "crane", "moist", "jumpy", "fuzzy", "shine"]),
            Vec::new(),
        )
        .unwrap()
    }

    fn config(kind: GlitchKind) -> SimulationConfig {
        SimulationConfig {
            kind,
            hard_mode: false,
            games: 40,
            guesses_per_game: 8,
            seed: 42,
        }
    }

    #[test]
    fn single_false_always_shows_one_wrong_tile() {
        let words = words();
        let config = config(GlitchKind::SingleFalse);
        for game in 0..config.games {
            let tally = simulate_game(&words, &config, game);
            let lost_rows = tally.rows - tally.wins;
            assert_eq!(tally.shown[1], lost_rows);
            assert_eq!(tally.settled[1], lost_rows);
            assert_eq!(tally.fixes, 0);
        }
    }

    #[test]
    fn timed_correct_leaves_at_most_last_row_wrong() {
        let words = words();
        let config = config(GlitchKind::TimedCorrect);
        for game in 0..config.games {
            let tally = simulate_game(&words, &config, game);
            assert!(tally.settled[1] <= 1);
            assert_eq!(tally.shown[2], 0);
        }
    }

    #[test]
    fn games_are_reproducible() {
        let words = words();
        let config = config(GlitchKind::DiceRoll);
        assert_eq!(
            simulate_game(&words, &config, 3),
            simulate_game(&words, &config, 3)
        );
    }

    #[test]
    fn parallel_run_matches_sequential_sum() {
        let words = words();
        let config = config(GlitchKind::DiceRoll);

        let sequential = (0..config.games)
            .map(|game| simulate_game(&words, &config, game))
            .fold(Tally::default(), Tally::merge);
        let result = run_simulation(&words, config);

        assert_eq!(result.tally, sequential);
        assert!(result.tally.mean_shown_errors() <= 2.0);
    }
}
