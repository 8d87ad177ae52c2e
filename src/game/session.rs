//! Game session state machine
//!
//! A session owns the target, the board, the per-key status map and the
//! active glitch strategy. Every operation runs synchronously to completion.

use super::config::GameConfig;
use super::keys::KeyStatusMap;
use crate::core::{Feedback, Status, WORD_LENGTH, Word};
use crate::glitch::{
    DetectorInfo, Glitch, GlitchStrategy, PendingFix, ProbeOutcome, ProbeRejection, StatusOdds,
};
use crate::wordlists::WordList;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingInput,
    Won,
    Lost,
}

/// Why a guess was not accepted; the session is unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    /// Fewer or more letters than the word length
    Incomplete(usize),
    NotInWordList(String),
    GameOver,
}

impl fmt::Display for GuessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete(len) => {
                write!(f, "Guess needs {WORD_LENGTH} letters, got {len}")
            }
            Self::NotInWordList(_) => write!(f, "❌ Not in word list"),
            Self::GameOver => write!(f, "The game is over"),
        }
    }
}

impl std::error::Error for GuessError {}

/// A submitted row as currently displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRow {
    pub guess: Word,
    pub feedback: Feedback,
    /// Tile repainted by a delayed fix
    pub corrected: Option<usize>,
    /// Tile whose true status a detector revealed
    pub revealed: Option<usize>,
}

impl BoardRow {
    const fn new(guess: Word, feedback: Feedback) -> Self {
        Self {
            guess,
            feedback,
            corrected: None,
            revealed: None,
        }
    }
}

/// Display mark for a board tile, derived from the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileMark {
    Plain,
    /// Row resolved by a detector
    Checked,
    /// Detector confirmed this tile
    Verified,
    GlitchDetected,
    Corrected,
}

/// Result of an accepted guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub row: usize,
    pub feedback: Feedback,
    /// Fix applied to an earlier row during this submission
    pub fix: Option<PendingFix>,
    pub phase: Phase,
}

/// One game from target pick to win or loss
pub struct Session<'a, R: Rng = StdRng> {
    config: GameConfig,
    words: &'a WordList,
    target: Word,
    rows: Vec<BoardRow>,
    buffer: String,
    phase: Phase,
    keys: KeyStatusMap,
    glitch: Option<Glitch>,
    rng: R,
}

impl<'a> Session<'a, StdRng> {
    /// Start a session seeded from the operating system
    #[must_use]
    pub fn new(config: GameConfig, words: &'a WordList) -> Self {
        Self::with_rng(config, words, StdRng::from_os_rng())
    }
}

impl<'a, R: Rng> Session<'a, R> {
    /// Start a session drawing all randomness from `rng`
    pub fn with_rng(config: GameConfig, words: &'a WordList, mut rng: R) -> Self {
        let target = words.pick_target(&mut rng).clone();
        log::debug!("target word: {target}");

        let glitch = config
            .mode
            .glitch_kind()
            .map(|kind| Glitch::new(kind, config.hard_mode));

        Self {
            config,
            words,
            target,
            rows: Vec::new(),
            buffer: String::new(),
            phase: Phase::AwaitingInput,
            keys: KeyStatusMap::default(),
            glitch,
            rng,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn target(&self) -> &Word {
        &self.target
    }

    #[must_use]
    pub fn rows(&self) -> &[BoardRow] {
        &self.rows
    }

    /// Index of the row the next guess lands on
    #[must_use]
    pub fn current_row(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase != Phase::AwaitingInput
    }

    #[must_use]
    pub const fn keys(&self) -> &KeyStatusMap {
        &self.keys
    }

    #[must_use]
    pub const fn glitch(&self) -> Option<&Glitch> {
        self.glitch.as_ref()
    }

    #[must_use]
    pub fn detector_info(&self) -> Option<DetectorInfo> {
        self.glitch.as_ref().and_then(Glitch::detector_info)
    }

    /// Banner shown once the game has ended
    #[must_use]
    pub fn end_message(&self) -> Option<String> {
        match self.phase {
            Phase::AwaitingInput => None,
            Phase::Won => Some("🎉 You win!".to_string()),
            Phase::Lost => Some(format!(
                "💀 Game Over! The word was {}",
                self.target.text().to_uppercase()
            )),
        }
    }

    #[must_use]
    pub fn guesses_left(&self) -> usize {
        self.config.max_guesses.saturating_sub(self.rows.len())
    }

    /// Append a letter to the guess buffer; returns whether it was taken
    pub fn push_letter(&mut self, letter: char) -> bool {
        if self.is_over() || self.buffer.len() >= WORD_LENGTH || !letter.is_ascii_alphabetic() {
            return false;
        }
        self.buffer.push(letter.to_ascii_lowercase());
        true
    }

    pub fn pop_letter(&mut self) -> bool {
        !self.is_over() && self.buffer.pop().is_some()
    }

    /// Submit the guess buffer
    ///
    /// The buffer is cleared only when the guess is accepted.
    ///
    /// # Errors
    /// See [`Session::submit_guess`].
    pub fn submit(&mut self) -> Result<Submission, GuessError> {
        let text = self.buffer.clone();
        let submission = self.submit_guess(&text)?;
        self.buffer.clear();
        Ok(submission)
    }

    /// Submit a guess
    ///
    /// A correct guess paints the row green and wins. Otherwise the honest
    /// feedback passes through the glitch strategy, any fix it returns is
    /// applied to its earlier row, and the game is lost once the guess limit
    /// is reached.
    ///
    /// # Errors
    /// Returns `GuessError` without touching the session if the game is over,
    /// the guess has the wrong length, or it is not in the acceptance list.
    pub fn submit_guess(&mut self, text: &str) -> Result<Submission, GuessError> {
        if self.is_over() {
            return Err(GuessError::GameOver);
        }

        let len = text.chars().count();
        if len != WORD_LENGTH {
            return Err(GuessError::Incomplete(len));
        }

        let guess = match Word::new(text) {
            Ok(word) if self.words.is_accepted(&word) => word,
            _ => return Err(GuessError::NotInWordList(text.to_lowercase())),
        };

        let row = self.rows.len();

        if guess == self.target {
            for &letter in guess.chars() {
                self.keys.upgrade(letter, Status::Green);
            }
            let feedback = Feedback::all_green();
            self.rows.push(BoardRow::new(guess, feedback));
            self.finish(Phase::Won);

            return Ok(Submission {
                row,
                feedback,
                fix: None,
                phase: self.phase,
            });
        }

        let honest = Feedback::calculate(&guess, &self.target);
        let (feedback, fix) = match self.glitch.as_mut() {
            Some(glitch) => {
                let outcome = glitch.apply(honest, &guess, row, &mut self.rng);
                (outcome.feedback, outcome.fix)
            }
            None => (honest, None),
        };

        if let Some(fix) = fix {
            self.apply_fix(fix);
        }

        for (i, &status) in feedback.statuses().iter().enumerate() {
            self.keys.upgrade(guess.char_at(i), status);
        }
        self.rows.push(BoardRow::new(guess, feedback));

        if self.rows.len() >= self.config.max_guesses {
            self.finish(Phase::Lost);
        }

        Ok(Submission {
            row,
            feedback,
            fix,
            phase: self.phase,
        })
    }

    fn apply_fix(&mut self, fix: PendingFix) {
        if let Some(row) = self.rows.get_mut(fix.row) {
            row.feedback.set(fix.position, fix.original);
            row.corrected = Some(fix.position);
        }
        self.keys.force(fix.letter, fix.original);
        log::info!(
            "corrected row {} tile {} back to {}",
            fix.row,
            fix.position,
            fix.original
        );
    }

    fn finish(&mut self, phase: Phase) {
        self.phase = phase;
        if let Some(glitch) = self.glitch.as_mut() {
            glitch.settle();
        }
        log::info!(
            "game {:?} after {} guesses; target was {}",
            phase,
            self.rows.len(),
            self.target
        );
    }

    /// Use a detector on a completed tile
    ///
    /// A detected glitch repaints the tile with its true status.
    ///
    /// # Errors
    /// Returns `ProbeRejection` when the mode has no detectors, the tile is not
    /// on a completed row, or the detector ledger refuses the probe.
    pub fn probe_tile(
        &mut self,
        row: usize,
        position: usize,
    ) -> Result<ProbeOutcome, ProbeRejection> {
        let game_over = self.is_over();
        let glitch = self.glitch.as_mut().ok_or(ProbeRejection::Unavailable)?;

        // The ledger reports game over ahead of any tile check
        if glitch.as_single_false().is_some()
            && !game_over
            && (row >= self.rows.len() || position >= WORD_LENGTH)
        {
            return Err(ProbeRejection::NotProbeable);
        }

        let outcome = glitch.check_tile(row, position, game_over)?;

        if let ProbeOutcome::GlitchDetected {
            row,
            position,
            true_status,
            ..
        } = outcome
        {
            let board_row = &mut self.rows[row];
            board_row.feedback.set(position, true_status);
            board_row.revealed = Some(position);
        }

        Ok(outcome)
    }

    /// Display mark for a tile
    #[must_use]
    pub fn tile_mark(&self, row: usize, position: usize) -> TileMark {
        let Some(board_row) = self.rows.get(row) else {
            return TileMark::Plain;
        };

        if board_row.revealed == Some(position) {
            return TileMark::GlitchDetected;
        }
        if board_row.corrected == Some(position) {
            return TileMark::Corrected;
        }

        match self.glitch.as_ref().and_then(Glitch::as_single_false) {
            Some(single) if single.is_row_checked(row) => TileMark::Checked,
            Some(single) if single.is_tile_checked(row, position) => TileMark::Verified,
            _ => TileMark::Plain,
        }
    }

    /// Dice Roll hint for a completed tile
    #[must_use]
    pub fn status_odds(&self, row: usize, position: usize) -> Option<StatusOdds> {
        self.glitch
            .as_ref()
            .and_then(Glitch::as_dice_roll)
            .and_then(|dice| dice.status_odds(row, position))
    }

    /// Start over with a new random target
    pub fn reset(&mut self) {
        let target = self.words.pick_target(&mut self.rng).clone();
        self.restart(target);
    }

    /// Start over with a fixed target
    ///
    /// # Errors
    /// Returns `GuessError::NotInWordList` if `target` is not an accepted word;
    /// the session is left as it was.
    pub fn reset_with_target(&mut self, target: &str) -> Result<(), GuessError> {
        match Word::new(target) {
            Ok(word) if self.words.is_accepted(&word) => {
                self.restart(word);
                Ok(())
            }
            _ => Err(GuessError::NotInWordList(target.to_lowercase())),
        }
    }

    fn restart(&mut self, target: Word) {
        log::debug!("target word: {target}");
        self.target = target;
        self.rows.clear();
        self.buffer.clear();
        self.keys.clear();
        self.phase = Phase::AwaitingInput;
        if let Some(glitch) = self.glitch.as_mut() {
            glitch.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameMode;
    use crate::glitch::{GlitchKind, MAX_DETECTORS};
    use crate::wordlists::loader::words_from_slice;

    fn word_list() -> WordList {
        WordList::new(
            words_from_slice(&["slate"]),
            words_from_slice(&["crane", "moist", "shine", "jumpy", "fuzzy", "speed"]),
        )
        .unwrap()
    }

    fn session(words: &WordList, mode: GameMode, seed: u64) -> Session<'_> {
        let config = GameConfig::new(mode, false);
        let mut session = Session::with_rng(config, words, StdRng::seed_from_u64(seed));
        session.reset_with_target("slate").unwrap();
        session
    }

    fn honest(guess: &str) -> Feedback {
        Feedback::calculate(&Word::new(guess).unwrap(), &Word::new("slate").unwrap())
    }

    #[test]
    fn correct_guess_wins() {
        let words = word_list();
        let mut game = session(&words, GameMode::Classic, 0);

        let submission = game.submit_guess("SLATE").unwrap();

        assert_eq!(submission.phase, Phase::Won);
        assert_eq!(submission.feedback, Feedback::PERFECT);
        assert_eq!(game.end_message().as_deref(), Some("🎉 You win!"));
        assert_eq!(game.rows()[0].feedback, Feedback::PERFECT);
        assert_eq!(game.keys().get(b's'), Some(Status::Green));
        assert_eq!(game.submit_guess("crane"), Err(GuessError::GameOver));
    }

    #[test]
    fn correct_guess_wins_in_glitch_mode_without_glitching() {
        let words = word_list();
        for kind in GlitchKind::ALL {
            let mut game = session(&words, GameMode::Glitch(kind), 1);
            game.submit_guess("crane").unwrap();
            let submission = game.submit_guess("slate").unwrap();
            assert_eq!(submission.phase, Phase::Won);
            assert_eq!(game.rows()[1].feedback, Feedback::PERFECT);
        }
    }

    #[test]
    fn wrong_length_is_a_no_op() {
        let words = word_list();
        let mut game = session(&words, GameMode::Classic, 0);

        for letter in "sla".chars() {
            assert!(game.push_letter(letter));
        }
        assert_eq!(game.submit(), Err(GuessError::Incomplete(3)));
        assert_eq!(game.buffer(), "sla");
        assert!(game.rows().is_empty());
    }

    #[test]
    fn unknown_word_is_rejected_without_state_change() {
        let words = word_list();
        let mut game = session(&words, GameMode::Classic, 0);

        assert_eq!(
            game.submit_guess("zzzzz"),
            Err(GuessError::NotInWordList("zzzzz".to_string()))
        );
        assert!(game.rows().is_empty());
        assert!(game.keys().is_empty());
        assert_eq!(game.phase(), Phase::AwaitingInput);
    }

    #[test]
    fn buffer_is_bounded_and_cleared_on_submit() {
        let words = word_list();
        let mut game = session(&words, GameMode::Classic, 0);

        for letter in "CRANEX".chars() {
            game.push_letter(letter);
        }
        assert_eq!(game.buffer(), "crane");
        assert!(!game.push_letter('1'));

        game.submit().unwrap();
        assert_eq!(game.buffer(), "");
        assert!(!game.pop_letter());
    }

    #[test]
    fn classic_feedback_is_honest() {
        let words = word_list();
        let mut game = session(&words, GameMode::Classic, 0);

        let submission = game.submit_guess("crane").unwrap();
        assert_eq!(submission.feedback, honest("crane"));
        assert!(submission.fix.is_none());
    }

    #[test]
    fn all_gray_guess() {
        let words = word_list();
        let mut game = session(&words, GameMode::Classic, 0);

        let submission = game.submit_guess("jumpy").unwrap();
        assert_eq!(submission.feedback.statuses(), &[Status::Gray; WORD_LENGTH]);
    }

    #[test]
    fn classic_is_lost_after_six_guesses() {
        let words = word_list();
        let mut game = session(&words, GameMode::Classic, 0);

        for i in 0..6 {
            let submission = game.submit_guess("crane").unwrap();
            let expected = if i == 5 { Phase::Lost } else { Phase::AwaitingInput };
            assert_eq!(submission.phase, expected);
        }
        assert_eq!(game.guesses_left(), 0);
        assert_eq!(
            game.end_message().as_deref(),
            Some("💀 Game Over! The word was SLATE")
        );
        assert_eq!(game.submit_guess("crane"), Err(GuessError::GameOver));
    }

    #[test]
    fn glitch_modes_allow_twenty_guesses() {
        let words = word_list();
        let mut game = session(&words, GameMode::Glitch(GlitchKind::DiceRoll), 3);

        for _ in 0..19 {
            game.submit_guess("crane").unwrap();
        }
        assert_eq!(game.phase(), Phase::AwaitingInput);
        assert_eq!(game.submit_guess("crane").unwrap().phase, Phase::Lost);
    }

    #[test]
    fn key_status_never_downgrades() {
        let words = word_list();
        let mut game = session(&words, GameMode::Classic, 0);

        // 'e' is green in CRANE vs SLATE, yellow at position 2 of SPEED
        game.submit_guess("crane").unwrap();
        assert_eq!(game.keys().get(b'e'), Some(Status::Green));
        game.submit_guess("speed").unwrap();
        assert_eq!(game.keys().get(b'e'), Some(Status::Green));
        assert_eq!(game.keys().get(b's'), Some(Status::Green));
        assert_eq!(game.keys().get(b'c'), Some(Status::Gray));
    }

    #[test]
    fn timed_flip_is_reversed_after_next_guess() {
        let words = word_list();
        for seed in 0..20 {
            let mut game = session(&words, GameMode::Glitch(GlitchKind::TimedCorrect), seed);

            let first = game.submit_guess("crane").unwrap();
            assert!(first.fix.is_none());
            assert_eq!(game.rows()[0].feedback.diff_count(&honest("crane")), 1);

            let second = game.submit_guess("moist").unwrap();
            let fix = second.fix.unwrap();
            assert_eq!(fix.row, 0);
            assert_eq!(game.rows()[0].feedback, honest("crane"));
            assert_eq!(game.tile_mark(0, fix.position), TileMark::Corrected);
            assert_eq!(game.rows()[1].feedback.diff_count(&honest("moist")), 1);

            // MOIST shares no letters with CRANE, so the forced key value stands
            assert_eq!(game.keys().get(fix.letter), Some(fix.original));
        }
    }

    #[test]
    fn timed_pending_fix_discarded_when_game_ends() {
        let words = word_list();
        let mut game = session(&words, GameMode::Glitch(GlitchKind::TimedCorrect), 8);

        for _ in 0..20 {
            game.submit_guess("crane").unwrap();
        }

        assert_eq!(game.phase(), Phase::Lost);
        let timed = game.glitch().and_then(Glitch::as_timed_correct).unwrap();
        assert!(timed.pending().is_none());
        assert_eq!(game.rows()[19].feedback.diff_count(&honest("crane")), 1);
    }

    #[test]
    fn single_false_probe_reveals_true_status() {
        let words = word_list();
        let mut game = session(&words, GameMode::Glitch(GlitchKind::SingleFalse), 4);
        game.submit_guess("crane").unwrap();

        let record = game
            .glitch()
            .and_then(Glitch::as_single_false)
            .and_then(|s| s.record_for_row(0))
            .cloned()
            .unwrap();

        let outcome = game.probe_tile(0, record.position).unwrap();
        assert!(matches!(outcome, ProbeOutcome::GlitchDetected { .. }));
        assert_eq!(game.rows()[0].feedback, honest("crane"));
        assert_eq!(game.tile_mark(0, record.position), TileMark::GlitchDetected);

        let other = (record.position + 1) % WORD_LENGTH;
        assert_eq!(game.tile_mark(0, other), TileMark::Checked);
        assert_eq!(
            game.probe_tile(0, other),
            Err(ProbeRejection::RowAlreadyChecked)
        );
        assert_eq!(game.detector_info().unwrap().remaining, MAX_DETECTORS - 1);
    }

    #[test]
    fn single_false_budget_through_session() {
        let words = word_list();
        let mut game = session(&words, GameMode::Glitch(GlitchKind::SingleFalse), 6);
        for _ in 0..6 {
            game.submit_guess("crane").unwrap();
        }

        fn glitched(game: &Session<'_>, row: usize) -> usize {
            game.glitch()
                .and_then(Glitch::as_single_false)
                .and_then(|s| s.record_for_row(row))
                .map(|r| r.position)
                .unwrap()
        }

        for row in 0..MAX_DETECTORS {
            let position = (glitched(&game, row) + 1) % WORD_LENGTH;
            let outcome = game.probe_tile(row, position).unwrap();
            assert!(matches!(outcome, ProbeOutcome::Correct { .. }));
            assert_eq!(game.tile_mark(row, position), TileMark::Verified);
        }

        let rows_before = game.rows().to_vec();
        let position = (glitched(&game, 5) + 1) % WORD_LENGTH;
        assert_eq!(
            game.probe_tile(5, position),
            Err(ProbeRejection::NoDetectorsLeft { max: MAX_DETECTORS })
        );
        assert_eq!(game.rows(), rows_before.as_slice());
        assert_eq!(game.tile_mark(5, position), TileMark::Plain);
    }

    #[test]
    fn probes_rejected_outside_completed_rows_and_in_other_modes() {
        let words = word_list();
        let mut single = session(&words, GameMode::Glitch(GlitchKind::SingleFalse), 2);
        assert_eq!(single.probe_tile(0, 0), Err(ProbeRejection::NotProbeable));
        single.submit_guess("crane").unwrap();
        assert_eq!(
            single.probe_tile(0, WORD_LENGTH),
            Err(ProbeRejection::NotProbeable)
        );

        let mut classic = session(&words, GameMode::Classic, 2);
        classic.submit_guess("crane").unwrap();
        assert_eq!(classic.probe_tile(0, 0), Err(ProbeRejection::Unavailable));

        let mut dice = session(&words, GameMode::Glitch(GlitchKind::DiceRoll), 2);
        dice.submit_guess("crane").unwrap();
        assert_eq!(dice.probe_tile(0, 0), Err(ProbeRejection::Unavailable));
        assert!(dice.status_odds(0, 0).is_some());
    }

    #[test]
    fn probe_after_game_over_is_rejected() {
        let words = word_list();
        let mut game = session(&words, GameMode::Glitch(GlitchKind::SingleFalse), 5);
        game.submit_guess("crane").unwrap();
        game.submit_guess("slate").unwrap();

        assert_eq!(game.probe_tile(0, 0), Err(ProbeRejection::GameOver));
        assert_eq!(game.detector_info().unwrap().used, 0);
    }

    #[test]
    fn game_over_outranks_out_of_range_tile() {
        let words = word_list();
        let mut game = session(&words, GameMode::Glitch(GlitchKind::SingleFalse), 5);
        game.submit_guess("slate").unwrap();

        assert_eq!(game.probe_tile(7, 0), Err(ProbeRejection::GameOver));
        assert_eq!(game.probe_tile(0, 9), Err(ProbeRejection::GameOver));
    }

    #[test]
    fn reset_twice_matches_reset_once() {
        let words = word_list();
        let mut once = session(&words, GameMode::Glitch(GlitchKind::SingleFalse), 10);
        let mut twice = session(&words, GameMode::Glitch(GlitchKind::SingleFalse), 10);

        for game in [&mut once, &mut twice] {
            game.submit_guess("crane").unwrap();
            game.push_letter('s');
            let _ = game.probe_tile(0, 0);
        }

        once.reset();
        twice.reset();
        twice.reset();

        for game in [&once, &twice] {
            assert!(game.rows().is_empty());
            assert_eq!(game.buffer(), "");
            assert!(game.keys().is_empty());
            assert_eq!(game.phase(), Phase::AwaitingInput);
            assert_eq!(game.detector_info().unwrap().used, 0);
            let single = game.glitch().and_then(Glitch::as_single_false).unwrap();
            assert!(single.history().is_empty());
        }
        // Single-word answer pool makes the target deterministic too
        assert_eq!(once.target(), twice.target());
    }

    #[test]
    fn reset_with_unknown_target_fails_without_change() {
        let words = word_list();
        let mut game = session(&words, GameMode::Classic, 0);
        game.submit_guess("crane").unwrap();

        assert!(game.reset_with_target("zzzzz").is_err());
        assert_eq!(game.rows().len(), 1);
    }
}
