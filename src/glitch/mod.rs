//! Glitch strategies that corrupt honest feedback before it is shown
//!
//! Every strategy receives the honest feedback for a guess and returns the
//! feedback to display, plus an optional fix for a tile on an earlier row.
//! Each variant keeps its own ledger, private to one session and wiped on reset.

mod dice;
mod single_false;
mod timed;

pub use dice::{DIE_FACES, DiceRoll, DiceRolls, DiceTurn, FlipOdds, StatusOdds};
pub use single_false::{
    DetectorInfo, MAX_DETECTORS, ProbeOutcome, ProbeRejection, SingleFalseFeedback,
};
pub use timed::TimedCorrect;

use crate::core::{Feedback, Status, WORD_LENGTH, Word};
use rand::Rng;

/// One tile mutation applied by [`flip_one`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flip {
    pub position: usize,
    pub original: Status,
    pub fake: Status,
}

/// A glitch recorded against a displayed row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlitchRecord {
    pub row: usize,
    pub position: usize,
    pub original: Status,
    pub fake: Status,
    pub guess: Word,
}

/// Correction for one previously displayed tile, applied on the next submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFix {
    pub row: usize,
    pub position: usize,
    pub original: Status,
    pub letter: u8,
}

/// Result of running a strategy over one guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlitchOutcome {
    /// Feedback to display for the current row
    pub feedback: Feedback,
    /// Fix for an earlier row, if one is due
    pub fix: Option<PendingFix>,
}

/// Flip exactly one position of `feedback` to a different status
///
/// The position is uniform over the row and the replacement is uniform over
/// the two statuses that differ from the current one, so the call is never a
/// no-op.
pub fn flip_one<R: Rng + ?Sized>(feedback: &mut Feedback, rng: &mut R) -> Flip {
    let position = rng.random_range(0..WORD_LENGTH);
    let original = feedback[position];

    let mut choices = Status::ALL.into_iter().filter(|&s| s != original);
    let skip = rng.random_range(0..Status::ALL.len() - 1);
    let fake = choices.nth(skip).unwrap_or(original);
    debug_assert_ne!(fake, original);

    feedback.set(position, fake);

    Flip {
        position,
        original,
        fake,
    }
}

/// A policy for corrupting feedback
pub trait GlitchStrategy {
    /// Mutate honest feedback for the guess shown on `row`
    fn apply<R: Rng + ?Sized>(
        &mut self,
        honest: Feedback,
        guess: &Word,
        row: usize,
        rng: &mut R,
    ) -> GlitchOutcome;

    /// Discard all per-session state
    fn reset(&mut self);

    /// Called once when the game ends
    fn settle(&mut self) {}
}

/// Which glitch strategy a session plays with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlitchKind {
    TimedCorrect,
    SingleFalse,
    DiceRoll,
}

impl GlitchKind {
    pub const ALL: [Self; 3] = [Self::TimedCorrect, Self::SingleFalse, Self::DiceRoll];

    /// Parse a strategy name
    ///
    /// Supported names: "timed", "single", "dice".
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "timed" | "timed-correct" => Some(Self::TimedCorrect),
            "single" | "single-false" => Some(Self::SingleFalse),
            "dice" | "dice-roll" => Some(Self::DiceRoll),
            _ => None,
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::TimedCorrect => "Timed Correct",
            Self::SingleFalse => "Single False",
            Self::DiceRoll => "Dice Roll",
        }
    }

    /// Whether a hard mode exists for this strategy
    #[must_use]
    pub const fn supports_hard_mode(self) -> bool {
        matches!(self, Self::SingleFalse | Self::DiceRoll)
    }

    /// Next strategy in cycling order
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::TimedCorrect => Self::SingleFalse,
            Self::SingleFalse => Self::DiceRoll,
            Self::DiceRoll => Self::TimedCorrect,
        }
    }
}

/// Enum wrapper for all glitch strategies
///
/// Allows runtime selection of the strategy while keeping static dispatch.
#[derive(Debug, Clone)]
pub enum Glitch {
    TimedCorrect(TimedCorrect),
    SingleFalse(SingleFalseFeedback),
    DiceRoll(DiceRoll),
}

impl Glitch {
    /// Build a fresh strategy; `hard_mode` is ignored where unsupported
    #[must_use]
    pub fn new(kind: GlitchKind, hard_mode: bool) -> Self {
        match kind {
            GlitchKind::TimedCorrect => Self::TimedCorrect(TimedCorrect::default()),
            GlitchKind::SingleFalse => Self::SingleFalse(SingleFalseFeedback::new(hard_mode)),
            GlitchKind::DiceRoll => Self::DiceRoll(DiceRoll::new(hard_mode)),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> GlitchKind {
        match self {
            Self::TimedCorrect(_) => GlitchKind::TimedCorrect,
            Self::SingleFalse(_) => GlitchKind::SingleFalse,
            Self::DiceRoll(_) => GlitchKind::DiceRoll,
        }
    }

    #[must_use]
    pub const fn hard_mode(&self) -> bool {
        match self {
            Self::TimedCorrect(_) => false,
            Self::SingleFalse(s) => s.hard_mode(),
            Self::DiceRoll(s) => s.hard_mode(),
        }
    }

    /// Detector budget, for strategies that have detectors
    #[must_use]
    pub fn detector_info(&self) -> Option<DetectorInfo> {
        match self {
            Self::SingleFalse(s) => Some(s.detector_info()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_single_false(&self) -> Option<&SingleFalseFeedback> {
        match self {
            Self::SingleFalse(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_dice_roll(&self) -> Option<&DiceRoll> {
        match self {
            Self::DiceRoll(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_timed_correct(&self) -> Option<&TimedCorrect> {
        match self {
            Self::TimedCorrect(s) => Some(s),
            _ => None,
        }
    }

    /// Run the detector on one tile
    ///
    /// # Errors
    /// Returns [`ProbeRejection::Unavailable`] for strategies without detectors,
    /// otherwise whatever the detector ledger rejects.
    pub fn check_tile(
        &mut self,
        row: usize,
        position: usize,
        game_over: bool,
    ) -> Result<ProbeOutcome, ProbeRejection> {
        match self {
            Self::SingleFalse(s) => s.check_tile_correctness(row, position, game_over),
            _ => Err(ProbeRejection::Unavailable),
        }
    }
}

impl GlitchStrategy for Glitch {
    fn apply<R: Rng + ?Sized>(
        &mut self,
        honest: Feedback,
        guess: &Word,
        row: usize,
        rng: &mut R,
    ) -> GlitchOutcome {
        match self {
            Self::TimedCorrect(s) => s.apply(honest, guess, row, rng),
            Self::SingleFalse(s) => s.apply(honest, guess, row, rng),
            Self::DiceRoll(s) => s.apply(honest, guess, row, rng),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::TimedCorrect(s) => s.reset(),
            Self::SingleFalse(s) => s.reset(),
            Self::DiceRoll(s) => s.reset(),
        }
    }

    fn settle(&mut self) {
        match self {
            Self::TimedCorrect(s) => s.settle(),
            Self::SingleFalse(s) => s.settle(),
            Self::DiceRoll(s) => s.settle(),
        }
    }
}
