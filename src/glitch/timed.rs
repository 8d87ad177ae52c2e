//! Timed Correct: one wrong tile per guess, corrected one guess later

use super::{GlitchOutcome, GlitchStrategy, PendingFix, flip_one};
use crate::core::{Feedback, Word};
use rand::Rng;

/// Flips one tile per guess and holds the fix back for one full turn
///
/// The fix produced for guess N is returned when guess N+1 is applied, so the
/// correction lands on the board exactly one submission after the error.
#[derive(Debug, Clone, Default)]
pub struct TimedCorrect {
    pending: Option<PendingFix>,
}

impl TimedCorrect {
    /// Fix waiting to be returned on the next call to `apply`
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingFix> {
        self.pending.as_ref()
    }
}

impl GlitchStrategy for TimedCorrect {
    fn apply<R: Rng + ?Sized>(
        &mut self,
        honest: Feedback,
        guess: &Word,
        row: usize,
        rng: &mut R,
    ) -> GlitchOutcome {
        let fix = self.pending.take();

        let mut feedback = honest;
        let flip = flip_one(&mut feedback, rng);

        self.pending = Some(PendingFix {
            row,
            position: flip.position,
            original: flip.original,
            letter: guess.char_at(flip.position),
        });

        log::debug!(
            "timed glitch on row {row}: tile {} {} -> {}",
            flip.position,
            flip.original,
            flip.fake
        );

        GlitchOutcome { feedback, fix }
    }

    fn reset(&mut self) {
        self.pending = None;
    }

    // An unreturned fix is dropped when the game ends; the error stays on the board.
    fn settle(&mut self) {
        if let Some(fix) = self.pending.take() {
            log::debug!("discarding pending fix for row {} at game end", fix.row);
        }
    }
}
