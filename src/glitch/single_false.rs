//! Single False Feedback: one permanent wrong tile per guess, plus detectors
//!
//! The detector ledger tracks which tiles and rows have been probed and how
//! much of the per-game detector budget is left.

use super::{GlitchOutcome, GlitchRecord, GlitchStrategy, flip_one};
use crate::core::{Feedback, Status, WORD_LENGTH, Word};
use rand::Rng;
use rustc_hash::FxHashSet;
use std::fmt;

/// Detector uses allowed per game
pub const MAX_DETECTORS: usize = 5;

/// Detector budget snapshot for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorInfo {
    pub hard_mode: bool,
    pub used: usize,
    pub remaining: usize,
    pub max: usize,
}

/// Successful detector use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The probed tile was the glitched one; the whole row is now resolved
    GlitchDetected {
        row: usize,
        position: usize,
        true_status: Status,
        remaining: usize,
    },
    /// The probed tile shows its true status
    Correct {
        row: usize,
        position: usize,
        remaining: usize,
    },
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlitchDetected {
                true_status,
                remaining,
                ..
            } => write!(
                f,
                "🔍 GLITCH DETECTED! This tile should be {}. Entire row now checked. ({remaining} detectors left)",
                true_status.name().to_uppercase()
            ),
            Self::Correct { remaining, .. } => {
                write!(f, "✅ This tile is correct! ({remaining} detectors left)")
            }
        }
    }
}

/// Why a detector use was refused; no state changes on rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeRejection {
    GameOver,
    RowAlreadyChecked,
    TileAlreadyChecked,
    HardMode,
    NoDetectorsLeft { max: usize },
    /// Row not submitted yet, or position outside the row
    NotProbeable,
    /// Active strategy has no detectors
    Unavailable,
}

impl fmt::Display for ProbeRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameOver => write!(f, "The game is over!"),
            Self::RowAlreadyChecked => write!(f, "This entire row has already been checked!"),
            Self::TileAlreadyChecked => write!(f, "This tile has already been checked!"),
            Self::HardMode => write!(f, "Detectors disabled in Hard Mode!"),
            Self::NoDetectorsLeft { max } => {
                write!(f, "No detectors left! ({max} max per game)")
            }
            Self::NotProbeable => write!(f, "Only completed tiles can be checked!"),
            Self::Unavailable => write!(f, "No detectors in this mode!"),
        }
    }
}

impl std::error::Error for ProbeRejection {}

/// Flips one tile per guess and never corrects it on its own
#[derive(Debug, Clone)]
pub struct SingleFalseFeedback {
    hard_mode: bool,
    detectors_used: usize,
    history: Vec<GlitchRecord>,
    checked_tiles: FxHashSet<(usize, usize)>,
    checked_rows: FxHashSet<usize>,
}

impl SingleFalseFeedback {
    #[must_use]
    pub fn new(hard_mode: bool) -> Self {
        Self {
            hard_mode,
            detectors_used: 0,
            history: Vec::new(),
            checked_tiles: FxHashSet::default(),
            checked_rows: FxHashSet::default(),
        }
    }

    #[must_use]
    pub const fn hard_mode(&self) -> bool {
        self.hard_mode
    }

    /// Every glitch applied this game, in row order
    #[must_use]
    pub fn history(&self) -> &[GlitchRecord] {
        &self.history
    }

    #[must_use]
    pub fn record_for_row(&self, row: usize) -> Option<&GlitchRecord> {
        self.history.iter().find(|g| g.row == row)
    }

    #[must_use]
    pub fn is_tile_checked(&self, row: usize, position: usize) -> bool {
        self.checked_tiles.contains(&(row, position))
    }

    #[must_use]
    pub fn is_row_checked(&self, row: usize) -> bool {
        self.checked_rows.contains(&row)
    }

    #[must_use]
    pub const fn detector_info(&self) -> DetectorInfo {
        DetectorInfo {
            hard_mode: self.hard_mode,
            used: self.detectors_used,
            remaining: MAX_DETECTORS - self.detectors_used,
            max: MAX_DETECTORS,
        }
    }

    fn mark_row_checked(&mut self, row: usize) {
        self.checked_rows.insert(row);
        for position in 0..WORD_LENGTH {
            self.checked_tiles.insert((row, position));
        }
    }

    /// Probe one tile of a displayed row
    ///
    /// Checks run in order: game over, row already resolved, tile already
    /// checked, hard mode, budget exhausted. Only a probe that passes all of
    /// them consumes a detector.
    ///
    /// # Errors
    /// Returns the first [`ProbeRejection`] that applies; the ledger is untouched.
    ///
    /// # Panics
    /// Panics if `row` has no glitch record. Callers only probe rows that were
    /// submitted through [`GlitchStrategy::apply`], so a missing record means
    /// the ledger is corrupt.
    pub fn check_tile_correctness(
        &mut self,
        row: usize,
        position: usize,
        game_over: bool,
    ) -> Result<ProbeOutcome, ProbeRejection> {
        if game_over {
            return Err(ProbeRejection::GameOver);
        }
        if self.is_row_checked(row) {
            return Err(ProbeRejection::RowAlreadyChecked);
        }
        if self.is_tile_checked(row, position) {
            return Err(ProbeRejection::TileAlreadyChecked);
        }
        if self.hard_mode {
            return Err(ProbeRejection::HardMode);
        }
        if self.detectors_used >= MAX_DETECTORS {
            return Err(ProbeRejection::NoDetectorsLeft { max: MAX_DETECTORS });
        }

        let record = self
            .record_for_row(row)
            .unwrap_or_else(|| panic!("glitch ledger has no record for probed row {row}"));
        let (glitched_position, true_status) = (record.position, record.original);

        self.detectors_used += 1;
        let remaining = MAX_DETECTORS - self.detectors_used;

        if position == glitched_position {
            self.mark_row_checked(row);
            log::info!("detector found glitch at row {row}, tile {position}");
            Ok(ProbeOutcome::GlitchDetected {
                row,
                position,
                true_status,
                remaining,
            })
        } else {
            self.checked_tiles.insert((row, position));
            log::info!("detector verified row {row}, tile {position}");
            Ok(ProbeOutcome::Correct {
                row,
                position,
                remaining,
            })
        }
    }
}

impl GlitchStrategy for SingleFalseFeedback {
    fn apply<R: Rng + ?Sized>(
        &mut self,
        honest: Feedback,
        guess: &Word,
        row: usize,
        rng: &mut R,
    ) -> GlitchOutcome {
        let mut feedback = honest;
        let flip = flip_one(&mut feedback, rng);

        log::debug!(
            "single glitch on row {row}: tile {} {} -> {}",
            flip.position,
            flip.original,
            flip.fake
        );

        self.history.push(GlitchRecord {
            row,
            position: flip.position,
            original: flip.original,
            fake: flip.fake,
            guess: guess.clone(),
        });

        GlitchOutcome {
            feedback,
            fix: None,
        }
    }

    fn reset(&mut self) {
        self.detectors_used = 0;
        self.history.clear();
        self.checked_tiles.clear();
        self.checked_rows.clear();
    }
}
