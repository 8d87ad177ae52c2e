//! Dice Roll: 0, 1 or 2 wrong tiles per guess, weighted by three dice
//!
//! Three six-sided dice, labeled Zero/One/Two, are rolled for every guess.
//! A die showing 1 carries no weight; any other face weighs its value. The
//! weights become integer percentages that always sum to 100, and the number
//! of flips for the guess is drawn from them.

use super::{Flip, GlitchOutcome, GlitchStrategy, flip_one};
use crate::core::{Feedback, Status, WORD_LENGTH, Word};
use rand::Rng;

/// Faces on each die
pub const DIE_FACES: u8 = 6;

/// One roll of the Zero/One/Two dice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiceRolls {
    pub zero: u8,
    pub one: u8,
    pub two: u8,
}

impl DiceRolls {
    #[must_use]
    pub const fn new(zero: u8, one: u8, two: u8) -> Self {
        Self { zero, one, two }
    }

    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            zero: rng.random_range(1..=DIE_FACES),
            one: rng.random_range(1..=DIE_FACES),
            two: rng.random_range(1..=DIE_FACES),
        }
    }

    #[must_use]
    pub const fn faces(self) -> [u8; 3] {
        [self.zero, self.one, self.two]
    }

    const fn weight(face: u8) -> u32 {
        if face == 1 { 0 } else { face as u32 }
    }

    /// Percent chance of 0, 1 and 2 flips for this roll
    ///
    /// All ones forces 0 flips. Otherwise each outcome gets its weight over
    /// the total, rounded, with the rounding residual added to the largest
    /// outcome (first in Zero, One, Two order on ties).
    ///
    /// # Examples
    /// ```
    /// use glitchdle::glitch::DiceRolls;
    ///
    /// let odds = DiceRolls::new(2, 3, 4).odds();
    /// assert_eq!(odds.as_array(), [22, 33, 45]);
    /// ```
    #[must_use]
    pub fn odds(self) -> FlipOdds {
        if self.faces() == [1, 1, 1] {
            return FlipOdds::new(100, 0, 0);
        }

        let weights = self.faces().map(Self::weight);
        let total: u32 = weights.iter().sum();
        let raw = weights.map(|w| f64::from(w) / f64::from(total) * 100.0);

        let [zero, one, two] = normalize_percentages(raw);
        FlipOdds::new(zero, one, two)
    }
}

/// Integer percentages for 0, 1 and 2 flips; always sum to 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlipOdds {
    pub zero: u8,
    pub one: u8,
    pub two: u8,
}

impl FlipOdds {
    #[must_use]
    pub const fn new(zero: u8, one: u8, two: u8) -> Self {
        Self { zero, one, two }
    }

    #[must_use]
    pub const fn as_array(self) -> [u8; 3] {
        [self.zero, self.one, self.two]
    }

    /// Map a uniform draw in `0..100` onto a flip count
    #[must_use]
    pub fn flip_count(self, draw: u32) -> usize {
        let zero = u32::from(self.zero);
        let one = u32::from(self.one);

        if draw < zero {
            0
        } else if draw < zero + one {
            1
        } else {
            2
        }
    }

    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> usize {
        self.flip_count(rng.random_range(0..100))
    }

    /// Expected number of flips
    #[must_use]
    pub fn expected_flips(self) -> f64 {
        (f64::from(self.one) + 2.0 * f64::from(self.two)) / 100.0
    }
}

/// Likelihood, in integer percent, of each true status behind a shown tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOdds {
    pub gray: u8,
    pub yellow: u8,
    pub green: u8,
}

impl StatusOdds {
    /// Odds for a tile showing `shown` on a row played with `odds`
    ///
    /// Each flip hits this position with chance 1/5 and moves it to one of
    /// the two other statuses. That kernel is symmetric, so with no prior
    /// knowledge the chance the true status is `s` equals the chance a tile
    /// truly `shown` ends up displaying `s`.
    #[must_use]
    pub fn for_shown(shown: Status, odds: FlipOdds) -> Self {
        let hit = 1.0 / WORD_LENGTH as f64;
        let stay_one = 1.0 - hit;
        let stay_two = stay_one * stay_one + 2.0 * (hit / 2.0) * (hit / 2.0);

        let stay = (f64::from(odds.zero)
            + f64::from(odds.one) * stay_one
            + f64::from(odds.two) * stay_two)
            / 100.0;
        let moved = (1.0 - stay) / 2.0;

        let raw = Status::ALL.map(|s| if s == shown { stay * 100.0 } else { moved * 100.0 });
        let [gray, yellow, green] = normalize_percentages(raw);

        Self {
            gray,
            yellow,
            green,
        }
    }

    #[must_use]
    pub const fn get(self, status: Status) -> u8 {
        match status {
            Status::Gray => self.gray,
            Status::Yellow => self.yellow,
            Status::Green => self.green,
        }
    }
}

/// Round three percentages and force them to sum to exactly 100
///
/// The residual goes to the largest rounded value; ties go to the first.
fn normalize_percentages(raw: [f64; 3]) -> [u8; 3] {
    let mut rounded = raw.map(|p| p.round() as i32);
    let diff = 100 - rounded.iter().sum::<i32>();

    if diff != 0 {
        let largest = rounded
            .iter()
            .enumerate()
            .fold(0, |best, (i, &p)| if p > rounded[best] { i } else { best });
        rounded[largest] += diff;
    }

    rounded.map(|p| p.clamp(0, 100) as u8)
}

/// What happened on one DiceRoll guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceTurn {
    pub row: usize,
    pub rolls: DiceRolls,
    pub odds: FlipOdds,
    /// Flips in the order applied; positions may repeat
    pub flips: Vec<Flip>,
    pub shown: Feedback,
}

/// Re-rolls the dice for every guess and applies that many permanent flips
#[derive(Debug, Clone)]
pub struct DiceRoll {
    hard_mode: bool,
    history: Vec<DiceTurn>,
}

impl DiceRoll {
    #[must_use]
    pub const fn new(hard_mode: bool) -> Self {
        Self {
            hard_mode,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub const fn hard_mode(&self) -> bool {
        self.hard_mode
    }

    #[must_use]
    pub fn history(&self) -> &[DiceTurn] {
        &self.history
    }

    /// Most recent turn, for showing the dice
    #[must_use]
    pub fn last_turn(&self) -> Option<&DiceTurn> {
        self.history.last()
    }

    #[must_use]
    pub fn turn_for_row(&self, row: usize) -> Option<&DiceTurn> {
        self.history.iter().find(|t| t.row == row)
    }

    /// Hint for a displayed tile; informational only
    ///
    /// Returns `None` in hard mode, for rows without a dice turn, or for
    /// positions outside the row.
    #[must_use]
    pub fn status_odds(&self, row: usize, position: usize) -> Option<StatusOdds> {
        if self.hard_mode || position >= WORD_LENGTH {
            return None;
        }
        let turn = self.turn_for_row(row)?;
        Some(StatusOdds::for_shown(turn.shown[position], turn.odds))
    }
}

impl GlitchStrategy for DiceRoll {
    fn apply<R: Rng + ?Sized>(
        &mut self,
        honest: Feedback,
        _guess: &Word,
        row: usize,
        rng: &mut R,
    ) -> GlitchOutcome {
        let rolls = DiceRolls::roll(rng);
        let odds = rolls.odds();
        let count = odds.sample(rng);

        let mut feedback = honest;
        let flips: Vec<Flip> = (0..count).map(|_| flip_one(&mut feedback, rng)).collect();

        log::debug!(
            "dice on row {row}: rolled {:?}, odds {:?}, {count} flip(s)",
            rolls.faces(),
            odds.as_array()
        );

        self.history.push(DiceTurn {
            row,
            rolls,
            odds,
            flips,
            shown: feedback,
        });

        GlitchOutcome {
            feedback,
            fix: None,
        }
    }

    fn reset(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn all_ones_forces_zero_flips() {
        let odds = DiceRolls::new(1, 1, 1).odds();
        assert_eq!(odds, FlipOdds::new(100, 0, 0));
        for draw in 0..100 {
            assert_eq!(odds.flip_count(draw), 0);
        }
    }

    #[test]
    fn all_sixes_split_evenly_with_residual_on_zero() {
        let odds = DiceRolls::new(6, 6, 6).odds();
        assert_eq!(odds.as_array(), [34, 33, 33]);
    }

    #[test]
    fn ones_carry_no_weight() {
        assert_eq!(DiceRolls::new(1, 6, 6).odds().as_array(), [0, 50, 50]);
        assert_eq!(DiceRolls::new(1, 1, 4).odds().as_array(), [0, 0, 100]);
        assert_eq!(DiceRolls::new(3, 1, 1).odds().as_array(), [100, 0, 0]);
    }

    #[test]
    fn rounding_residual_goes_to_largest() {
        // 22.2 / 33.3 / 44.4 rounds to 99; the extra point lands on Two
        assert_eq!(DiceRolls::new(2, 3, 4).odds().as_array(), [22, 33, 45]);
        // 41.7 / 41.7 / 16.7 rounds to 101; Zero is the first of the tied largest
        assert_eq!(DiceRolls::new(5, 5, 2).odds().as_array(), [41, 42, 17]);
    }

    #[test]
    fn every_roll_sums_to_one_hundred() {
        for zero in 1..=DIE_FACES {
            for one in 1..=DIE_FACES {
                for two in 1..=DIE_FACES {
                    let odds = DiceRolls::new(zero, one, two).odds();
                    let sum: u32 = odds.as_array().iter().map(|&p| u32::from(p)).sum();
                    assert_eq!(sum, 100, "roll ({zero}, {one}, {two})");
                }
            }
        }
    }

    #[test]
    fn flip_count_uses_cumulative_thresholds() {
        let odds = FlipOdds::new(22, 33, 45);
        assert_eq!(odds.flip_count(0), 0);
        assert_eq!(odds.flip_count(21), 0);
        assert_eq!(odds.flip_count(22), 1);
        assert_eq!(odds.flip_count(54), 1);
        assert_eq!(odds.flip_count(55), 2);
        assert_eq!(odds.flip_count(99), 2);
    }

    #[test]
    fn apply_records_turn_and_flip_count() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut dice = DiceRoll::new(false);
        let guess = Word::new("crane").unwrap();
        let honest = Feedback::calculate(&guess, &Word::new("slate").unwrap());

        for row in 0..50 {
            let outcome = dice.apply(honest, &guess, row, &mut rng);
            let turn = dice.last_turn().unwrap();

            assert_eq!(turn.row, row);
            assert!(turn.flips.len() <= 2);
            assert_eq!(turn.shown, outcome.feedback);
            assert!(outcome.fix.is_none());
            // A second flip may land on the same tile, so changes never exceed flips
            assert!(honest.diff_count(&outcome.feedback) <= turn.flips.len());
            if turn.flips.len() == 1 {
                assert_eq!(honest.diff_count(&outcome.feedback), 1);
            }
        }
        assert_eq!(dice.history().len(), 50);
    }

    #[test]
    fn status_odds_for_shown_tile() {
        let certain = StatusOdds::for_shown(Status::Yellow, FlipOdds::new(100, 0, 0));
        assert_eq!(certain.get(Status::Yellow), 100);
        assert_eq!(certain.get(Status::Green), 0);

        let even = StatusOdds::for_shown(Status::Green, FlipOdds::new(34, 33, 33));
        assert_eq!((even.green, even.yellow, even.gray), (82, 9, 9));
    }

    #[test]
    fn status_odds_hidden_in_hard_mode() {
        let mut rng = StdRng::seed_from_u64(4);
        let guess = Word::new("crane").unwrap();
        let honest = Feedback::new([Status::Gray; WORD_LENGTH]);

        let mut hard = DiceRoll::new(true);
        hard.apply(honest, &guess, 0, &mut rng);
        assert!(hard.status_odds(0, 0).is_none());

        let mut normal = DiceRoll::new(false);
        normal.apply(honest, &guess, 0, &mut rng);
        let odds = normal.status_odds(0, 0).unwrap();
        assert_eq!(
            u32::from(odds.gray) + u32::from(odds.yellow) + u32::from(odds.green),
            100
        );
        assert!(normal.status_odds(1, 0).is_none());
        assert!(normal.status_odds(0, WORD_LENGTH).is_none());
    }

    #[test]
    fn reset_clears_history() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut dice = DiceRoll::new(false);
        let guess = Word::new("crane").unwrap();
        dice.apply(Feedback::PERFECT, &guess, 0, &mut rng);

        dice.reset();
        assert!(dice.history().is_empty());
        assert!(dice.last_turn().is_none());
    }
}
