//! Per-letter feedback calculation and representation
//!
//! Feedback is an ordered row of statuses aligned with the guess:
//! - Gray: letter not in the target (or all copies already credited)
//! - Yellow: letter in the target, wrong position
//! - Green: letter in the correct position

use super::Word;
use super::word::WORD_LENGTH;
use rustc_hash::FxHashMap;
use std::fmt;
use std::ops::Index;

/// Match status of a single tile
///
/// Ordered by priority: `Gray < Yellow < Green`. The per-key status map only
/// ever moves a key upward in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    Gray,
    Yellow,
    Green,
}

impl Status {
    /// Every status, in priority order
    pub const ALL: [Self; 3] = [Self::Gray, Self::Yellow, Self::Green];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }

    #[must_use]
    pub const fn to_emoji(self) -> char {
        match self {
            Self::Gray => '⬜',
            Self::Yellow => '🟨',
            Self::Green => '🟩',
        }
    }

    /// Parse a single feedback character
    ///
    /// Accepts 'G'/'g'/🟩, 'Y'/'y'/🟨 and '-'/'_'/'X'/'x'/⬜.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            'G' | 'g' | '🟩' => Some(Self::Green),
            'Y' | 'y' | '🟨' => Some(Self::Yellow),
            '-' | '_' | 'X' | 'x' | '⬜' => Some(Self::Gray),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Feedback row for a guess: exactly one status per letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback([Status; WORD_LENGTH]);

impl Feedback {
    /// All greens (perfect match)
    pub const PERFECT: Self = Self([Status::Green; WORD_LENGTH]);

    #[must_use]
    pub const fn new(statuses: [Status; WORD_LENGTH]) -> Self {
        Self(statuses)
    }

    /// Feedback for a correct guess
    #[must_use]
    pub const fn all_green() -> Self {
        Self::PERFECT
    }

    /// Calculate the honest feedback when `guess` is played against `target`
    ///
    /// Classic two-pass scoring with duplicate-letter handling.
    ///
    /// # Algorithm
    /// 1. First pass: exact matches are green; every other target letter is
    ///    added to a remaining-count table
    /// 2. Second pass, left to right: a non-green guess letter with a remaining
    ///    count is yellow and consumes one count, otherwise gray
    ///
    /// # Examples
    /// ```
    /// use glitchdle::core::{Feedback, Word};
    ///
    /// let guess = Word::new("crane").unwrap();
    /// let target = Word::new("slate").unwrap();
    /// let feedback = Feedback::calculate(&guess, &target);
    ///
    /// assert_eq!(feedback.to_emoji(), "⬜⬜🟩⬜🟩");
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, target: &Word) -> Self {
        let mut result = [Status::Gray; WORD_LENGTH];
        let mut remaining: FxHashMap<u8, u8> = FxHashMap::default();

        for (i, (&g, &t)) in guess.chars().iter().zip(target.chars()).enumerate() {
            if g == t {
                result[i] = Status::Green;
            } else {
                *remaining.entry(t).or_insert(0) += 1;
            }
        }

        for (i, &g) in guess.chars().iter().enumerate() {
            if result[i] == Status::Green {
                continue;
            }
            if let Some(count) = remaining.get_mut(&g)
                && *count > 0
            {
                result[i] = Status::Yellow;
                *count -= 1;
            }
        }

        Self(result)
    }

    #[inline]
    #[must_use]
    pub const fn statuses(&self) -> &[Status; WORD_LENGTH] {
        &self.0
    }

    /// Replace the status at `position`
    ///
    /// # Panics
    /// Panics if position >= 5
    #[inline]
    pub fn set(&mut self, position: usize, status: Status) {
        self.0[position] = status;
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        *self == Self::PERFECT
    }

    #[must_use]
    pub fn count_greens(&self) -> usize {
        self.0.iter().filter(|&&s| s == Status::Green).count()
    }

    #[must_use]
    pub fn count_yellows(&self) -> usize {
        self.0.iter().filter(|&&s| s == Status::Yellow).count()
    }

    /// Number of positions whose status differs from `other`
    #[must_use]
    pub fn diff_count(&self, other: &Self) -> usize {
        self.0.iter().zip(other.0.iter()).filter(|(a, b)| a != b).count()
    }

    /// Parse feedback from a string like "GY-GY" or "🟩🟨⬜🟩🟨"
    ///
    /// # Examples
    /// ```
    /// use glitchdle::core::Feedback;
    ///
    /// let a = Feedback::parse("GY-GY").unwrap();
    /// let b = Feedback::parse("🟩🟨⬜🟩🟨").unwrap();
    /// assert_eq!(a, b);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let mut result = [Status::Gray; WORD_LENGTH];
        let mut chars = s.chars();

        for slot in &mut result {
            *slot = Status::from_char(chars.next()?)?;
        }

        if chars.next().is_some() {
            return None;
        }

        Some(Self(result))
    }

    /// Convert feedback to emoji string
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|s| s.to_emoji()).collect()
    }
}

impl Index<usize> for Feedback {
    type Output = Status;

    fn index(&self, position: usize) -> &Status {
        &self.0[position]
    }
}

impl std::str::FromStr for Feedback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid feedback string: {s}"))
    }
}
