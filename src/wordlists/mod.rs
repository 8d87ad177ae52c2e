//! Word lists for the game
//!
//! The answer pool holds the words a target is picked from; the acceptance
//! list holds every legal guess and always contains the answer pool.

mod embedded;
pub mod loader;

pub use embedded::{ALLOWED, ALLOWED_COUNT, ANSWERS, ANSWERS_COUNT};

use crate::core::Word;
use loader::words_from_slice;
use rand::Rng;
use rustc_hash::FxHashSet;
use std::fmt;

/// Error type for unusable word lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordListError {
    EmptyAnswerPool,
}

impl fmt::Display for WordListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAnswerPool => write!(f, "Answer pool contains no valid words"),
        }
    }
}

impl std::error::Error for WordListError {}

/// Answer pool plus acceptance list
#[derive(Debug, Clone)]
pub struct WordList {
    answers: Vec<Word>,
    accepted: FxHashSet<Word>,
}

impl WordList {
    /// Build a word list; every answer is also accepted as a guess
    ///
    /// # Errors
    /// Returns `WordListError::EmptyAnswerPool` if `answers` is empty.
    pub fn new(
        answers: Vec<Word>,
        extra_accepted: impl IntoIterator<Item = Word>,
    ) -> Result<Self, WordListError> {
        if answers.is_empty() {
            return Err(WordListError::EmptyAnswerPool);
        }

        let mut accepted: FxHashSet<Word> = extra_accepted.into_iter().collect();
        accepted.extend(answers.iter().cloned());

        Ok(Self { answers, accepted })
    }

    /// The word lists compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self {
            answers: words_from_slice(ANSWERS),
            accepted: words_from_slice(ANSWERS)
                .into_iter()
                .chain(words_from_slice(ALLOWED))
                .collect(),
        }
    }

    #[must_use]
    pub fn answers(&self) -> &[Word] {
        &self.answers
    }

    #[must_use]
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    /// Guess legality: membership in the acceptance list
    #[must_use]
    pub fn is_accepted(&self, word: &Word) -> bool {
        self.accepted.contains(word)
    }

    /// Uniform-random pick from the answer pool
    pub fn pick_target<R: Rng + ?Sized>(&self, rng: &mut R) -> &Word {
        &self.answers[rng.random_range(0..self.answers.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn answers_count_matches_const() {
        assert_eq!(ANSWERS.len(), ANSWERS_COUNT);
    }

    #[test]
    fn allowed_count_matches_const() {
        assert_eq!(ALLOWED.len(), ALLOWED_COUNT);
    }

    #[test]
    fn embedded_words_are_valid() {
        for &word in ANSWERS.iter().chain(ALLOWED) {
            assert_eq!(word.len(), 5, "Word '{word}' is not 5 letters");
            assert!(
                word.chars().all(|c| c.is_ascii_lowercase()),
                "Word '{word}' contains non-lowercase chars"
            );
        }
    }

    #[test]
    fn embedded_words_survive_loading_without_duplicates() {
        for list in [ANSWERS, ALLOWED] {
            assert_eq!(words_from_slice(list).len(), list.len());

            let unique: FxHashSet<&str> = list.iter().copied().collect();
            assert_eq!(unique.len(), list.len());
        }
    }

    #[test]
    fn every_answer_is_accepted() {
        let list = WordList::embedded();
        assert_eq!(list.answers().len(), ANSWERS_COUNT);
        for answer in list.answers() {
            assert!(list.is_accepted(answer), "{answer} not accepted");
        }
    }

    #[test]
    fn acceptance_is_a_superset() {
        let list = WordList::embedded();
        assert!(list.accepted_count() > list.answers().len());
        assert!(list.is_accepted(&Word::new(ALLOWED[0]).unwrap()));
        assert!(!list.is_accepted(&Word::new("zzzzz").unwrap()));
    }

    #[test]
    fn new_merges_answers_into_acceptance() {
        let answers = vec![Word::new("crane").unwrap()];
        let extra = vec![Word::new("fuzzy").unwrap()];
        let list = WordList::new(answers, extra).unwrap();

        assert_eq!(list.accepted_count(), 2);
        assert!(list.is_accepted(&Word::new("crane").unwrap()));
    }

    #[test]
    fn new_rejects_empty_answer_pool() {
        assert_eq!(
            WordList::new(Vec::new(), Vec::new()).unwrap_err(),
            WordListError::EmptyAnswerPool
        );
    }

    #[test]
    fn pick_target_comes_from_answers() {
        let mut rng = StdRng::seed_from_u64(0);
        let list = WordList::embedded();
        for _ in 0..20 {
            let target = list.pick_target(&mut rng);
            assert!(list.answers().contains(target));
        }
    }
}
