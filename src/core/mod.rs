//! Core domain types for the game
//!
//! Words and the Feedback Engine. Everything here is pure and deterministic.

mod feedback;
mod word;

pub use feedback::{Feedback, Status};
pub use word::{WORD_LENGTH, Word, WordError};
