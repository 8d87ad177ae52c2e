//! Glitchdle
//!
//! A Wordle-style word game whose feedback deliberately lies. Besides the
//! classic game there are three glitch strategies: a wrong tile that is fixed
//! one guess later, a permanent wrong tile that detectors can expose, and a
//! dice roll deciding how many tiles are wrong.
//!
//! # Quick Start
//!
//! ```rust
//! use glitchdle::core::{Feedback, Word};
//!
//! let guess = Word::new("crane").unwrap();
//! let target = Word::new("slate").unwrap();
//!
//! let feedback = Feedback::calculate(&guess, &target);
//! println!("{}", feedback.to_emoji());
//! ```
//!
//! Playing a session with a glitch strategy:
//!
//! ```rust
//! use glitchdle::game::{GameConfig, GameMode, Session};
//! use glitchdle::glitch::GlitchKind;
//! use glitchdle::wordlists::WordList;
//!
//! let words = WordList::embedded();
//! let config = GameConfig::new(GameMode::Glitch(GlitchKind::SingleFalse), false);
//! let mut session = Session::new(config, &words);
//!
//! let submission = session.submit_guess("crane").unwrap();
//! println!("{}", submission.feedback.to_emoji());
//! ```

// Core domain types
pub mod core;

// Feedback corruption strategies
pub mod glitch;

// Session state machine
pub mod game;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

// Logger setup
pub mod logging;
