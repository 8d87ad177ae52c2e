//! Game session: mode configuration, key map and the guess loop

mod config;
mod keys;
mod session;

pub use config::{CLASSIC_MAX_GUESSES, GLITCH_MAX_GUESSES, GameConfig, GameMode};
pub use keys::KeyStatusMap;
pub use session::{BoardRow, GuessError, Phase, Session, Submission, TileMark};
