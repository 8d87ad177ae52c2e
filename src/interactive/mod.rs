//! Interactive TUI interface

mod app;
mod rendering;

pub use app::{
    App, DICE_ROLL_DURATION, InputMode, MESSAGE_DURATION, Message, MessageStyle,
    PROBE_MESSAGE_DURATION, REVEAL_DURATION, Reveal, Statistics, TileCursor, run_tui,
};
pub use rendering::ui;
