//! Command implementations

pub mod odds;
pub mod simple;
pub mod simulate;

pub use odds::{OddsRow, OddsSummary, dice_odds_table, summarize};
pub use simple::{print_board, run_simple};
pub use simulate::{SimulationConfig, SimulationResult, Tally, run_simulation, simulate_game};
