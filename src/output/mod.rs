//! Terminal output formatting
//!
//! Colored tiles for line output and pretty-printing of command reports.

pub mod display;
pub mod formatters;

pub use display::{print_odds_table, print_simulation_result};
