//! Display functions for command results

use super::formatters::{create_progress_bar, percent_bar};
use crate::commands::{OddsRow, SimulationResult, summarize};
use colored::Colorize;

/// Print the Dice Roll odds for every dice outcome
pub fn print_odds_table(rows: &[OddsRow]) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "DICE ROLL ODDS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!("\n  Dice (0/1/2)   0 flips  1 flip  2 flips   Expected");

    for row in rows {
        let [zero, one, two] = row.rolls.faces();
        let odds = row.odds;
        println!(
            "  {zero} {one} {two}          {:>5}%  {:>5}%  {:>6}%   {:.2}",
            odds.zero, odds.one, odds.two, row.expected_flips
        );
    }

    let summary = summarize(rows);
    println!("\n📊 {}", "Averages:".bright_cyan().bold());
    println!("   Outcomes:         {}", summary.outcomes);
    for (label, mean) in ["0 flips", "1 flip ", "2 flips"]
        .iter()
        .zip(summary.mean_odds)
    {
        println!(
            "   {label}:          [{}] {}",
            create_progress_bar(mean, 100.0, 30).green(),
            format!("{mean:.1}%").bright_yellow()
        );
    }
    println!(
        "   Expected flips:   {}",
        format!("{:.3}", summary.mean_expected_flips)
            .bright_yellow()
            .bold()
    );
}

/// Print the result of a simulation run
pub fn print_simulation_result(result: &SimulationResult) {
    let config = &result.config;
    let tally = &result.tally;

    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "GLITCH SIMULATION:".bright_cyan().bold(),
        config.kind.display_name().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Run:".bright_cyan().bold());
    println!("   Games:            {}", config.games);
    println!("   Guesses per game: {}", config.guesses_per_game);
    println!("   Rows shown:       {}", tally.rows);
    println!("   Wins:             {}", tally.wins);
    println!("   Delayed fixes:    {}", tally.fixes);
    println!(
        "   Mean wrong tiles: {}",
        format!("{:.3}", tally.mean_shown_errors())
            .bright_yellow()
            .bold()
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());

    print_distribution("Wrong tiles when shown:", &tally.shown, tally.rows);
    print_distribution("Wrong tiles at the end:", &tally.settled, tally.rows);
}

fn print_distribution(title: &str, buckets: &[usize], total: usize) {
    println!("\n📈 {}", title.bright_cyan().bold());
    for (wrong, &count) in buckets.iter().enumerate() {
        let pct = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        };
        let label = if wrong + 1 == buckets.len() {
            format!("{wrong}+")
        } else {
            format!("{wrong} ")
        };
        println!(
            "   {label}: {} {count:6} ({pct:5.1}%)",
            percent_bar(pct.round() as u8, 40).green()
        );
    }
}
