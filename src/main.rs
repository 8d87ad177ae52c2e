//! Glitchdle - CLI
//!
//! Wordle-style game with glitching feedback, in a TUI or a plain line mode.

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use glitchdle::{
    commands::{SimulationConfig, dice_odds_table, run_simple, run_simulation},
    game::{GameConfig, GameMode, Session},
    logging::{self, LogTarget},
    output::{print_odds_table, print_simulation_result},
    wordlists::{ALLOWED, ANSWERS, WordList, loader::words_from_slice},
};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "glitchdle",
    about = "Wordle-style word game whose feedback deliberately glitches",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Mode: classic (default), timed, single, dice
    #[arg(short, long, global = true, default_value = "classic")]
    mode: String,

    /// Hard mode (single: no detectors, dice: no tile odds)
    #[arg(long, global = true)]
    hard: bool,

    /// Wordlist: 'embedded' (default) or path to an answer file
    #[arg(short = 'w', long, global = true, default_value = "embedded")]
    wordlist: String,

    /// Fixed target word for the first game
    #[arg(short, long, global = true)]
    target: Option<String>,

    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Write logs to a file; the TUI logs nowhere else
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (line input, no TUI)
    Simple,

    /// Print the Dice Roll odds for every dice outcome
    Odds,

    /// Monte-Carlo simulation of a glitch strategy
    Simulate {
        /// Number of games to simulate
        #[arg(short = 'n', long, default_value = "1000")]
        games: usize,

        /// Random guesses per game
        #[arg(short = 'g', long, default_value = "6")]
        guesses: usize,

        /// Base seed; every game derives its own from it
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

/// Load word lists based on the -w flag
///
/// - "embedded": compiled-in answer pool and acceptance list
/// - "<path>": answers from the file; the embedded lists stay accepted
fn load_word_list(wordlist: &str) -> Result<WordList> {
    use glitchdle::wordlists::loader::load_from_file;

    if wordlist == "embedded" {
        return Ok(WordList::embedded());
    }

    let answers = load_from_file(wordlist)
        .with_context(|| format!("failed to read word list '{wordlist}'"))?;
    let extra = words_from_slice(ANSWERS)
        .into_iter()
        .chain(words_from_slice(ALLOWED));

    WordList::new(answers, extra).with_context(|| format!("unusable word list '{wordlist}'"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    let log_target = match (&cli.log_file, &command) {
        (Some(path), _) => LogTarget::File(path.as_path()),
        (None, Commands::Play) => LogTarget::Off,
        (None, _) => LogTarget::Stderr,
    };
    logging::init(cli.verbose, log_target).context("failed to open log file")?;

    let mode = GameMode::from_name(&cli.mode).ok_or_else(|| {
        anyhow!(
            "unknown mode '{}' (expected classic, timed, single or dice)",
            cli.mode
        )
    })?;
    let config = GameConfig::new(mode, cli.hard);
    let words = load_word_list(&cli.wordlist)?;

    match command {
        Commands::Play => run_play_command(&words, config, cli.target.as_deref()),
        Commands::Simple => run_simple_command(&words, config, cli.target.as_deref()),
        Commands::Odds => {
            print_odds_table(&dice_odds_table());
            Ok(())
        }
        Commands::Simulate {
            games,
            guesses,
            seed,
        } => run_simulate_command(&words, config, games, guesses, seed),
    }
}

fn run_play_command(words: &WordList, config: GameConfig, target: Option<&str>) -> Result<()> {
    use glitchdle::interactive::{App, run_tui};

    let mut app = App::new(words, config);
    if let Some(target) = target {
        app.session
            .reset_with_target(target)
            .with_context(|| format!("invalid target '{target}'"))?;
    }
    run_tui(app)
}

fn run_simple_command(words: &WordList, config: GameConfig, target: Option<&str>) -> Result<()> {
    let mut session = Session::new(config, words);
    if let Some(target) = target {
        session
            .reset_with_target(target)
            .with_context(|| format!("invalid target '{target}'"))?;
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_simple(&mut session, stdin.lock(), &mut stdout)?;
    Ok(())
}

fn run_simulate_command(
    words: &WordList,
    config: GameConfig,
    games: usize,
    guesses: usize,
    seed: u64,
) -> Result<()> {
    let kind = config
        .mode
        .glitch_kind()
        .ok_or_else(|| anyhow!("simulate needs a glitch mode (--mode timed, single or dice)"))?;

    println!(
        "Simulating {games} games of {} ({guesses} guesses each)...",
        kind.display_name()
    );

    let result = run_simulation(
        words,
        SimulationConfig {
            kind,
            hard_mode: config.hard_mode,
            games,
            guesses_per_game: guesses,
            seed,
        },
    );
    print_simulation_result(&result);
    Ok(())
}
