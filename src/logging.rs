//! Logger setup
//!
//! Records go through the `log` facade; `env_logger` writes them to stderr or
//! to a file. `RUST_LOG` overrides the level chosen from `-v` flags.

use log::LevelFilter;
use std::fs::File;
use std::path::Path;

/// Where log records go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    /// Nothing is written, e.g. while the TUI owns the terminal
    Off,
}

/// Level for a `-v` count: warn, info, debug, then trace
#[must_use]
pub const fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger
///
/// Calling it again after a logger is installed is a no-op.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn init(verbosity: u8, target: LogTarget<'_>) -> std::io::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_for_verbosity(verbosity));

    match target {
        LogTarget::Stderr => {
            builder.parse_default_env();
        }
        LogTarget::File(path) => {
            builder.parse_default_env();
            builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
        }
        LogTarget::Off => {
            builder.filter_level(LevelFilter::Off);
        }
    }

    if builder.try_init().is_err() {
        log::debug!("logger already installed");
    }
    Ok(())
}
