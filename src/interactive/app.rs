//! TUI application state and logic

use crate::core::WORD_LENGTH;
use crate::game::{GameConfig, GameMode, Phase, Session};
use crate::glitch::{DiceRoll, Glitch, GlitchKind, ProbeOutcome};
use crate::wordlists::WordList;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};

/// How long a rejection or notice stays on screen
pub const MESSAGE_DURATION: Duration = Duration::from_secs(2);

/// How long a detector result stays on screen
pub const PROBE_MESSAGE_DURATION: Duration = Duration::from_secs(3);

/// How long a revealed tile stays highlighted
pub const REVEAL_DURATION: Duration = Duration::from_secs(2);

/// How long the dice animate after a roll
pub const DICE_ROLL_DURATION: Duration = Duration::from_secs(1);

/// Event poll interval; transient timers are checked this often
const TICK: Duration = Duration::from_millis(100);

/// Application state
pub struct App<'a> {
    words: &'a WordList,
    pub session: Session<'a>,
    pub glitch_enabled: bool,
    pub glitch_kind: GlitchKind,
    pub hard_mode: bool,
    pub input_mode: InputMode,
    pub cursor: TileCursor,
    pub message: Option<Message>,
    pub reveal: Option<Reveal>,
    pub dice_rolling_until: Option<Instant>,
    pub stats: Statistics,
    pub should_quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Typing,
    /// Selecting a completed tile to probe or inspect
    Detector,
}

/// Selected tile in detector mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileCursor {
    pub row: usize,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
    /// `None` keeps the message until the next one or a reset
    pub expires: Option<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Warning,
    Error,
}

/// Tile highlighted after a detector revealed its true status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    pub row: usize,
    pub position: usize,
    pub expires: Instant,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
}

impl<'a> App<'a> {
    #[must_use]
    pub fn new(words: &'a WordList, config: GameConfig) -> Self {
        let (glitch_enabled, glitch_kind) = match config.mode {
            GameMode::Classic => (false, GlitchKind::TimedCorrect),
            GameMode::Glitch(kind) => (true, kind),
        };

        Self {
            words,
            session: Session::new(config, words),
            glitch_enabled,
            glitch_kind,
            hard_mode: config.hard_mode,
            input_mode: InputMode::Typing,
            cursor: TileCursor::default(),
            message: None,
            reveal: None,
            dice_rolling_until: None,
            stats: Statistics::default(),
            should_quit: false,
        }
    }

    /// Config implied by the current mode toggles
    #[must_use]
    pub fn config(&self) -> GameConfig {
        let mode = if self.glitch_enabled {
            GameMode::Glitch(self.glitch_kind)
        } else {
            GameMode::Classic
        };
        GameConfig::new(mode, self.hard_mode)
    }

    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('n') if ctrl => self.new_game(),
            KeyCode::F(1) => self.toggle_glitch(),
            KeyCode::F(2) => self.cycle_strategy(),
            KeyCode::F(3) => self.toggle_hard_mode(now),
            _ => match self.input_mode {
                InputMode::Typing => self.handle_typing(key.code, now),
                InputMode::Detector => self.handle_detector(key.code, now),
            },
        }
    }

    fn handle_typing(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c) => {
                self.session.push_letter(c);
            }
            KeyCode::Backspace => {
                self.session.pop_letter();
            }
            KeyCode::Enter => self.submit(now),
            KeyCode::Tab => self.enter_detector_mode(now),
            _ => {}
        }
    }

    fn handle_detector(&mut self, code: KeyCode, now: Instant) {
        let last_row = self.session.rows().len().saturating_sub(1);
        match code {
            KeyCode::Esc | KeyCode::Tab => self.input_mode = InputMode::Typing,
            KeyCode::Up => self.cursor.row = self.cursor.row.saturating_sub(1),
            KeyCode::Down => self.cursor.row = (self.cursor.row + 1).min(last_row),
            KeyCode::Left => self.cursor.position = self.cursor.position.saturating_sub(1),
            KeyCode::Right => {
                self.cursor.position = (self.cursor.position + 1).min(WORD_LENGTH - 1);
            }
            KeyCode::Enter => self.probe_selected(now),
            _ => {}
        }
    }

    fn enter_detector_mode(&mut self, now: Instant) {
        let has_tools = self.session.detector_info().is_some()
            || self
                .session
                .glitch()
                .and_then(Glitch::as_dice_roll)
                .is_some_and(|d| !d.hard_mode());

        if !has_tools {
            self.show_message("No detectors in this mode!", MessageStyle::Error, now);
            return;
        }
        if self.session.rows().is_empty() {
            self.show_message(
                "Only completed tiles can be checked!",
                MessageStyle::Error,
                now,
            );
            return;
        }

        self.cursor.row = self.session.rows().len() - 1;
        self.input_mode = InputMode::Detector;
    }

    /// Submit the typed guess
    pub fn submit(&mut self, now: Instant) {
        match self.session.submit() {
            Ok(submission) => {
                if let Some(fix) = submission.fix {
                    self.show_message(
                        &format!(
                            "⏱ Row {} tile {} corrected to {}",
                            fix.row + 1,
                            fix.position + 1,
                            fix.original
                        ),
                        MessageStyle::Warning,
                        now,
                    );
                }
                let rolled = self
                    .session
                    .glitch()
                    .and_then(Glitch::as_dice_roll)
                    .and_then(DiceRoll::last_turn)
                    .is_some_and(|turn| turn.row == submission.row);
                if rolled {
                    self.dice_rolling_until = Some(now + DICE_ROLL_DURATION);
                }
                if submission.phase != Phase::AwaitingInput {
                    self.finish_game(submission.phase);
                }
            }
            Err(err) => self.show_message(&err.to_string(), MessageStyle::Error, now),
        }
    }

    fn finish_game(&mut self, phase: Phase) {
        self.stats.total_games += 1;
        let style = if phase == Phase::Won {
            self.stats.games_won += 1;
            MessageStyle::Success
        } else {
            MessageStyle::Error
        };

        self.input_mode = InputMode::Typing;
        if let Some(text) = self.session.end_message() {
            self.message = Some(Message {
                text: format!("{text} | Ctrl-N for a new game"),
                style,
                expires: None,
            });
        }
    }

    /// Probe the tile under the cursor
    pub fn probe_selected(&mut self, now: Instant) {
        let TileCursor { row, position } = self.cursor;

        if self.session.detector_info().is_none() {
            let text = match self.session.status_odds(row, position) {
                Some(odds) => format!(
                    "🎲 Row {} tile {}: green {}%, yellow {}%, gray {}%",
                    row + 1,
                    position + 1,
                    odds.green,
                    odds.yellow,
                    odds.gray
                ),
                None => "No odds available for that tile".to_string(),
            };
            self.show_message(&text, MessageStyle::Info, now);
            return;
        }

        match self.session.probe_tile(row, position) {
            Ok(outcome) => {
                let style = match outcome {
                    ProbeOutcome::GlitchDetected { .. } => {
                        self.reveal = Some(Reveal {
                            row,
                            position,
                            expires: now + REVEAL_DURATION,
                        });
                        MessageStyle::Warning
                    }
                    ProbeOutcome::Correct { .. } => MessageStyle::Success,
                };
                self.show_message_for(&outcome.to_string(), style, now, PROBE_MESSAGE_DURATION);
            }
            Err(rejection) => self.show_message(&rejection.to_string(), MessageStyle::Error, now),
        }
    }

    /// Start a new game in the current mode
    pub fn new_game(&mut self) {
        self.session.reset();
        self.clear_transients();
        log::info!("new game: {}", self.session.config().title());
    }

    /// Switch between Classic and the selected glitch strategy
    pub fn toggle_glitch(&mut self) {
        self.glitch_enabled = !self.glitch_enabled;
        self.hard_mode = false;
        self.restart_session();
    }

    /// Move to the next glitch strategy
    pub fn cycle_strategy(&mut self) {
        if self.glitch_enabled {
            self.glitch_kind = self.glitch_kind.next();
        }
        self.glitch_enabled = true;
        self.hard_mode = false;
        self.restart_session();
    }

    /// Toggle hard mode where the strategy has one
    pub fn toggle_hard_mode(&mut self, now: Instant) {
        if !(self.glitch_enabled && self.glitch_kind.supports_hard_mode()) {
            self.show_message(
                "Hard mode is not available in this mode",
                MessageStyle::Error,
                now,
            );
            return;
        }
        self.hard_mode = !self.hard_mode;
        self.restart_session();
    }

    fn restart_session(&mut self) {
        let config = self.config();
        self.session = Session::new(config, self.words);
        self.clear_transients();
        log::info!("switched to {}", config.title());
    }

    fn clear_transients(&mut self) {
        self.input_mode = InputMode::Typing;
        self.cursor = TileCursor::default();
        self.message = None;
        self.reveal = None;
        self.dice_rolling_until = None;
    }

    pub fn show_message(&mut self, text: &str, style: MessageStyle, now: Instant) {
        self.show_message_for(text, style, now, MESSAGE_DURATION);
    }

    fn show_message_for(&mut self, text: &str, style: MessageStyle, now: Instant, ttl: Duration) {
        self.message = Some(Message {
            text: text.to_string(),
            style,
            expires: Some(now + ttl),
        });
    }

    /// Drop transient visuals whose time is up
    pub fn tick(&mut self, now: Instant) {
        if self
            .message
            .as_ref()
            .and_then(|m| m.expires)
            .is_some_and(|t| now >= t)
        {
            self.message = None;
        }
        if self.reveal.is_some_and(|r| now >= r.expires) {
            self.reveal = None;
        }
        if self.dice_rolling_until.is_some_and(|t| now >= t) {
            self.dice_rolling_until = None;
        }
    }

    #[must_use]
    pub fn dice_rolling(&self) -> bool {
        self.dice_rolling_until.is_some()
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
        {
            app.handle_key(key, Instant::now());
        }
        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
