//! Game mode and per-session configuration

use crate::glitch::GlitchKind;

/// Guess limit for classic play
pub const CLASSIC_MAX_GUESSES: usize = 6;

/// Guess limit for every glitch strategy
pub const GLITCH_MAX_GUESSES: usize = 20;

/// Which game a session plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Honest feedback
    Classic,
    /// Feedback passes through a glitch strategy
    Glitch(GlitchKind),
}

impl GameMode {
    /// Create a mode from its name
    ///
    /// Supported names: "classic", "timed", "single", "dice".
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Self::Classic),
            other => GlitchKind::from_name(other).map(Self::Glitch),
        }
    }

    #[must_use]
    pub const fn max_guesses(self) -> usize {
        match self {
            Self::Classic => CLASSIC_MAX_GUESSES,
            Self::Glitch(_) => GLITCH_MAX_GUESSES,
        }
    }

    #[must_use]
    pub const fn glitch_kind(self) -> Option<GlitchKind> {
        match self {
            Self::Classic => None,
            Self::Glitch(kind) => Some(kind),
        }
    }
}

/// Settings fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub mode: GameMode,
    pub hard_mode: bool,
    pub max_guesses: usize,
}

impl GameConfig {
    /// Build the config for a mode
    ///
    /// Hard mode only exists for the Single False and Dice Roll strategies and
    /// is switched off for anything else.
    #[must_use]
    pub fn new(mode: GameMode, hard_mode: bool) -> Self {
        let supported = mode.glitch_kind().is_some_and(GlitchKind::supports_hard_mode);
        if hard_mode && !supported {
            log::warn!("hard mode is not available for {mode:?}; ignoring");
        }

        Self {
            mode,
            hard_mode: hard_mode && supported,
            max_guesses: mode.max_guesses(),
        }
    }

    /// Window title for the mode, e.g. "Glitchdle - Dice Roll (Hard)"
    #[must_use]
    pub fn title(&self) -> String {
        match self.mode {
            GameMode::Classic => "Classic".to_string(),
            GameMode::Glitch(kind) if self.hard_mode => {
                format!("Glitchdle - {} (Hard)", kind.display_name())
            }
            GameMode::Glitch(kind) => format!("Glitchdle - {}", kind.display_name()),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(GameMode::Classic, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_limits_per_mode() {
        assert_eq!(GameConfig::new(GameMode::Classic, false).max_guesses, 6);
        for kind in GlitchKind::ALL {
            assert_eq!(GameConfig::new(GameMode::Glitch(kind), false).max_guesses, 20);
        }
    }

    #[test]
    fn hard_mode_only_where_supported() {
        assert!(!GameConfig::new(GameMode::Classic, true).hard_mode);
        assert!(!GameConfig::new(GameMode::Glitch(GlitchKind::TimedCorrect), true).hard_mode);
        assert!(GameConfig::new(GameMode::Glitch(GlitchKind::SingleFalse), true).hard_mode);
        assert!(GameConfig::new(GameMode::Glitch(GlitchKind::DiceRoll), true).hard_mode);
    }

    #[test]
    fn mode_from_name() {
        assert_eq!(GameMode::from_name("classic"), Some(GameMode::Classic));
        assert_eq!(
            GameMode::from_name("dice"),
            Some(GameMode::Glitch(GlitchKind::DiceRoll))
        );
        assert_eq!(GameMode::from_name("nope"), None);
    }

    #[test]
    fn titles() {
        let config = GameConfig::new(GameMode::Glitch(GlitchKind::SingleFalse), true);
        assert_eq!(config.title(), "Glitchdle - Single False (Hard)");

        let config = GameConfig::new(GameMode::Glitch(GlitchKind::TimedCorrect), false);
        assert_eq!(config.title(), "Glitchdle - Timed Correct");
    }
}
