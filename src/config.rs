use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Strength tier for the computer player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Level number as shown in the UI (1-3).
    pub fn level(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Normal => 2,
            Self::Hard => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnknownDifficulty(trimmed.to_string()))
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = ConfigError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|d| d.level() == level)
            .ok_or(ConfigError::LevelOutOfRange(level))
    }
}

/// Computer player settings. Missing fields fall back to [`AiConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// Seed for the easy tier's random choices; `None` draws from system entropy.
    pub seed: Option<u64>,
}

impl AiConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_names_case_insensitively() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" Hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("NORMAL".parse::<Difficulty>(), Ok(Difficulty::Normal));
        assert_eq!(
            "expert".parse::<Difficulty>(),
            Err(ConfigError::UnknownDifficulty("expert".to_string()))
        );
    }

    #[test]
    fn difficulty_levels_match_ui_numbering() {
        assert_eq!(Difficulty::try_from(1), Ok(Difficulty::Easy));
        assert_eq!(Difficulty::try_from(2), Ok(Difficulty::Normal));
        assert_eq!(Difficulty::try_from(3), Ok(Difficulty::Hard));
        assert_eq!(Difficulty::try_from(0), Err(ConfigError::LevelOutOfRange(0)));
        assert_eq!(Difficulty::try_from(4), Err(ConfigError::LevelOutOfRange(4)));

        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::try_from(difficulty.level()), Ok(difficulty));
        }
    }

    #[test]
    fn default_config_is_normal_and_unseeded() {
        let config = AiConfig::default();

        assert_eq!(config.difficulty, Difficulty::Normal);
        assert_eq!(config.seed, None);
        assert_eq!(AiConfig::new(Difficulty::Hard).with_seed(7).seed, Some(7));
    }
}
