use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Rejected configuration input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
    UnknownDifficulty(String),
    #[error("unknown AI level `{0}` (expected easy, medium or hard)")]
    UnknownAiLevel(String),
    #[error("unknown map size `{0}` (expected small, medium or large)")]
    UnknownMapSize(String),
}

/// Game speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Time between two ticks of the game loop
    pub fn tick_interval(&self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(150),
            Difficulty::Medium => Duration::from_millis(100),
            Difficulty::Hard => Duration::from_millis(70),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// How often the AI snake abandons its heuristic for a random turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiLevel {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl AiLevel {
    /// Probability of an exploration move on a given tick
    pub fn random_factor(&self) -> f64 {
        match self {
            AiLevel::Easy => 0.40,
            AiLevel::Medium => 0.20,
            AiLevel::Hard => 0.05,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            AiLevel::Easy => AiLevel::Medium,
            AiLevel::Medium => AiLevel::Hard,
            AiLevel::Hard => AiLevel::Easy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AiLevel::Easy => "easy",
            AiLevel::Medium => "medium",
            AiLevel::Hard => "hard",
        }
    }
}

/// Grid size preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl MapSize {
    /// Grid dimensions in cells as (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            MapSize::Small => (20, 15),
            MapSize::Medium => (30, 20),
            MapSize::Large => (40, 25),
        }
    }

    pub fn next(&self) -> Self {
        match self {
            MapSize::Small => MapSize::Medium,
            MapSize::Medium => MapSize::Large,
            MapSize::Large => MapSize::Small,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MapSize::Small => "small",
            MapSize::Medium => "medium",
            MapSize::Large => "large",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ConfigError::UnknownDifficulty(other.to_string())),
        }
    }
}

impl FromStr for AiLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(AiLevel::Easy),
            "medium" => Ok(AiLevel::Medium),
            "hard" => Ok(AiLevel::Hard),
            other => Err(ConfigError::UnknownAiLevel(other.to_string())),
        }
    }
}

impl FromStr for MapSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(MapSize::Small),
            "medium" => Ok(MapSize::Medium),
            "large" => Ok(MapSize::Large),
            other => Err(ConfigError::UnknownMapSize(other.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MapSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-game settings, fixed from start (or restart) until the next restart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Tick interval
    #[serde(default)]
    pub difficulty: Difficulty,
    /// AI exploration rate
    #[serde(default)]
    pub ai_level: AiLevel,
    /// Grid dimensions
    #[serde(default)]
    pub map_size: MapSize,
}

impl GameConfig {
    pub fn new(difficulty: Difficulty, ai_level: AiLevel, map_size: MapSize) -> Self {
        Self {
            difficulty,
            ai_level,
            map_size,
        }
    }

    /// Build a configuration from raw string keys, rejecting anything unknown
    pub fn from_keys(difficulty: &str, ai_level: &str, map_size: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            difficulty: difficulty.parse()?,
            ai_level: ai_level.parse()?,
            map_size: map_size.parse()?,
        })
    }

    pub fn tick_interval(&self) -> Duration {
        self.difficulty.tick_interval()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.ai_level, AiLevel::Medium);
        assert_eq!(config.map_size, MapSize::Medium);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_presets() {
        assert_eq!(MapSize::Small.dimensions(), (20, 15));
        assert_eq!(MapSize::Medium.dimensions(), (30, 20));
        assert_eq!(MapSize::Large.dimensions(), (40, 25));

        assert_eq!(Difficulty::Easy.tick_interval(), Duration::from_millis(150));
        assert_eq!(Difficulty::Hard.tick_interval(), Duration::from_millis(70));

        assert_eq!(AiLevel::Easy.random_factor(), 0.40);
        assert_eq!(AiLevel::Medium.random_factor(), 0.20);
        assert_eq!(AiLevel::Hard.random_factor(), 0.05);
    }

    #[test]
    fn test_from_keys() {
        let config = GameConfig::from_keys("hard", "easy", "large").unwrap();
        assert_eq!(
            config,
            GameConfig::new(Difficulty::Hard, AiLevel::Easy, MapSize::Large)
        );
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert_eq!(
            GameConfig::from_keys("insane", "easy", "small"),
            Err(ConfigError::UnknownDifficulty("insane".to_string()))
        );
        assert_eq!(
            GameConfig::from_keys("easy", "genius", "small"),
            Err(ConfigError::UnknownAiLevel("genius".to_string()))
        );
        assert_eq!(
            GameConfig::from_keys("easy", "easy", "huge"),
            Err(ConfigError::UnknownMapSize("huge".to_string()))
        );
    }

    #[test]
    fn test_json_round_trip_uses_lowercase_keys() {
        let json = r#"{"difficulty":"hard","ai_level":"easy","map_size":"small"}"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config,
            GameConfig::new(Difficulty::Hard, AiLevel::Easy, MapSize::Small)
        );

        let partial: GameConfig = serde_json::from_str(r#"{"map_size":"large"}"#).unwrap();
        assert_eq!(partial.map_size, MapSize::Large);
        assert_eq!(partial.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_json_rejects_unknown_values() {
        assert!(serde_json::from_str::<GameConfig>(r#"{"difficulty":"insane"}"#).is_err());
        assert!(serde_json::from_str::<GameConfig>(r#"{"speed":"fast"}"#).is_err());
    }

    #[test]
    fn test_cycling() {
        assert_eq!(AiLevel::Hard.next(), AiLevel::Easy);
        assert_eq!(MapSize::Small.next(), MapSize::Medium);
        assert_eq!(MapSize::Large.next(), MapSize::Small);
    }
}
