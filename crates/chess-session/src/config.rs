//! Session configuration loading.
//!
//! A session is configured from a small TOML file:
//!
//! ```toml
//! game_type = "shuffled"
//! top_first = false
//! seed = 42
//! ```
//!
//! Every field is optional. A `placement` string may be given instead of a
//! generated layout, mostly for fixtures.

use chess_core::LayoutError;
use chess_rules::{Board, GameType};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading configuration or building the board
/// it describes.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// The file is not valid TOML or has fields of the wrong type.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The configured placement text is malformed.
    #[error("Invalid placement: {0}")]
    LayoutError(#[from] LayoutError),
}

/// How a session sets up its board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Standard or shuffled starting layout.
    pub game_type: GameType,
    /// Whether the Top team moves first. Defaults to false.
    pub top_first: bool,
    /// Seed for the shuffled layout; a fresh random layout when absent.
    pub seed: Option<u64>,
    /// Placement text replacing the generated layout.
    pub placement: Option<String>,
}

impl SessionConfig {
    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.as_ref().display(), ?config, "loaded session config");
        Ok(config)
    }

    /// Parses configuration text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Builds a fresh board as configured.
    pub fn build_board(&self) -> Result<Board, ConfigError> {
        if let Some(placement) = &self.placement {
            let mut board = Board::from_placement(placement, self.top_first)?;
            board.set_game_type(self.game_type);
            return Ok(board);
        }

        let board = match (self.game_type, self.seed) {
            (GameType::Standard, _) => Board::standard(self.top_first),
            (GameType::Shuffled, Some(seed)) => {
                Board::shuffled(self.top_first, &mut StdRng::seed_from_u64(seed))
            }
            (GameType::Shuffled, None) => Board::shuffled(self.top_first, &mut rand::thread_rng()),
        };
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::from_toml_str("").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.game_type, GameType::Standard);
        assert!(!config.top_first);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_parse_all_fields() {
        let config = SessionConfig::from_toml_str(
            r#"
game_type = "shuffled"
top_first = true
seed = 42
"#,
        )
        .unwrap();
        assert_eq!(config.game_type, GameType::Shuffled);
        assert!(config.top_first);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_rejects_unknown_game_type() {
        let result = SessionConfig::from_toml_str(r#"game_type = "atomic""#);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_seeded_boards_repeat() {
        let config = SessionConfig {
            game_type: GameType::Shuffled,
            seed: Some(9),
            ..SessionConfig::default()
        };
        let a = config.build_board().unwrap();
        let b = config.build_board().unwrap();
        assert_eq!(a.placement(), b.placement());
        assert_eq!(a.game_type(), GameType::Shuffled);
    }

    #[test]
    fn test_placement_overrides_layout() {
        let config = SessionConfig {
            placement: Some("4k3/8/8/8/8/8/8/4K3".to_string()),
            top_first: true,
            ..SessionConfig::default()
        };
        let board = config.build_board().unwrap();
        assert_eq!(board.pieces().len(), 2);
        assert!(board.is_top_turn());

        let broken = SessionConfig {
            placement: Some("4k3".to_string()),
            ..SessionConfig::default()
        };
        assert!(matches!(
            broken.build_board(),
            Err(ConfigError::LayoutError(_))
        ));
    }
}
