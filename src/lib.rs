//! NFL game result analysis
//!
//! Ranks teams by their record against common opponents and builds
//! win/loss history features for an external classifier.

pub mod data;
pub mod features;
pub mod rankings;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A team identifier as it appears in the feed.
///
/// Opaque and case-sensitive: two games refer to the same team iff the
/// strings are byte-identical. No canonicalization is attempted, so a
/// renamed or inconsistently spelled franchise splits into two histories.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamName(String);

impl TeamName {
    pub fn new(name: impl Into<String>) -> Self {
        TeamName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeamName {
    fn from(s: &str) -> Self {
        TeamName(s.to_string())
    }
}

/// A completed game from the result feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub date: NaiveDate,
    pub week: String,
    pub winner: TeamName,
    pub loser: TeamName,
    pub winner_pts: u32,
    pub loser_pts: u32,
}

impl Game {
    /// Check if the given team played in this game
    pub fn involves(&self, team: &TeamName) -> bool {
        self.winner == *team || self.loser == *team
    }

    /// Get the opponent for a given team
    pub fn opponent_of(&self, team: &TeamName) -> Option<&TeamName> {
        if self.winner == *team {
            Some(&self.loser)
        } else if self.loser == *team {
            Some(&self.winner)
        } else {
            None
        }
    }

    /// Check if the given team won this game
    pub fn won_by(&self, team: &TeamName) -> Option<bool> {
        if self.winner == *team {
            Some(true)
        } else if self.loser == *team {
            Some(false)
        } else {
            None
        }
    }

    /// Winning margin in points
    pub fn margin(&self) -> u32 {
        self.winner_pts - self.loser_pts
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum NflError {
    #[error("Game feed unavailable at {path}: {message}")]
    DataUnavailable { path: String, message: String },

    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("Cannot compare {0} with itself")]
    SelfComparison(String),

    #[error("Insufficient history for {team}: has {games} games, need {required}")]
    InsufficientHistory {
        team: String,
        games: usize,
        required: usize,
    },

    #[error("No training samples could be built with lookback {0}; every game lacked history")]
    NoSamples(usize),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, NflError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub features: FeatureConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub games_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureConfig {
    pub lookback: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig {
                games_path: "nfl_data/nfl_2023_games.csv".to_string(),
            },
            features: FeatureConfig { lookback: 5 },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NflError::Config(format!("Failed to read config file {}: {}", path, e)))?;
        toml::from_str(&content)
            .map_err(|e| NflError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| NflError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(winner: &str, loser: &str) -> Game {
        Game {
            date: NaiveDate::from_ymd_opt(2023, 9, 10).unwrap(),
            week: "1".to_string(),
            winner: TeamName::from(winner),
            loser: TeamName::from(loser),
            winner_pts: 24,
            loser_pts: 17,
        }
    }

    #[test]
    fn test_game_perspective() {
        let g = game("New York Giants", "Dallas Cowboys");
        let giants = TeamName::from("New York Giants");
        let cowboys = TeamName::from("Dallas Cowboys");
        let eagles = TeamName::from("Philadelphia Eagles");

        assert!(g.involves(&giants));
        assert!(g.involves(&cowboys));
        assert!(!g.involves(&eagles));

        assert_eq!(g.won_by(&giants), Some(true));
        assert_eq!(g.won_by(&cowboys), Some(false));
        assert_eq!(g.won_by(&eagles), None);

        assert_eq!(g.opponent_of(&giants), Some(&cowboys));
        assert_eq!(g.opponent_of(&eagles), None);
        assert_eq!(g.margin(), 7);
    }

    #[test]
    fn test_team_name_is_case_sensitive() {
        assert_ne!(TeamName::from("Giants"), TeamName::from("giants"));
    }
}
