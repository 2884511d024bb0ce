//! Arena configuration, loaded from TOML.

use chrono::Duration;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Default per-move deadline.
pub const DEFAULT_MOVE_DEADLINE_MS: u64 = 5000;

/// Default number of rounds played by `arena play`.
pub const DEFAULT_ROUNDS: u32 = 3;

#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display(fmt = "failed to read {}: {}", path, source)]
    Read { path: String, source: std::io::Error },
    #[display(fmt = "failed to parse config: {}", source)]
    Parse { source: toml::de::Error },
    #[display(fmt = "invalid config: {}", reason)]
    Invalid { reason: String },
}

/// Which engine a configured contestant plays with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestantKind {
    Search,
    Random,
}

impl Default for ContestantKind {
    fn default() -> Self {
        ContestantKind::Search
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestantConfig {
    pub name: String,
    #[serde(default)]
    pub kind: ContestantKind,
}

impl ContestantConfig {
    pub fn new(name: impl Into<String>, kind: ContestantKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Name of the tournament `arena play` creates.
    pub tournament: String,
    /// How long the side to move may take before forfeiting.
    pub move_deadline_ms: u64,
    pub rounds: u32,
    /// Seeds pairing and every contestant. Unseeded runs draw from entropy.
    pub seed: Option<u64>,
    pub contestants: Vec<ContestantConfig>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            tournament: "arena".to_string(),
            move_deadline_ms: DEFAULT_MOVE_DEADLINE_MS,
            rounds: DEFAULT_ROUNDS,
            seed: None,
            contestants: vec![
                ContestantConfig::new("searcher-1", ContestantKind::Search),
                ContestantConfig::new("searcher-2", ContestantKind::Search),
                ContestantConfig::new("searcher-3", ContestantKind::Search),
                ContestantConfig::new("random-1", ContestantKind::Random),
            ],
        }
    }
}

impl ArenaConfig {
    /// Load and validate a config file. Missing fields take their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("loading config");
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
                path: path.as_ref().display().to_string(),
                source,
            })?;
        let config = Self::from_toml_str(&content)?;
        info!(
            tournament = %config.tournament,
            contestants = config.contestants.len(),
            "config loaded"
        );
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.move_deadline_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "move_deadline_ms must be positive".to_string(),
            });
        }
        if self.contestants.len() < 2 {
            return Err(ConfigError::Invalid {
                reason: "at least two contestants are needed".to_string(),
            });
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = self.contestants.iter().find(|c| !seen.insert(c.name.as_str())) {
            return Err(ConfigError::Invalid {
                reason: format!("contestant {} is listed twice", duplicate.name),
            });
        }
        Ok(())
    }

    pub fn move_deadline(&self) -> Duration {
        Duration::milliseconds(self.move_deadline_ms as i64)
    }
}
