use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::slots::CAPACITY;

/// Tunable rules of the game, loadable from TOML.
///
/// Every field has a default, so a partial file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seconds on the clock at the start of every level.
    pub max_time_secs: u32,
    /// Points per second left on the clock when a level is cracked.
    pub time_bonus_multiplier: u32,
    pub scoring: Scoring,
    pub pattern: PatternConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_time_secs: 60,
            time_bonus_multiplier: 2,
            scoring: Scoring::default(),
            pattern: PatternConfig::default(),
        }
    }
}

/// Points awarded per successful operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoring {
    pub insert: u32,
    pub quick_insert: u32,
    pub delete: u32,
    pub search_found: u32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            insert: 10,
            quick_insert: 5,
            delete: 5,
            search_found: 20,
        }
    }
}

/// Secret length is `base_len + level`, capped at `max_len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub base_len: usize,
    pub max_len: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            base_len: 2,
            max_len: 4,
        }
    }
}

impl GameConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.max_time_secs == 0 {
            return Err(Error::Validation("max_time_secs must be > 0".into()));
        }
        if self.pattern.base_len > self.pattern.max_len {
            return Err(Error::Validation(
                "pattern.base_len must not exceed pattern.max_len".into(),
            ));
        }
        if self.pattern.max_len == 0 || self.pattern.max_len > CAPACITY {
            return Err(Error::Validation(format!(
                "pattern.max_len must be in [1, {CAPACITY}]"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            max_time_secs = 90

            [scoring]
            insert = 12
            "#,
        )
        .unwrap();
        assert_eq!(config.max_time_secs, 90);
        assert_eq!(config.time_bonus_multiplier, 2);
        assert_eq!(config.scoring.insert, 12);
        assert_eq!(config.scoring.search_found, 20);
        assert_eq!(config.pattern, PatternConfig::default());
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
    }

    #[rstest]
    #[case("max_time_secs = 0")]
    #[case("[pattern]\nmax_len = 11")]
    #[case("[pattern]\nmax_len = 0\nbase_len = 0")]
    #[case("[pattern]\nbase_len = 5")]
    fn rejects_invalid(#[case] content: &str) {
        assert!(matches!(
            GameConfig::from_toml_str(content),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn rejects_malformed() {
        assert!(matches!(
            GameConfig::from_toml_str("max_time_secs = \"soon\""),
            Err(Error::TomlParse(_))
        ));
    }

    #[test]
    fn missing_file() {
        let path = Path::new("/definitely/not/here/code-breaker.toml");
        assert!(matches!(
            GameConfig::load(path),
            Err(Error::FileRead { .. })
        ));
    }
}
