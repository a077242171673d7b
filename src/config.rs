//! INI-style configuration for run-time filtering.
//!
//! ```text
//! # relaylog.conf
//! [Logging]
//! level = info
//!
//! [Targets]
//! app::net = trace
//! app::db  = off
//! ```

use std::{collections::HashMap, fs, path::Path};

use crate::{
    config_error::{ConfigError, Result},
    log::log_level::LevelFilter,
};

/// Section holding the default run-time level under `level`.
pub const LOGGING_SECTION: &str = "Logging";
/// Section mapping target prefixes to levels.
pub const TARGETS_SECTION: &str = "Targets";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut current_section: Option<String> = None;

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current_section = Some(name.trim().to_string());
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Syntax {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            let key = key.trim().to_string();
            let value = value.trim().trim_matches('"').to_string();

            match &current_section {
                None => {
                    config.globals.insert(key, value);
                }
                Some(sec) => {
                    config
                        .sections
                        .entry(sec.clone())
                        .or_default()
                        .insert(key, value);
                }
            }
        }
        Ok(config)
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn get_global(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(|s| s.as_str())
    }

    /// Entries of `section`, or nothing when it is absent.
    pub fn section(&self, section: &str) -> impl Iterator<Item = (&str, &str)> {
        self.sections
            .get(section)
            .into_iter()
            .flat_map(|sec| sec.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Default run-time level: `[Logging] level`, else a global `level`.
    pub fn default_level(&self) -> Result<Option<LevelFilter>> {
        self.get_non_empty(LOGGING_SECTION, "level")
            .or_else(|| self.get_global("level").filter(|s| !s.is_empty()))
            .map(|value| parse_level_setting("level", value))
            .transpose()
    }

    /// Per-target levels from `[Targets]`.
    pub fn target_levels(&self) -> Result<Vec<(String, LevelFilter)>> {
        self.section(TARGETS_SECTION)
            .map(|(target, value)| -> Result<(String, LevelFilter)> {
                Ok((target.to_string(), parse_level_setting(target, value)?))
            })
            .collect()
    }
}

/// Parses a level name or `off`, tagging failures with the offending key.
pub fn parse_level_setting(key: &str, value: &str) -> Result<LevelFilter> {
    value.parse().map_err(|source| ConfigError::Level {
        key: key.to_string(),
        source,
    })
}
