//! Config file loading and creation.
//!
//! Config lives in `ratings.toml` next to the logs by default. Every field is
//! optional; CLI flags override config values.

use ratings::{
    ActivityWindow, EloSettings, RatingError, DEFAULT_LOGISTIC_BASE,
    DEFAULT_LOGISTIC_DENOMINATOR, DEFAULT_RATING_PER_POINT, DEFAULT_START_RATING,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "ratings.toml";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_OUTPUT_ROOT: &str = ".";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config file already exists at {}", .0.display())]
    Exists(PathBuf),

    #[error(transparent)]
    Invalid(#[from] RatingError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub elo: EloConfig,
    pub activity: ActivityConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EloConfig {
    pub start_rating: Option<f64>,
    pub rating_per_point: Option<f64>,
    pub logistic_base: Option<f64>,
    pub logistic_denominator: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActivityConfig {
    pub window_days: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory holding tournament files
    pub logs: Option<PathBuf>,
    /// Reports go to `<root>/ratings/<system>/`
    pub root: Option<PathBuf>,
}

impl Config {
    /// Elo settings with `rating_per_point` taken from the CLI when given
    pub fn elo_settings(&self, rating_per_point: Option<f64>) -> Result<EloSettings, ConfigError> {
        let elo = &self.elo;
        let settings = EloSettings::new(
            elo.start_rating.unwrap_or(DEFAULT_START_RATING),
            rating_per_point
                .or(elo.rating_per_point)
                .unwrap_or(DEFAULT_RATING_PER_POINT),
            elo.logistic_base.unwrap_or(DEFAULT_LOGISTIC_BASE),
            elo.logistic_denominator
                .unwrap_or(DEFAULT_LOGISTIC_DENOMINATOR),
        )?;
        Ok(settings)
    }

    pub fn activity_window(&self, window_days: Option<i64>) -> Result<ActivityWindow, ConfigError> {
        let days = window_days
            .or(self.activity.window_days)
            .unwrap_or(ActivityWindow::DEFAULT_DAYS);
        Ok(ActivityWindow::days(days)?)
    }

    pub fn log_dir(&self, logs: Option<PathBuf>) -> PathBuf {
        logs.or_else(|| self.output.logs.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
    }

    pub fn output_root(&self, root: Option<PathBuf>) -> PathBuf {
        root.or_else(|| self.output.root.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_ROOT))
    }
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# ratings configuration
# All values here can be overridden by CLI flags.

[elo]
# Rating every new player starts from
# start_rating = 1000.0

# Rating moved per point played in a match
# rating_per_point = 16.0

# Logistic curve: expected = 1 / (1 + base ^ ((opponent - own) / denominator))
# logistic_base = 10.0
# logistic_denominator = 400.0

[activity]
# A player is active if they played within this many days of the latest
# tournament of one of their tags
# window_days = 183

[output]
# Directory with one JSON file per tournament
# logs = \"logs\"

# Reports are written to <root>/ratings/elo/
# root = \".\"
";

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::Exists(path.to_path_buf()));
    }

    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(io_err)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
