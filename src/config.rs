//! `mp3dur.toml` settings for the command-line tool

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "mp3dur.toml";
pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const ENV_LOG_LEVEL: &str = "MP3DUR_LOG";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("extensions must not be empty")]
    EmptyExtensions,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tracing filter used when neither the flag nor the env var is set
    pub log_level: String,
    /// File extensions picked up when walking a directory
    pub extensions: Vec<String>,
    pub recursive: bool,
    /// Report written after every scan, unless overridden
    pub report: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
            extensions: vec!["mp3".to_owned()],
            recursive: true,
            report: None,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "loading config");
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// The file `discover` would read: `explicit` if given, else
    /// `mp3dur.toml` in `dir` when it exists.
    pub fn locate(explicit: Option<&Path>, dir: &Path) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        let implicit = dir.join(DEFAULT_CONFIG_FILE);
        implicit.is_file().then_some(implicit)
    }

    /// Load the located file, else defaults. Only an explicit path that's
    /// missing is an error.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        match Self::locate(explicit, dir) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(ConfigError::EmptyExtensions);
        }
        Ok(())
    }

    /// Extension filter for directory walks, case-insensitive, dot optional.
    pub fn matches_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.'))
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}
