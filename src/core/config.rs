//! Persisted settings.
//!
//! The configuration file is TOML in the platform config directory and
//! holds the API key plus the size threshold for `@file` directives. The
//! loaded value is never mutated to correct bad entries; correction happens
//! in the accessors.

use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

/// Fallback for absent, zero, or negative `max_file_size` entries.
pub const DEFAULT_MAX_FILE_SIZE: i64 = 1024;

/// Errors that can occur when loading configuration from disk.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse the configuration file as valid TOML.
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "Failed to read config at {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(
                    f,
                    "Failed to parse config at {}: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Bearer token for the completion service.
    pub api_key: Option<String>,
    /// Upper bound, in bytes, for file contents pulled in by `@` directives.
    pub max_file_size: Option<i64>,
}

impl Config {
    pub fn load_from_path(config_path: &Path) -> Result<Config, Box<dyn StdError>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
                path: config_path.to_path_buf(),
                source,
            })?;
            let config: Config =
                toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                    path: config_path.to_path_buf(),
                    source,
                })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to_path(&self, config_path: &Path) -> Result<(), Box<dyn StdError>> {
        let parent = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            fs::create_dir_all(dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new()?,
        };

        temp_file.write_all(contents.as_bytes())?;
        temp_file.as_file_mut().sync_all()?;
        temp_file
            .persist(config_path)
            .map_err(|err| -> Box<dyn StdError> { Box::new(err) })?;
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        let proj_dirs = ProjectDirs::from("org", "shellchat", "shellchat")
            .expect("Failed to determine config directory");
        proj_dirs.config_dir().join("config.toml")
    }

    /// Effective `@file` size threshold. Absent, zero, and negative stored
    /// values all fall back to [`DEFAULT_MAX_FILE_SIZE`].
    pub fn max_file_bytes(&self) -> u64 {
        match self.max_file_size {
            Some(size) if size > 0 => size as u64,
            _ => DEFAULT_MAX_FILE_SIZE as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_nonexistent_config_yields_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("nonexistent_config.toml");

        let config = Config::load_from_path(&config_path).expect("Failed to load config");

        assert_eq!(config.api_key, None);
        assert_eq!(config.max_file_size, None);
    }

    #[test]
    fn save_and_reload_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");

        let config = Config {
            api_key: Some("gsk_test".to_string()),
            max_file_size: Some(2048),
        };
        config
            .save_to_path(&config_path)
            .expect("Failed to save config");

        let loaded = Config::load_from_path(&config_path).expect("Failed to load config");
        assert_eq!(loaded.api_key.as_deref(), Some("gsk_test"));
        assert_eq!(loaded.max_file_size, Some(2048));
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("nested").join("dir").join("config.toml");

        Config::default()
            .save_to_path(&config_path)
            .expect("Failed to save config");

        assert!(config_path.exists());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "api_key = [not toml").expect("write file");

        let err = Config::load_from_path(&config_path).expect_err("should fail");
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn max_file_bytes_corrects_bad_values() {
        let absent = Config::default();
        assert_eq!(absent.max_file_bytes(), 1024);

        let zero = Config {
            max_file_size: Some(0),
            ..Default::default()
        };
        assert_eq!(zero.max_file_bytes(), 1024);

        let negative = Config {
            max_file_size: Some(-5),
            ..Default::default()
        };
        assert_eq!(negative.max_file_bytes(), 1024);

        let sane = Config {
            max_file_size: Some(4096),
            ..Default::default()
        };
        assert_eq!(sane.max_file_bytes(), 4096);
    }
}
