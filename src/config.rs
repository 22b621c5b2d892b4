//! Runtime configuration.
//!
//! Values are resolved in this order: explicit overrides (command line or
//! environment), then `<data_dir>/config.yaml`, then built-in defaults.
//!
//! ```yaml
//! api_base_url: https://www.themealdb.com/api/json/v1/1
//! request_timeout_secs: 10
//! default_sort: title
//! ```

use crate::list::SortMode;
use crate::lookup::DEFAULT_BASE_URL;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;
use std::io;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "config.yaml";
const APP_DIR_NAME: &str = "recipe-box";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io { path: Utf8PathBuf, source: io::Error },

    #[error("Failed to parse config file {path}: {source}")]
    Yaml {
        path: Utf8PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {key} in {path}: {reason}")]
    InvalidValue {
        path: Utf8PathBuf,
        key: &'static str,
        reason: &'static str,
    },

    #[error("Could not determine a data directory; pass --data-dir")]
    NoDataDir,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<Utf8PathBuf>,
    pub api_base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    default_sort: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the stored recipes and `config.yaml`
    pub data_dir: Utf8PathBuf,
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// Sort used by `list` when none is given
    pub default_sort: SortMode,
}

impl Config {
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let data_dir = match overrides.data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        let path = data_dir.join(CONFIG_FILE_NAME);
        let file = read_config_file(&path)?.unwrap_or_default();

        let timeout_secs = file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                path,
                key: "request_timeout_secs",
                reason: "must be at least 1",
            });
        }

        Ok(Config {
            api_base_url: overrides
                .api_base_url
                .or(file.api_base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            default_sort: file
                .default_sort
                .map(|s| s.parse::<SortMode>().unwrap_or_default())
                .unwrap_or_default(),
            data_dir,
        })
    }
}

fn default_data_dir() -> Result<Utf8PathBuf, ConfigError> {
    let base = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
    let base = Utf8PathBuf::from_path_buf(base).map_err(|_| ConfigError::NoDataDir)?;
    Ok(base.join(APP_DIR_NAME))
}

/// `None` when the file does not exist.
fn read_config_file(path: &Utf8Path) -> Result<Option<ConfigFile>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_owned(),
                source,
            })
        }
    };
    debug!(%path, "reading config file");

    if content.trim().is_empty() {
        return Ok(Some(ConfigFile::default()));
    }
    serde_yaml::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Yaml {
            path: path.to_owned(),
            source,
        })
}
