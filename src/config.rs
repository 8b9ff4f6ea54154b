use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const APP_DIR_NAME: &str = "hospital-desk";
const CONFIG_FILE_NAME: &str = "config.toml";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub username: Option<String>,
    pub department: Option<String>,
    pub request_timeout: Duration,
    pub log_filter: String,
    pub config_dir: PathBuf,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let dir = config_directory()?;
        let stored = StoredConfig::load_from(&dir.join(CONFIG_FILE_NAME))?;
        Self::resolve(stored, dir, |key| env::var(key).ok())
    }

    /// Layers environment overrides over the stored file, then defaults.
    pub fn resolve<F>(stored: StoredConfig, config_dir: PathBuf, env_lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, stored: Option<String>| {
            env_lookup(key)
                .filter(|value| !value.trim().is_empty())
                .or(stored)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_base_url = pick("HOSPITAL_DESK_API_URL", stored.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let timeout_secs = stored.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(AppError::Configuration(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            api_base_url: normalize_base_url(&api_base_url)?,
            username: pick("HOSPITAL_DESK_USERNAME", stored.username),
            department: pick("HOSPITAL_DESK_DEPARTMENT", stored.department),
            request_timeout: Duration::from_secs(timeout_secs),
            log_filter: pick("HOSPITAL_DESK_LOG", stored.log_filter)
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            config_dir,
        })
    }

    pub fn with_api_base_url(mut self, url: &str) -> AppResult<Self> {
        self.api_base_url = normalize_base_url(url)?;
        Ok(self)
    }
}

pub fn normalize_base_url(url: &str) -> AppResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(AppError::Configuration(format!(
            "API base URL must start with http:// or https:// (got '{url}')"
        )));
    }
    Ok(trimmed.to_string())
}

/// Settings persisted by `config init`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    pub api_base_url: Option<String>,
    pub username: Option<String>,
    pub department: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub log_filter: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).map_err(|err| {
                AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = toml::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(path, data)?;
        Ok(())
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| {
            AppError::Configuration("could not determine configuration directory".to_string())
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}
