use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf, time::Duration};
use tracing::debug;
use url::Url;

use crate::error::{OpenToCloseError, Result};

pub const API_KEY_ENV_VAR: &str = "OPEN_TO_CLOSE_API_KEY";
pub const BASE_URL_ENV_VAR: &str = "OPEN_TO_CLOSE_BASE_URL";
pub const CONFIG_DIR_ENV_VAR: &str = "OPEN_TO_CLOSE_CONFIG_DIR";

pub const DEFAULT_BASE_URL: &str = "https://api.opentoclose.com/v1";
pub const DEFAULT_APPLICATION_ID: &str = "open-to-close";
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "config.yml";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolved settings for one client instance.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: Url,
    timeout: Duration,
    user_agent: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration with the default base URL and timeout.
    ///
    /// Fails with an authentication error if the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(OpenToCloseError::missing_api_key());
        }

        Ok(Self {
            api_key,
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        })
    }

    /// Resolve a configuration the way [`crate::OpenToCloseApi::new`] does.
    ///
    /// The key comes from `api_key` or `OPEN_TO_CLOSE_API_KEY`. The base URL
    /// comes from `base_url`, `OPEN_TO_CLOSE_BASE_URL`, the configuration file,
    /// or the built-in default, in that order.
    pub fn resolve(api_key: Option<&str>, base_url: Option<&str>) -> Result<Self> {
        let key = resolve_api_key(api_key, std::env::var(API_KEY_ENV_VAR).ok())
            .ok_or_else(OpenToCloseError::missing_api_key)?;

        let file = ConfigurationFile::load_default()?;

        let base_url = base_url
            .map(str::to_string)
            .or_else(|| non_blank(std::env::var(BASE_URL_ENV_VAR).ok()))
            .or_else(|| file.base_url.as_ref().map(|u| u.to_string()));

        let mut config = ClientConfig::new(key)?;
        if let Some(base_url) = base_url {
            config = config.with_base_url(&base_url)?;
        }
        if let Some(timeout) = file.timeout()? {
            config = config.with_timeout(timeout);
        }

        debug!("Resolved client configuration: {:?}", config);
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// Pick the explicit key if given, otherwise the environment value.
///
/// Blank strings count as absent.
pub fn resolve_api_key(explicit: Option<&str>, from_env: Option<String>) -> Option<String> {
    non_blank(explicit.map(str::to_string)).or_else(|| non_blank(from_env))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn default_user_agent() -> String {
    format!("open-to-close-rs/{}", env!("CARGO_PKG_VERSION"))
}

/// Parse and normalize a base URL. Only `http` and `https` are accepted and a
/// trailing slash is dropped so paths can be appended verbatim.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim().trim_end_matches('/'))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(OpenToCloseError::Configuration(format!(
            "unsupported URL scheme {:?} in base URL {}",
            other, raw
        ))),
    }
}

/// Optional on-disk settings. Never holds the API key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ConfigurationFile {
    /// Configured request timeout. A zero timeout is a configuration error.
    pub fn timeout(&self) -> Result<Option<Duration>> {
        match self.timeout_secs {
            Some(0) => Err(OpenToCloseError::Configuration(
                "timeout_secs must be greater than zero".to_string(),
            )),
            Some(secs) => Ok(Some(Duration::from_secs(secs))),
            None => Ok(None),
        }
    }

    pub fn get_default_configuration_file_path() -> Option<PathBuf> {
        // Check for OPEN_TO_CLOSE_CONFIG_DIR environment variable first
        if let Ok(config_dir_str) = std::env::var(CONFIG_DIR_ENV_VAR) {
            let mut config_path = PathBuf::from(config_dir_str);
            config_path.push(DEFAULT_CONFIGURATION_FILE_NAME);
            return Some(config_path);
        }

        config_dir().map(|mut path| {
            path.push(DEFAULT_APPLICATION_ID);
            path.push(DEFAULT_CONFIGURATION_FILE_NAME);
            path
        })
    }

    /// Load the default file, or an empty configuration if there is none.
    pub fn load_default() -> Result<ConfigurationFile> {
        match Self::get_default_configuration_file_path() {
            Some(path) => Self::load_optional(path),
            None => Ok(ConfigurationFile::default()),
        }
    }

    /// Like [`ConfigurationFile::load_from_file`], but a missing file yields defaults.
    pub fn load_optional(path: PathBuf) -> Result<ConfigurationFile> {
        if !path.exists() {
            debug!("No configuration file at {}, using defaults", path.display());
            return Ok(ConfigurationFile::default());
        }
        Self::load_from_file(path)
    }

    pub fn load_from_file(path: PathBuf) -> Result<ConfigurationFile> {
        debug!("Loading configuration from {}...", path.display());
        let contents = fs::read_to_string(&path).map_err(|e| {
            OpenToCloseError::Configuration(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            OpenToCloseError::Configuration(format!(
                "failed to parse {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn save(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                OpenToCloseError::Configuration(format!(
                    "failed to create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let contents = serde_yaml::to_string(self)
            .map_err(|e| OpenToCloseError::Configuration(e.to_string()))?;
        fs::write(path, contents).map_err(|e| {
            OpenToCloseError::Configuration(format!(
                "failed to write {}: {}",
                path.display(),
                e
            ))
        })
    }
}
