use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::retry::RetryPolicy;
use crate::roster::Endpoints;

/// A config value that cannot be used to build a resolver.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} is empty")]
    EmptyBase { field: &'static str },
    #[error("{field} is not a valid URL: {source}")]
    InvalidBase {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("{field} must be a non-negative number of seconds, got {value}")]
    InvalidDelay { field: &'static str, value: f64 },
}

/// Configuration loaded from `~/.config/cardroster/config.toml`.
///
/// Every field is optional in the file; missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Roster service base; the roster of user N lives at `{fake_api_base}/N`.
    pub fake_api_base: String,
    /// Character detail base; character N lives at `{jikan_base}N`.
    pub jikan_base: String,
    /// Attempts per request, including the first.
    pub request_max_retries: u32,
    /// Backoff after the first failed attempt, in seconds. Doubles per failure.
    pub request_initial_delay_secs: f64,
    /// Pause between character fetches, in seconds (detail API rate limit).
    pub inter_entity_delay_secs: f64,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            fake_api_base:
                "https://my-json-server.typicode.com/jacobo1304/sistemas-interactivos-dist/players"
                    .to_string(),
            jikan_base: "https://api.jikan.moe/v4/characters/".to_string(),
            request_max_retries: 3,
            request_initial_delay_secs: 0.5,
            inter_entity_delay_secs: 0.5,
        }
    }
}

impl RosterConfig {
    pub fn retry_policy(&self) -> Result<RetryPolicy, ConfigError> {
        Ok(RetryPolicy::new(
            self.request_max_retries,
            secs("request_initial_delay_secs", self.request_initial_delay_secs)?,
        ))
    }

    pub fn inter_entity_delay(&self) -> Result<Duration, ConfigError> {
        secs("inter_entity_delay_secs", self.inter_entity_delay_secs)
    }

    /// Validated, slash-normalized service endpoints.
    pub fn endpoints(&self) -> Result<Endpoints, ConfigError> {
        check_base("fake_api_base", &self.fake_api_base)?;
        check_base("jikan_base", &self.jikan_base)?;
        Ok(Endpoints::new(&self.fake_api_base, &self.jikan_base))
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Run every check; used right after loading so bad values fail early.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.retry_policy()?;
        self.inter_entity_delay()?;
        self.endpoints()?;
        Ok(())
    }
}

fn secs(field: &'static str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::InvalidDelay { field, value })
}

fn check_base(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::EmptyBase { field });
    }
    url::Url::parse(value).map_err(|source| ConfigError::InvalidBase { field, source })?;
    Ok(())
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cardroster")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from the XDG config dir, creating a default file if none exists.
pub fn load_or_init() -> Result<RosterConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RosterConfig::default();
        let toml = default_cfg.to_toml()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load and validate configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<RosterConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: RosterConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
