use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::WorkerError;

/// Environment variables consulted for each credential, in precedence order.
pub const ACCESS_TOKEN_VARS: [&str; 2] = ["JETOUR_ACCESS_TOKEN", "ACCESS_TOKEN"];
pub const TASK_ID_VARS: [&str; 2] = ["JETOUR_TASK_ID", "TASK_ID"];
pub const CARD_ACCOUNT_ID_VAR: &str = "JETOUR_CARD_ACCOUNT_ID";

/// Credentials supplied from the environment at startup. Never written to output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub task_id: String,
    pub card_account_id: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &self.token_hint())
            .field("task_id", &self.task_id)
            .field("card_account_id", &self.card_account_id)
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self, WorkerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from an arbitrary variable lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WorkerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| {
            names
                .iter()
                .filter_map(|n| lookup(*n))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        };

        let access_token = first(&ACCESS_TOKEN_VARS).ok_or_else(|| {
            WorkerError::Config(format!(
                "未提供 {} 环境变量",
                ACCESS_TOKEN_VARS.join(" / ")
            ))
        })?;
        let task_id = first(&TASK_ID_VARS).ok_or_else(|| {
            WorkerError::Config(format!("未提供 {} 环境变量", TASK_ID_VARS.join(" / ")))
        })?;
        let card_account_id = first(&[CARD_ACCOUNT_ID_VAR]);

        Ok(Self {
            access_token,
            task_id,
            card_account_id,
        })
    }

    /// First ten characters of the token, safe to log.
    pub fn token_hint(&self) -> String {
        let prefix: String = self.access_token.chars().take(10).collect();
        format!("{}...", prefix)
    }
}

/// Retry policy parameters (`[retry]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts per operation (including the first).
    pub max_retries: u32,
    /// Base interval in seconds; the n-th retry waits `base * n * 2`.
    pub base_interval_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_interval_secs: 60,
        }
    }
}

/// Remote API parameters (`[http]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Path of the check-in write call.
    pub sign_in_path: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "https://mobile-consumer.jetour.com.cn".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 15,
            sign_in_path: crate::api::endpoints::SIGN_IN.to_string(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Blind-box stage parameters (`[blind_box]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlindBoxConfig {
    /// Upper bound on boxes opened in one run.
    pub max_per_run: u32,
    /// Inter-request delay range in seconds, sampled uniformly.
    pub min_delay_secs: f64,
    pub max_delay_secs: f64,
    /// Opaque `encryptParam` token sent with each open request.
    pub encrypt_param: String,
}

impl Default for BlindBoxConfig {
    fn default() -> Self {
        Self {
            max_per_run: 5,
            min_delay_secs: 2.0,
            max_delay_secs: 5.0,
            encrypt_param: "BW8HqDlEwJLwe4diG3JLcxw8Fdc/iNEn29ZjZ5sv1JT-2K75tcsqQjYjaxEZhzLOJ6ttWrDIWi-FxkVToJV3SeVfvyRlaPqxYBx225W1RVJ7H5DdpkCPPZX31Ig/-6Up".to_string(),
        }
    }
}

impl BlindBoxConfig {
    /// Delays must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("min_delay_secs", self.min_delay_secs),
            ("max_delay_secs", self.max_delay_secs),
        ] {
            if !v.is_finite() || v < 0.0 {
                anyhow::bail!("blind_box.{} must be a finite, non-negative number (got {})", name, v);
            }
        }
        Ok(())
    }
}

/// Entitlement claim parameters (`[rights]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RightsConfig {
    pub rights_id: String,
    pub rights_package_id: String,
    pub rights_package_code: String,
    pub number: u32,
    /// Failure message that means "already claimed this period"; treated as success.
    pub already_claimed_marker: String,
}

impl Default for RightsConfig {
    fn default() -> Self {
        Self {
            rights_id: "3612257299131322053".to_string(),
            rights_package_id: "3612257299131322059".to_string(),
            rights_package_code: "3612257299131322058".to_string(),
            number: 2,
            already_claimed_marker: "每1月仅可领取一次".to_string(),
        }
    }
}

/// Worker configuration loaded from `~/.config/jetour/config.toml`.
/// Credentials are never read from this file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkerConfig {
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub blind_box: BlindBoxConfig,
    #[serde(default)]
    pub rights: RightsConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("jetour")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<WorkerConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<WorkerConfig> {
    if !path.exists() {
        let default_cfg = WorkerConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: WorkerConfig = toml::from_str(&data)?;
    cfg.blind_box
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
