use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: u32 = 1;
pub const DEFAULT_CONFIG_FILE: &str = "phonebook.json";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_NOTIFICATION_MS: u64 = 3000;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_notification_ms() -> u64 {
    DEFAULT_NOTIFICATION_MS
}

fn default_notify_failures() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub version: u32,

    /// Root of the remote collection; `/persons` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// How long a notification stays visible.
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u64,

    /// Show failed operations as notifications (they are logged either way).
    #[serde(default = "default_notify_failures")]
    pub notify_failures: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory for rotating log files. Unset means no file logging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            base_url: default_base_url(),
            notification_ms: default_notification_ms(),
            notify_failures: default_notify_failures(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl ClientConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: ClientConfig = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse {}", path.display()))?;
        cfg.validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(cfg)
    }

    /// Explicit path first (must exist), then `./phonebook.json` when present,
    /// then built-in defaults. Returns the file actually used, if any.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            let cfg = Self::load(&local)?;
            return Ok((cfg, Some(local)));
        }

        Ok((Self::default(), None))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let mut bytes = serde_json::to_vec_pretty(self).context("serialize config")?;
        bytes.push(b'\n');
        write_atomic_overwrite(path, &bytes).with_context(|| format!("write {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != CONFIG_VERSION {
            anyhow::bail!(
                "unsupported config version {} (expected {})",
                self.version,
                CONFIG_VERSION
            );
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            anyhow::bail!("base_url must start with http:// or https://");
        }
        if self.notification_ms == 0 {
            anyhow::bail!("notification_ms must be greater than zero");
        }
        Ok(())
    }
}

pub fn write_atomic_overwrite(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    std::fs::write(&tmp, bytes).with_context(|| format!("write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
