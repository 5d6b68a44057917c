use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

use crate::constants::{ledger, polling, queue, venue};
use crate::error::AgentError;

#[derive(Clone, Debug, Deserialize)]
pub struct QueueConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Sort pending names before processing; directory order otherwise
    #[serde(default = "default_true")]
    pub sort_pending: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            poll_interval_secs: default_poll_interval_secs(),
            sort_pending: true,
        }
    }
}

impl QueueConfig {
    /// Poll interval, never below one second
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs).max(polling::MIN_POLL_INTERVAL)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueKind {
    #[default]
    Paper,
    Http,
}

impl std::str::FromStr for VenueKind {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paper" => Ok(VenueKind::Paper),
            "http" => Ok(VenueKind::Http),
            other => Err(AgentError::Config(format!(
                "Unknown venue kind '{}' (expected paper|http)",
                other
            ))),
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct HttpVenueConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// Keeps the key out of the startup config dump
impl std::fmt::Debug for HttpVenueConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpVenueConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for HttpVenueConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PaperVenueConfig {
    /// Reject every order with this code (useful for dry runs of the failure path)
    pub reject_code: Option<i64>,
    pub reject_description: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct VenueConfig {
    #[serde(default)]
    pub kind: VenueKind,
    #[serde(default)]
    pub http: HttpVenueConfig,
    #[serde(default)]
    pub paper: PaperVenueConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_retention_secs")]
    pub retention_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            retention_secs: default_retention_secs(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiConfig {
    /// e.g. "0.0.0.0:3000"; no server when unset
    pub bind: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub venue: VenueConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            queue: QueueConfig::default(),
            venue: VenueConfig::default(),
            ledger: LedgerConfig::default(),
            api: ApiConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load from `AGENT_CONFIG` (default `config.yaml`), then apply
    /// environment overrides. A missing file means defaults.
    pub fn load() -> Result<Self, AgentError> {
        let path = std::env::var("AGENT_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
        let mut config = Self::from_path(Path::new(&path))?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, AgentError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_yaml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("⚠️ {} not found, using default configuration", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, AgentError> {
        // Strip BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Overlay environment variables. `lookup` is injectable for tests.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), AgentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup("QUEUE_ROOT") {
            self.queue.root = PathBuf::from(root);
        }
        if let Some(secs) = lookup("POLL_INTERVAL_SECS") {
            self.queue.poll_interval_secs = secs.trim().parse().map_err(|_| {
                AgentError::Config(format!("Invalid POLL_INTERVAL_SECS '{}'", secs))
            })?;
        }
        if let Some(kind) = lookup("VENUE_KIND") {
            self.venue.kind = kind.parse()?;
        }
        if let Some(url) = lookup("VENUE_BASE_URL") {
            self.venue.http.base_url = url;
        }
        if let Some(key) = lookup("VENUE_API_KEY") {
            self.venue.http.api_key = Some(key);
        }
        if let Some(bind) = lookup("API_BIND") {
            self.api.bind = Some(bind);
        }
        Ok(())
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(queue::DEFAULT_ROOT)
}

fn default_poll_interval_secs() -> u64 {
    polling::DEFAULT_POLL_INTERVAL_SECS
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    venue::DEFAULT_TIMEOUT_SECS
}

fn default_retention_secs() -> u64 {
    ledger::DEFAULT_RETENTION_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}
