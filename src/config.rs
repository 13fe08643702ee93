use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Env var naming an optional YAML config file.
pub const CONFIG_PATH_VAR: &str = "LANTERN_CONFIG";

/// Server settings.
///
/// Every field has a default, so an empty YAML document (or no file at all)
/// yields a server on `127.0.0.1:5050` serving `www/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the listener binds to.
    pub listen_addr: String,
    /// Directory all served files must live under.
    pub web_root: PathBuf,
    /// Value of the `Server` response header.
    pub server_name: String,
    /// Largest request head accepted before answering 431.
    pub max_request_bytes: usize,
    /// Upper bound on the time spent reading one request.
    pub read_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:5050".to_string(),
            web_root: PathBuf::from("www"),
            server_name: "lantern".to_string(),
            max_request_bytes: 8192,
            read_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Loads the YAML file named by `LANTERN_CONFIG` (if any), then applies
    /// env var overrides.
    pub fn load() -> anyhow::Result<Self> {
        let base = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Builds a config from defaults plus whatever `lookup` returns.
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().with_overrides(lookup)
    }

    fn with_overrides<F>(mut self, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("LISTEN") {
            self.listen_addr = addr;
        }
        if let Some(root) = lookup("WEB_ROOT") {
            self.web_root = PathBuf::from(root);
        }
        if let Some(name) = lookup("SERVER_NAME") {
            self.server_name = name;
        }
        if let Some(max) = lookup("MAX_REQUEST_BYTES") {
            self.max_request_bytes = max
                .parse()
                .with_context(|| format!("MAX_REQUEST_BYTES is not a number: {max}"))?;
        }
        if let Some(secs) = lookup("READ_TIMEOUT_SECS") {
            self.read_timeout_secs = secs
                .parse()
                .with_context(|| format!("READ_TIMEOUT_SECS is not a number: {secs}"))?;
        }
        Ok(self)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}
