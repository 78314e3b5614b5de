//! Server configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! the process environment. The environment is the canonical source in
//! deployments; the file exists for local setups.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use tankwatch_core::Error;

use crate::Result;

/// Environment variable holding the store connection string.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
/// Environment variable holding the bind address.
pub const ENV_HOST: &str = "TANKWATCH_HOST";
/// Environment variable holding the listening port.
pub const ENV_PORT: &str = "PORT";
/// Environment variable holding the static asset directory.
pub const ENV_STATIC_DIR: &str = "TANKWATCH_STATIC_DIR";

/// Default store: a SQLite file in the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://tankwatch.db?mode=rwc";
/// Default listening port.
pub const DEFAULT_PORT: u16 = 5000;

/// Everything the server needs at boot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Record store connection string (`sqlite:...` or `memory`).
    pub database_url: String,
    /// Address to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory of browser pages served for non-API paths.
    pub static_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from("public"),
        }
    }
}

impl ServiceConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self> {
        Self::default().apply_env()
    }

    /// Loads defaults, overlaid with `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    Error::config(format!("failed to read {}: {e}", path.display()))
                })?;
                let config = toml::from_str(&content).map_err(|e| {
                    Error::config(format!("failed to parse {}: {e}", path.display()))
                })?;
                Ok(config)
            }
        }
    }

    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()).into())
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()).into())
    }

    /// Overlays values from the process environment.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Overlays values from `lookup`. Empty values are ignored.
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_DATABASE_URL) {
            self.database_url = url;
        }
        if let Some(host) = get(ENV_HOST) {
            self.host = host;
        }
        if let Some(port) = get(ENV_PORT) {
            self.port = port.trim().parse().map_err(|_| {
                Error::config(format!("{ENV_PORT} must be a port number, got '{port}'"))
            })?;
        }
        if let Some(dir) = get(ENV_STATIC_DIR) {
            self.static_dir = PathBuf::from(dir);
        }
        Ok(self)
    }

    /// The socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| Error::config(format!("invalid host address '{}'", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
