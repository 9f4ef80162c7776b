//! Daemon connection configuration.

use std::fmt;
use std::path::PathBuf;

use crate::constants::DEFAULT_DAEMON_SOCKET;
use crate::error::{DockmemError, Result};

/// Where the container daemon listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaemonHost {
    /// Unix domain socket at the given path.
    Unix(PathBuf),
    /// Plain TCP endpoint as `host:port`.
    Tcp(String),
}

impl DaemonHost {
    /// Parses a daemon URL such as `unix:///var/run/docker.sock` or
    /// `tcp://127.0.0.1:2375`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scheme is unsupported or the address is empty.
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        let host = if let Some(path) = url.strip_prefix("unix://") {
            (!path.is_empty()).then(|| Self::Unix(PathBuf::from(path)))
        } else if let Some(addr) = url
            .strip_prefix("tcp://")
            .or_else(|| url.strip_prefix("http://"))
        {
            let addr = addr.trim_end_matches('/');
            (!addr.is_empty()).then(|| Self::Tcp(addr.to_string()))
        } else {
            return Err(DockmemError::Config {
                message: format!("unsupported daemon host: {url}"),
            });
        };
        host.ok_or_else(|| DockmemError::Config {
            message: format!("daemon host has no address: {url}"),
        })
    }
}

impl fmt::Display for DaemonHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix(path) => write!(f, "unix://{}", path.display()),
            Self::Tcp(addr) => write!(f, "tcp://{addr}"),
        }
    }
}

/// Settings for reaching the container daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    /// Daemon endpoint.
    pub host: DaemonHost,
    /// Pinned API version; negotiated with the daemon when `None`.
    pub api_version: Option<String>,
}

impl DaemonConfig {
    /// Builds a configuration from optional host and version overrides,
    /// falling back to the default socket. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if `host` cannot be parsed.
    pub fn new(host: Option<&str>, api_version: Option<&str>) -> Result<Self> {
        let host = match host.map(str::trim).filter(|h| !h.is_empty()) {
            Some(url) => DaemonHost::parse(url)?,
            None => DaemonHost::Unix(PathBuf::from(DEFAULT_DAEMON_SOCKET)),
        };
        let api_version = api_version
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| v.trim_start_matches('v').to_string());
        Ok(Self { host, api_version })
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            host: DaemonHost::Unix(PathBuf::from(DEFAULT_DAEMON_SOCKET)),
            api_version: None,
        }
    }
}
