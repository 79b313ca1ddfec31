//! Viewer configuration loaded from environment variables.
//!
//! - `PORTFOLIO_HOST` - Bind address (default: 127.0.0.1)
//! - `PORTFOLIO_PORT` - Listen port (default: 3030)
//! - `PORTFOLIO_USERS_FILE` - JSON file replacing the embedded user list
//! - `PORTFOLIO_STOCKS_FILE` - JSON file replacing the embedded stock list
//! - `PORTFOLIO_LOGOS_DIR` - Directory served under `/logos` (default: logos)
//!
//! Log filtering is read separately by the logger from `PORTFOLIO_LOG`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

pub const LOG_ENV: &str = "PORTFOLIO_LOG";

const DEFAULT_PORT: u16 = 3030;
const DEFAULT_LOGOS_DIR: &str = "logos";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub users_file: Option<PathBuf>,
    pub stocks_file: Option<PathBuf>,
    pub logos_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            users_file: None,
            stocks_file: None,
            logos_dir: PathBuf::from(DEFAULT_LOGOS_DIR),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Empty
    /// values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let host = match get("PORTFOLIO_HOST") {
            Some(raw) => raw.trim().parse::<IpAddr>().map_err(|e| {
                ConfigError::InvalidEnvVar("PORTFOLIO_HOST".to_string(), e.to_string())
            })?,
            None => defaults.host,
        };

        let port = match get("PORTFOLIO_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                ConfigError::InvalidEnvVar("PORTFOLIO_PORT".to_string(), e.to_string())
            })?,
            None => defaults.port,
        };

        Ok(Self {
            host,
            port,
            users_file: get("PORTFOLIO_USERS_FILE").map(PathBuf::from),
            stocks_file: get("PORTFOLIO_STOCKS_FILE").map(PathBuf::from),
            logos_dir: get("PORTFOLIO_LOGOS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.logos_dir),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
