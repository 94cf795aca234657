//! Service settings read from the environment.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{EngineError, EngineResult};

/// Default address the HTTP service binds to.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings for the HTTP service binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Address to listen on (`COMMISSION_BIND_ADDR`).
    pub bind_addr: SocketAddr,
    /// Directory of YAML rate tables (`COMMISSION_CONFIG_DIR`). The built-in
    /// tables are used when unset.
    pub config_dir: Option<PathBuf>,
}

impl ServerSettings {
    /// Reads settings from the process environment, loading a `.env` file
    /// first when one is present.
    pub fn from_env() -> EngineResult<Self> {
        // A missing .env file is fine; real environment variables still apply.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("COMMISSION_BIND_ADDR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let bind_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| EngineError::InvalidConfig {
                message: format!("COMMISSION_BIND_ADDR '{}' is not a socket address: {}", raw_addr, e),
            })?;

        let config_dir = lookup("COMMISSION_CONFIG_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            config_dir,
        })
    }
}
