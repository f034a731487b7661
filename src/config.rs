//! Adapter configuration loaded from the environment (and `.env`).
//!
//! The engine itself carries no configuration; these settings only shape the
//! hosting binary (logging, and where a server adapter would listen).

use serde::Serialize;
use std::error::Error;

pub const APP_NAME: &str = "IPMentor";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "IPv4 network analysis and subnetting tutor";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub mcp_enabled: bool,
    /// Path of the log4rs yaml file.
    pub log_config: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 7861,
            debug: false,
            mcp_enabled: true,
            log_config: "log4rs.yml".to_string(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment after loading `.env`.
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .map_err(|e| format!("Invalid PORT '{p}': {e}"))?,
            None => defaults.port,
        };

        Ok(Config {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            debug: flag(lookup("DEBUG"), defaults.debug),
            mcp_enabled: flag(lookup("MCP_ENABLED"), defaults.mcp_enabled),
            log_config: lookup("LOG_CONFIG").unwrap_or(defaults.log_config),
        })
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

fn flag(value: Option<String>, default: bool) -> bool {
    match value {
        Some(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
        None => default,
    }
}
