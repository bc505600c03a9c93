//! Runtime configuration, read from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use editrelay_infra::command_log::DEFAULT_MAX_COMMANDS;

use crate::app::services::DEFAULT_MAX_PAYLOAD_BYTES;

pub const ENV_BIND_ADDR: &str = "RELAY_BIND_ADDR";
pub const ENV_MAX_COMMANDS: &str = "RELAY_MAX_COMMANDS";
pub const ENV_MAX_PAYLOAD_BYTES: &str = "RELAY_MAX_PAYLOAD_BYTES";
pub const ENV_SCRIPT_PATH: &str = "RELAY_SCRIPT_PATH";

/// Configuration for the relay server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// Retention bound of the command log.
    pub max_commands: usize,
    /// Largest accepted submission, in bytes.
    pub max_payload_bytes: u64,
    /// File served as `/script.js`.
    pub script_path: PathBuf,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            max_commands: DEFAULT_MAX_COMMANDS,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            script_path: PathBuf::from("./script.bundle.js"),
        }
    }
}

impl RelayConfig {
    /// Load from `RELAY_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup. Invalid values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: parse_or(&lookup, ENV_BIND_ADDR, defaults.bind_addr),
            max_commands: parse_or(&lookup, ENV_MAX_COMMANDS, defaults.max_commands),
            max_payload_bytes: parse_or(&lookup, ENV_MAX_PAYLOAD_BYTES, defaults.max_payload_bytes),
            script_path: lookup(ENV_SCRIPT_PATH)
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.script_path),
        }
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn with_max_commands(mut self, max: usize) -> Self {
        self.max_commands = max;
        self
    }

    pub fn with_max_payload_bytes(mut self, max: u64) -> Self {
        self.max_payload_bytes = max;
        self
    }

    pub fn with_script_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.script_path = path.into();
        self
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + core::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!("{key}={raw:?} is not valid; using default {default}");
            default
        }
    }
}
