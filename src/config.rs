//! Environment-driven configuration.

use std::env;
use std::path::PathBuf;

/// Name of the environment variable that points at the persistence directory.
pub const DATA_DIR_ENV: &str = "PRESIDENTE_DATA";

const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the per-room JSON blobs.
    pub data_dir: PathBuf,
    /// Bind address for the HTTP/WebSocket server.
    pub bind: (String, u16),
}

impl Config {
    pub fn from_env() -> Self {
        let data_dir = env::var(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        Self {
            data_dir,
            bind: ("127.0.0.1".to_string(), 8765),
        }
    }
}
