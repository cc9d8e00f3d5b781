// Application state module
// Read-only state shared by every connection and request

use std::path::PathBuf;

use super::types::Config;
use crate::error::ConfigError;

/// Application state
///
/// Built once at startup and shared behind an `Arc`. Nothing in here is
/// mutated after construction.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    /// Canonical absolute path of the served directory
    pub root: PathBuf,
}

impl AppState {
    /// Create `AppState`, resolving `server.root` to an absolute directory
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let root = std::fs::canonicalize(&config.server.root)
            .map_err(|e| ConfigError::InvalidRoot(config.server.root.clone(), e))?;
        if !root.is_dir() {
            return Err(ConfigError::InvalidRoot(
                config.server.root.clone(),
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
            ));
        }
        Ok(Self { config, root })
    }
}
