// Configuration module entry point
// Loads layered configuration (defaults, file, environment, command line)

mod state;
mod types;

use std::net::SocketAddr;

use crate::cli::Cli;
use crate::error::ConfigError;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, ContentEncoding, LoggingConfig, PerformanceConfig, ServerConfig, TransferEncoding,
};

/// Default config file name (without extension) when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "httpserver";

impl Config {
    /// Load configuration from `--config`, or `httpserver.toml` when it is not given
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_FILE);
        Self::load_from(path, cli)
    }

    /// Load configuration from the given file path (extension optional)
    ///
    /// Priority, lowest first: built-in defaults, config file, `HTTPSERVER__*`
    /// environment variables, command line flags.
    pub fn load_from(config_path: &str, cli: &Cli) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.root", ".")?
            .set_default("server.content_encoding", "gzip")?
            .set_default("server.overwrite_files", false)?
            .set_default("server.index_files", vec!["index.html", "index.htm"])?
            .set_default("server.server_name", "SimpleHTTP/0.6")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("logging.access_log_format", "common")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.request_timeout", 0)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("HTTPSERVER").separator("__"))
            .set_override_option(
                "server.content_encoding",
                cli.content_encoding.map(ContentEncoding::as_str),
            )?
            .set_override_option(
                "server.transfer_encoding",
                cli.transfer_encoding.map(TransferEncoding::as_str),
            )?
            .set_override_option("server.port", cli.port.map(i64::from))?
            .set_override_option("server.overwrite_files", cli.overwrite_files.then_some(true))?
            .set_override_option("server.host", cli.bind.clone())?
            .set_override_option("server.root", cli.directory.clone())?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e| ConfigError::InvalidAddress(addr, e))
    }
}
