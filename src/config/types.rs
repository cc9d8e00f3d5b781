// Configuration types module
// Defines all configuration-related data structures

use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served and written to by uploads
    pub root: String,
    pub workers: Option<usize>,
    pub content_encoding: ContentEncoding,
    #[serde(default)]
    pub transfer_encoding: Option<TransferEncoding>,
    pub overwrite_files: bool,
    #[serde(default)]
    pub max_upload_size: Option<u64>,
    pub index_files: Vec<String>,
    pub server_name: String,
}

/// Compression scheme applied to every file response
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContentEncoding {
    /// DEFLATE stream in zlib framing
    Zlib,
    /// Raw DEFLATE stream, no framing
    Deflate,
    /// DEFLATE stream in gzip framing
    Gzip,
}

impl ContentEncoding {
    /// Value sent in the `Content-Encoding` header
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zlib => "zlib",
            Self::Deflate => "deflate",
            Self::Gzip => "gzip",
        }
    }
}

impl fmt::Display for ContentEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransferEncoding {
    Chunked,
}

impl TransferEncoding {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chunked => "chunked",
        }
    }
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    pub show_headers: bool,
    /// Access log format (combined, common or json)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Whole-connection timeout in seconds, 0 disables it
    pub request_timeout: u64,
    #[serde(default)]
    pub max_connections: Option<u64>,
}
