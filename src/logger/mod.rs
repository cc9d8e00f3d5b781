//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging
//! - Request and access logging
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use hyper::{HeaderMap, Method, Uri, Version};
use std::net::SocketAddr;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, root: &Path, config: &Config) {
    let server = &config.server;
    write_info("======================================");
    write_info(&format!("Serving HTTP on {} port {} ...", addr.ip(), addr.port()));
    write_info(&format!("Root directory: {}", root.display()));
    write_info(&format!("Content encoding: {}", server.content_encoding));
    if let Some(te) = server.transfer_encoding {
        write_info(&format!("Transfer encoding: {te}"));
    }
    write_info(&format!("Overwrite files: {}", server.overwrite_files));
    if let Some(workers) = server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_server_stop() {
    write_info("[Shutdown] Stopped accepting connections");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    write_info(&format!("[Request] {method} {uri} {version:?}"));
}

pub fn log_headers(headers: &HeaderMap, show: bool) {
    if !show {
        return;
    }
    for (name, value) in headers {
        write_info(&format!(
            "[Headers] {}: {}",
            name,
            value.to_str().unwrap_or("<binary>")
        ));
    }
}

pub fn log_serving_path(path: &Path) {
    write_info(&format!("Serving path '{}'", path.display()));
}

pub fn log_overwrite(path: &Path) {
    write_info(&format!("Overwriting {}", path.display()));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}
