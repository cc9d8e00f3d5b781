//! Simple HTTP file server
//!
//! Serves GET/HEAD for files and directories under a root directory, always
//! compressed with the configured content encoding, and accepts PUT/POST
//! uploads into that directory.

pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
