//! Command line interface
//!
//! Every flag is optional; anything left unset falls back to the config file,
//! the environment, then the built-in defaults.

use clap::Parser;

use crate::config::{ContentEncoding, TransferEncoding};

#[derive(Debug, Parser)]
#[command(name = "httpserver", version, about = "Serve and accept files over HTTP")]
pub struct Cli {
    /// Content encoding applied to every file response
    #[arg(long = "content-encoding", visible_alias = "ce", value_enum)]
    pub content_encoding: Option<ContentEncoding>,

    /// Transfer encoding for file responses
    #[arg(long = "transfer-encoding", visible_alias = "te", value_enum)]
    pub transfer_encoding: Option<TransferEncoding>,

    /// The port to serve the files on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Allow PUT/POST to overwrite existing files
    #[arg(long = "overwrite-files", visible_alias = "of")]
    pub overwrite_files: bool,

    /// Address to bind
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Directory to serve (defaults to the working directory)
    #[arg(short, long)]
    pub directory: Option<String>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_aliases() {
        let cli = Cli::try_parse_from(["httpserver", "--ce", "zlib", "--te", "chunked", "--of"])
            .unwrap();
        assert_eq!(cli.content_encoding, Some(ContentEncoding::Zlib));
        assert_eq!(cli.transfer_encoding, Some(TransferEncoding::Chunked));
        assert!(cli.overwrite_files);
    }

    #[test]
    fn test_long_with_equals() {
        let cli = Cli::try_parse_from(["httpserver", "--content-encoding=deflate", "--port=9000"])
            .unwrap();
        assert_eq!(cli.content_encoding, Some(ContentEncoding::Deflate));
        assert_eq!(cli.port, Some(9000));
        assert!(!cli.overwrite_files);
    }

    #[test]
    fn test_invalid_encodings_rejected() {
        assert!(Cli::try_parse_from(["httpserver", "--ce", "brotli"]).is_err());
        assert!(Cli::try_parse_from(["httpserver", "--te", "gzip"]).is_err());
    }
}
