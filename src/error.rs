//! Error types
//!
//! `ConfigError` covers startup failures, `HandlerError` covers per-request
//! failures and knows which status code each one maps to.

use hyper::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid listen address '{0}': {1}")]
    InvalidAddress(String, std::net::AddrParseError),

    #[error("Cannot serve directory '{0}': {1}")]
    InvalidRoot(String, std::io::Error),
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("\"{0}\" already exists")]
    Conflict(String),

    #[error("\"{0}\" is a directory")]
    IsDirectory(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Content-Length required")]
    LengthRequired,

    #[error("Request body too large: {size} bytes (max: {max})")]
    PayloadTooLarge { size: u64, max: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HandlerError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) | Self::IsDirectory(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::LengthRequired => StatusCode::LENGTH_REQUIRED,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short message safe to send to the client.
    ///
    /// I/O failures are reported generically; their detail only goes to the error log.
    pub fn client_message(&self) -> String {
        match self {
            Self::Io(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            HandlerError::NotFound("File not found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            HandlerError::Conflict("a.txt".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            HandlerError::LengthRequired.status_code(),
            StatusCode::LENGTH_REQUIRED
        );
        assert_eq!(
            HandlerError::PayloadTooLarge { size: 10, max: 5 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_conflict_message() {
        let err = HandlerError::Conflict("notes.txt".into());
        assert_eq!(err.client_message(), "\"notes.txt\" already exists");

        let err = HandlerError::IsDirectory("docs".into());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.client_message(), "\"docs\" is a directory");
    }

    #[test]
    fn test_io_detail_hidden() {
        let err = HandlerError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "/secret/path denied",
        ));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.client_message().contains("/secret"));
    }
}
