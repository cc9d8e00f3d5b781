//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from request handling:
//! MIME lookup, content encoding, response bodies and response builders.

pub mod body;
pub mod encoding;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use body::ResponseBody;
pub use response::{
    build_501_response, build_file_response, build_html_response, build_redirect_response,
    build_text_response, http_date, FilePayload,
};
