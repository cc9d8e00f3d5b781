//! Request handler module
//!
//! Serves GET/HEAD (files, index files, directory listings) and accepts
//! PUT/POST uploads into the served root.

pub mod listing;
pub mod path;
pub mod router;
pub mod static_files;
pub mod upload;

// Re-export main entry point
pub use router::{handle_request, RequestContext};
