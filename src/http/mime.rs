//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension.

use std::path::Path;

/// Get MIME Content-Type for a file path
///
/// Extension matching is case-insensitive; unknown or missing extensions map
/// to `application/octet-stream`. Source files are served as plain text.
///
/// # Examples
/// ```
/// use httpserver::http::mime::guess_type;
/// assert_eq!(guess_type("index.html".as_ref()), "text/html");
/// assert_eq!(guess_type("main.py".as_ref()), "text/plain");
/// assert_eq!(guess_type("blob".as_ref()), "application/octet-stream");
/// ```
pub fn guess_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    get_content_type(extension.as_deref())
}

/// Get MIME Content-Type based on a lowercase file extension
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html" | "htm") => "text/html",
        Some("css") => "text/css",
        Some("txt" | "md" | "py" | "c" | "h" | "log") => "text/plain",
        Some("csv") => "text/csv",
        Some("xml") => "application/xml",

        // JavaScript/WASM
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/vnd.microsoft.icon",
        Some("webp") => "image/webp",

        // Audio/Video
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/x-wav",
        Some("ogg") => "audio/ogg",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",

        // Archives and documents
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("gz") => "application/gzip",
        Some("tar") => "application/x-tar",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(get_content_type(Some("html")), "text/html");
        assert_eq!(get_content_type(Some("css")), "text/css");
        assert_eq!(get_content_type(Some("js")), "application/javascript");
        assert_eq!(get_content_type(Some("json")), "application/json");
        assert_eq!(get_content_type(Some("png")), "image/png");
    }

    #[test]
    fn test_forced_types() {
        assert_eq!(guess_type(Path::new("script.py")), "text/plain");
        assert_eq!(guess_type(Path::new("lib.c")), "text/plain");
        assert_eq!(guess_type(Path::new("lib.h")), "text/plain");
        assert_eq!(guess_type(Path::new("app.wasm")), "application/wasm");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(guess_type(Path::new("PHOTO.JPG")), "image/jpeg");
        assert_eq!(guess_type(Path::new("/srv/Index.HTML")), "text/html");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(get_content_type(Some("xyz")), "application/octet-stream");
        assert_eq!(guess_type(Path::new("Makefile")), "application/octet-stream");
    }
}
