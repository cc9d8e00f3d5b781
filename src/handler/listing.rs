//! Directory listing renderer
//!
//! Produces the HTML index page sent for a directory without an index file.

use hyper::Response;
use percent_encoding::{percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::ffi::{OsStr, OsString};
use std::fmt::Write as _;
use std::path::Path;
use tokio::fs;

use super::path::{decode, name_bytes};
use crate::error::HandlerError;
use crate::http::{self, ResponseBody};
use crate::logger;

/// Characters left unescaped in listing links (letters, digits and `_.-~/`)
const LINK_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// One rendered row of the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Text shown to the user, with `/` or `@` suffix
    pub display_name: String,
    /// Percent-encoded relative link, with `/` suffix for directories
    pub href: String,
}

impl ListingEntry {
    /// Directories get a trailing `/`; other symlinks are marked `@`.
    /// A symlink that resolves to a directory counts as a directory.
    ///
    /// The link is encoded from the name's raw bytes, so it resolves back to
    /// the same file even when the name is not valid UTF-8.
    pub fn new(name: impl AsRef<OsStr>, is_dir: bool, is_symlink: bool) -> Self {
        let name = name.as_ref();
        let shown = name.to_string_lossy();
        let link = percent_encode(&name_bytes(name), LINK_SAFE).to_string();
        if is_dir {
            Self {
                display_name: format!("{shown}/"),
                href: format!("{link}/"),
            }
        } else if is_symlink {
            Self {
                display_name: format!("{shown}@"),
                href: link,
            }
        } else {
            Self {
                display_name: shown.into_owned(),
                href: link,
            }
        }
    }
}

/// Build the listing response for `dir`
///
/// `request_path` is the raw request path, shown decoded in the page title.
/// An unreadable directory yields 404.
pub async fn list_directory(
    dir: &Path,
    request_path: &str,
    is_head: bool,
) -> Result<Response<ResponseBody>, HandlerError> {
    let entries = match read_entries(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            logger::log_warning(&format!("Cannot list '{}': {e}", dir.display()));
            return Err(HandlerError::NotFound("No permission to list directory"));
        }
    };

    let html = render(&decode(request_path), &entries);
    Ok(http::build_html_response(html, is_head))
}

/// Read `dir` and classify its entries, sorted case-insensitively
pub async fn read_entries(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut names: Vec<OsString> = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        names.push(entry.file_name());
    }
    names.sort_by_key(|name| name.to_string_lossy().to_lowercase());

    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        let full = dir.join(&name);
        let is_dir = fs::metadata(&full).await.is_ok_and(|m| m.is_dir());
        let is_symlink = fs::symlink_metadata(&full)
            .await
            .is_ok_and(|m| m.file_type().is_symlink());
        entries.push(ListingEntry::new(&name, is_dir, is_symlink));
    }
    Ok(entries)
}

/// Render the listing page
pub fn render(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = escape_html(display_path);
    let mut html = String::from("<!DOCTYPE html>");
    let _ = write!(
        html,
        "<html>\n<title>Directory listing for {title}</title>\n\
         <body>\n<h2>Directory listing for {title}</h2>\n<hr>\n<ul>\n"
    );
    for entry in entries {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a>",
            entry.href,
            escape_html(&entry.display_name)
        );
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

/// Escape text for inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_suffixes() {
        let file = ListingEntry::new("a.txt", false, false);
        assert_eq!(file.display_name, "a.txt");

        let dir = ListingEntry::new("sub", true, false);
        assert_eq!(dir.display_name, "sub/");
        assert_eq!(dir.href, "sub/");

        let link = ListingEntry::new("latest", false, true);
        assert_eq!(link.display_name, "latest@");
        assert_eq!(link.href, "latest");

        // Directory check wins over the symlink check
        let dir_link = ListingEntry::new("current", true, true);
        assert_eq!(dir_link.display_name, "current/");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a & \"b\">"), "&lt;a &amp; &quot;b&quot;&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_render_document() {
        let entries = vec![
            ListingEntry::new("a b.txt", false, false),
            ListingEntry::new("<sub>", true, false),
        ];
        let html = render("/docs/", &entries);

        assert!(html.starts_with("<!DOCTYPE html><html>\n<title>Directory listing for /docs/</title>"));
        assert!(html.contains("<h2>Directory listing for /docs/</h2>"));
        assert!(html.contains("<li><a href=\"a%20b.txt\">a b.txt</a>\n"));
        assert!(html.contains("<li><a href=\"%3Csub%3E/\">&lt;sub&gt;/</a>\n"));
        assert!(html.ends_with("</ul>\n<hr>\n</body>\n</html>\n"));
    }

    #[tokio::test]
    async fn test_read_entries_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("B.txt"), b"b").unwrap();
        std::fs::write(dir.path().join("a.txt"), b"a").unwrap();
        std::fs::create_dir(dir.path().join("c")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.display_name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "B.txt", "c/"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinks_marked() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("target.txt"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("target.txt"), dir.path().join("link")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("dirlink")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.display_name.as_str()).collect();
        assert_eq!(names, vec!["dirlink/", "link@", "real/", "target.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_link_uses_raw_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let entry = ListingEntry::new(OsStr::from_bytes(b"caf\xe9.txt"), false, false);
        assert_eq!(entry.href, "caf%E9.txt");
        assert_eq!(entry.display_name, "caf\u{fffd}.txt");
    }

    #[tokio::test]
    async fn test_missing_directory_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_directory(&dir.path().join("gone"), "/gone/", false)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), hyper::StatusCode::NOT_FOUND);
    }
}
