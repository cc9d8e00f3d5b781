//! Request path translation
//!
//! Maps a URL path onto the served root without touching the filesystem.
//! Every surviving segment is reduced to a bare file name, so the result is
//! always the root itself or a descendant of it. Decoded segments are kept
//! as raw bytes, so names that are not valid UTF-8 still map onto the file
//! they name.

use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Drop any query string or fragment from a request target
pub fn strip_query(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    &target[..end]
}

/// Percent-decode a URL path for display; invalid UTF-8 is replaced lossily
pub fn decode(path: &str) -> Cow<'_, str> {
    percent_decode_str(path).decode_utf8_lossy()
}

/// Percent-decode a URL path to raw bytes
pub fn decode_bytes(path: &str) -> Cow<'_, [u8]> {
    percent_decode_str(path).into()
}

/// Collapse `.`, `..` and repeated slashes lexically
///
/// `..` above the top is discarded, as for an absolute path.
pub fn normalize(path: &[u8]) -> Vec<&[u8]> {
    let mut segments: Vec<&[u8]> = Vec::new();
    for segment in path.split(|&b| b == b'/') {
        match segment {
            b"" | b"." => {}
            b".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments
}

/// File name for a decoded path segment
#[cfg(unix)]
pub fn os_name(bytes: &[u8]) -> Cow<'_, OsStr> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
pub fn os_name(bytes: &[u8]) -> Cow<'_, OsStr> {
    Cow::Owned(OsString::from(String::from_utf8_lossy(bytes).into_owned()))
}

/// Raw bytes of a file name, the inverse of [`os_name`]
#[cfg(unix)]
pub fn name_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(name.as_bytes())
}

#[cfg(not(unix))]
pub fn name_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    match name.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

/// Translate a `/`-separated request target into a path under `root`
///
/// Query and fragment are dropped, the rest is percent-decoded and
/// normalised. Drive and directory components inside a segment are ignored,
/// and segments that name `.` or `..` are skipped.
pub fn translate_path(root: &Path, target: &str) -> PathBuf {
    let decoded = decode_bytes(strip_query(target));
    let mut path = root.to_path_buf();
    for segment in normalize(&decoded) {
        let segment = os_name(segment);
        if let Some(name) = Path::new(&*segment).file_name() {
            path.push(name);
        }
    }
    path
}

/// Base name of a request target, used as an upload destination
///
/// Returns `None` when nothing usable remains (empty, `.` or `..`).
pub fn upload_name(target: &str) -> Option<OsString> {
    let decoded = decode_bytes(strip_query(target));
    let last = os_name(decoded.rsplit(|&b| b == b'/').next()?);
    Path::new(&*last).file_name().map(OsStr::to_os_string)
}
