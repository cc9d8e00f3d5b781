//! Static file serving module
//!
//! Shared GET/HEAD logic: resolves the request path, redirects bare
//! directory paths, falls back to index files or a listing, and sends
//! files through the configured content encoding.

use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncReadExt;

use super::listing;
use super::path::translate_path;
use super::router::RequestContext;
use crate::config::AppState;
use crate::error::HandlerError;
use crate::http::{self, encoding, mime, FilePayload, ResponseBody};
use crate::logger;

/// Common code for GET and HEAD
///
/// The returned response carries the same status and headers for both
/// methods; HEAD responses have an empty body.
pub async fn send_head(
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> Result<Response<ResponseBody>, HandlerError> {
    let mut path = translate_path(&state.root, ctx.target);
    logger::log_serving_path(&path);

    if fs::metadata(&path).await.is_ok_and(|m| m.is_dir()) {
        if !ctx.path.ends_with('/') {
            // Redirect browser, as Apache does
            return Ok(http::build_redirect_response(&redirect_location(ctx)));
        }
        match find_index(&path, &state.config.server.index_files).await {
            Some(index) => path = index,
            None => return listing::list_directory(&path, ctx.path, ctx.is_head).await,
        }
    }

    serve_file(&path, state, ctx.is_head).await
}

/// Location for a directory requested without its trailing slash
fn redirect_location(ctx: &RequestContext<'_>) -> String {
    match ctx.query {
        Some(query) => format!("{}/?{query}", ctx.path),
        None => format!("{}/", ctx.path),
    }
}

/// First configured index file present in `dir`
async fn find_index(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    for name in index_files {
        let candidate = dir.join(name);
        if fs::try_exists(&candidate).await.unwrap_or(false) {
            return Some(candidate);
        }
    }
    None
}

/// Read, encode and send a regular file
async fn serve_file(
    path: &Path,
    state: &AppState,
    is_head: bool,
) -> Result<Response<ResponseBody>, HandlerError> {
    // Always read in binary; the length sent must match the bytes on disk
    let Ok(mut file) = fs::File::open(path).await else {
        return Err(HandlerError::NotFound("File not found"));
    };
    let metadata = file.metadata().await?;
    if metadata.is_dir() {
        return Err(HandlerError::NotFound("File not found"));
    }

    let mut content = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or(0));
    file.read_to_end(&mut content).await?;

    let server = &state.config.server;
    let encoded = encoding::encode(&content, server.content_encoding)?;

    let payload = FilePayload {
        content: Bytes::from(encoded),
        content_type: mime::guess_type(path),
        content_encoding: server.content_encoding,
        transfer_encoding: server.transfer_encoding,
        last_modified: http::http_date(metadata.modified()?),
    };
    Ok(http::build_file_response(payload, is_head))
}
