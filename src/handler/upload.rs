//! Upload handling for PUT and POST
//!
//! The request target's base name is the destination, written directly in
//! the served root. Existing files are only replaced when overwriting is
//! enabled. The existence check and the write are not atomic.

use http_body_util::BodyExt;
use hyper::body::{Body, Buf, Bytes};
use hyper::header::CONTENT_LENGTH;
use hyper::{HeaderMap, Response, StatusCode};
use std::fmt::Display;
use std::io::ErrorKind;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::path::upload_name;
use super::router::RequestContext;
use crate::config::AppState;
use crate::error::HandlerError;
use crate::http::{self, ResponseBody};
use crate::logger;

/// Upper bound for a single write to the destination file
pub const UPLOAD_CHUNK_SIZE: usize = 66_556;

/// Save the request body under the target's base name
pub async fn save_upload<B>(
    ctx: &RequestContext<'_>,
    headers: &HeaderMap,
    mut body: B,
    state: &AppState,
) -> Result<Response<ResponseBody>, HandlerError>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: Display,
{
    let server = &state.config.server;
    let name = upload_name(ctx.target)
        .ok_or_else(|| HandlerError::BadRequest("No file name in request path".to_string()))?;
    let destination = state.root.join(&name);
    let filename = name.to_string_lossy().into_owned();

    match fs::metadata(&destination).await {
        Ok(meta) if meta.is_dir() => return Err(HandlerError::IsDirectory(filename)),
        Ok(_) if !server.overwrite_files => return Err(HandlerError::Conflict(filename)),
        Ok(_) => logger::log_overwrite(&destination),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let length = content_length(headers)?;
    if let Some(max) = server.max_upload_size {
        if length > max {
            return Err(HandlerError::PayloadTooLarge { size: length, max });
        }
    }

    let mut file = fs::File::create(&destination).await?;
    let mut remaining = length;
    while remaining > 0 {
        let frame = match body.frame().await {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => {
                return Err(HandlerError::BadRequest(format!(
                    "Failed to read request body: {e}"
                )))
            }
            None => break,
        };
        let Ok(mut data) = frame.into_data() else {
            continue;
        };
        while data.has_remaining() && remaining > 0 {
            let limit = usize::try_from(remaining).unwrap_or(usize::MAX);
            let n = data.remaining().min(UPLOAD_CHUNK_SIZE).min(limit);
            let chunk = data.split_to(n);
            file.write_all(&chunk).await?;
            remaining -= n as u64;
        }
    }
    file.flush().await?;

    if remaining > 0 {
        return Err(HandlerError::BadRequest(format!(
            "Request body ended {remaining} bytes short of Content-Length"
        )));
    }

    Ok(http::build_text_response(
        StatusCode::CREATED,
        &format!("Saved \"{filename}\""),
    ))
}

/// Parse the request's `Content-Length`
fn content_length(headers: &HeaderMap) -> Result<u64, HandlerError> {
    let value = headers
        .get(CONTENT_LENGTH)
        .ok_or(HandlerError::LengthRequired)?;
    value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .ok_or_else(|| HandlerError::BadRequest("Invalid Content-Length".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    #[test]
    fn test_content_length_parsing() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            content_length(&headers),
            Err(HandlerError::LengthRequired)
        ));

        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("42"));
        assert_eq!(content_length(&headers).unwrap(), 42);

        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("forty"));
        assert!(matches!(
            content_length(&headers),
            Err(HandlerError::BadRequest(_))
        ));
    }
}
