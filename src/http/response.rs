//! HTTP response building module
//!
//! Provides builders for the responses the server sends, decoupled from request handling.

use hyper::body::Bytes;
use hyper::header::{
    CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE, LAST_MODIFIED, LOCATION, TRANSFER_ENCODING,
};
use hyper::{Response, StatusCode};
use std::time::SystemTime;

use super::body::{self, ResponseBody};
use crate::config::{ContentEncoding, TransferEncoding};

/// Encoded file ready to be sent
#[derive(Debug)]
pub struct FilePayload {
    pub content: Bytes,
    pub content_type: &'static str,
    pub content_encoding: ContentEncoding,
    pub transfer_encoding: Option<TransferEncoding>,
    /// HTTP date of the file's modification time
    pub last_modified: String,
}

/// Format a timestamp as an HTTP date (RFC 7231 IMF-fixdate)
pub fn http_date(time: SystemTime) -> String {
    let utc: chrono::DateTime<chrono::Utc> = time.into();
    utc.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Build 200 file response
///
/// Header order: `Transfer-Encoding`, `Content-Length` (not with chunked
/// transfer), `Content-Type`, `Content-Encoding`, `Last-Modified`.
pub fn build_file_response(payload: FilePayload, is_head: bool) -> Response<ResponseBody> {
    let chunked = payload.transfer_encoding == Some(TransferEncoding::Chunked);
    let mut builder = Response::builder().status(StatusCode::OK);

    if let Some(te) = payload.transfer_encoding {
        builder = builder.header(TRANSFER_ENCODING, te.as_str());
    }
    if !chunked {
        builder = builder.header(CONTENT_LENGTH, payload.content.len());
    }
    builder = builder
        .header(CONTENT_TYPE, payload.content_type)
        .header(CONTENT_ENCODING, payload.content_encoding.as_str())
        .header(LAST_MODIFIED, payload.last_modified);

    // A chunked body keeps its open size hint on HEAD too, so the connection
    // still announces `Transfer-Encoding`; hyper writes no body for HEAD.
    let body = if chunked {
        body::chunked(payload.content)
    } else if is_head {
        body::empty()
    } else {
        body::full(payload.content)
    };

    builder.body(body).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(body::empty())
    })
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> Response<ResponseBody> {
    let content_length = content.len();
    let body = if is_head {
        body::empty()
    } else {
        body::full(content)
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .header(CONTENT_LENGTH, content_length)
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(body::empty())
        })
}

/// Build 301 redirect response with no body
pub fn build_redirect_response(location: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header(LOCATION, location)
        .header(CONTENT_LENGTH, 0)
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(body::empty())
        })
}

/// Build a short plain-text response, used for upload results and errors
pub fn build_text_response(status: StatusCode, message: &str) -> Response<ResponseBody> {
    let text = format!("{message}\n");
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(CONTENT_LENGTH, text.len())
        .body(body::full(text))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(body::empty())
        })
}

/// Build 501 response for methods the server does not handle
pub fn build_501_response(method: &str) -> Response<ResponseBody> {
    build_text_response(
        StatusCode::NOT_IMPLEMENTED,
        &format!("Unsupported method ('{method}')"),
    )
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn payload(transfer_encoding: Option<TransferEncoding>) -> FilePayload {
        FilePayload {
            content: Bytes::from_static(b"encoded-bytes"),
            content_type: "text/plain",
            content_encoding: ContentEncoding::Gzip,
            transfer_encoding,
            last_modified: "Mon, 19 Oct 2026 10:00:00 GMT".to_string(),
        }
    }

    fn header_names(resp: &Response<ResponseBody>) -> Vec<String> {
        resp.headers().keys().map(|k| k.as_str().to_string()).collect()
    }

    #[test]
    fn test_file_header_order() {
        let resp = build_file_response(payload(None), false);
        assert_eq!(
            header_names(&resp),
            vec!["content-length", "content-type", "content-encoding", "last-modified"]
        );
        assert_eq!(resp.headers()[CONTENT_LENGTH], "13");
    }

    #[test]
    fn test_chunked_omits_content_length() {
        let resp = build_file_response(payload(Some(TransferEncoding::Chunked)), false);
        assert_eq!(
            header_names(&resp),
            vec!["transfer-encoding", "content-type", "content-encoding", "last-modified"]
        );
        assert_eq!(resp.headers()[TRANSFER_ENCODING], "chunked");
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let resp = build_file_response(payload(None), true);
        assert_eq!(resp.headers()[CONTENT_LENGTH], "13");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[test]
    fn test_chunked_head_keeps_transfer_encoding() {
        use hyper::body::Body;

        let get = build_file_response(payload(Some(TransferEncoding::Chunked)), false);
        let head = build_file_response(payload(Some(TransferEncoding::Chunked)), true);
        assert_eq!(header_names(&get), header_names(&head));
        assert_eq!(head.headers()[TRANSFER_ENCODING], "chunked");
        assert_eq!(head.body().size_hint().exact(), None);
    }

    #[tokio::test]
    async fn test_text_response() {
        let resp = build_text_response(StatusCode::CREATED, "Saved \"a.txt\"");
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Saved \"a.txt\"\n");
    }

    #[test]
    fn test_redirect() {
        let resp = build_redirect_response("/docs/");
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[LOCATION], "/docs/");
    }

    #[test]
    fn test_http_date() {
        let time = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(784_111_777);
        assert_eq!(http_date(time), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_501() {
        let resp = build_501_response("DELETE");
        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
    }
}
