//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: logs the request, dispatches on
//! method, turns handler errors into responses and writes the access log.

use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, CONTENT_LENGTH, REFERER, SERVER, USER_AGENT};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::fmt::Display;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::{static_files, upload};
use crate::config::AppState;
use crate::error::HandlerError;
use crate::http::{self, body, ResponseBody};
use crate::logger::{self, AccessLogEntry};

/// Request context encapsulating information needed for request processing
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    /// Path and query exactly as received
    pub target: &'a str,
    /// Raw (still percent-encoded) path
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: Display,
{
    let started = Instant::now();
    let logging = &state.config.logging;
    logger::log_request(req.method(), req.uri(), req.version());
    logger::log_headers(req.headers(), logging.show_headers);

    let mut entry = AccessLogEntry::new(
        peer_addr.to_string(),
        req.method().to_string(),
        req.uri()
            .path_and_query()
            .map_or_else(|| req.uri().path().to_string(), ToString::to_string),
    );
    entry.http_version = version_label(req.version()).to_string();
    entry.referer = header_string(&req, REFERER);
    entry.user_agent = header_string(&req, USER_AGENT);

    let (parts, req_body) = req.into_parts();
    let target = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path(), |pq| pq.as_str());
    let ctx = RequestContext {
        target,
        path: parts.uri.path(),
        query: parts.uri.query(),
        is_head: parts.method == Method::HEAD,
    };

    let result = match parts.method {
        Method::GET | Method::HEAD => static_files::send_head(&ctx, &state).await,
        Method::PUT | Method::POST => {
            upload::save_upload(&ctx, &parts.headers, req_body, &state).await
        }
        ref other => Ok(http::build_501_response(other.as_str())),
    };

    let mut response = match result {
        Ok(response) => response,
        Err(err) => error_response(&err, ctx.is_head),
    };

    if let Ok(name) = HeaderValue::from_str(&state.config.server.server_name) {
        response.headers_mut().insert(SERVER, name);
    }

    if logging.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = body_length(&response);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &logging.access_log_format);
    }

    Ok(response)
}

/// Convert a handler error into its plain-text response
fn error_response(err: &HandlerError, is_head: bool) -> Response<ResponseBody> {
    match err {
        HandlerError::Io(e) => logger::log_error(&format!("Request failed: {e}")),
        other => logger::log_warning(&other.to_string()),
    }
    let mut response = http::build_text_response(err.status_code(), &err.client_message());
    if is_head {
        *response.body_mut() = body::empty();
    }
    response
}

/// Response size for the access log
///
/// Chunked bodies carry no `Content-Length`; their size hint's lower bound
/// holds the full length instead.
fn body_length(response: &Response<ResponseBody>) -> u64 {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| response.body().size_hint().lower())
}

fn header_string<B>(req: &Request<B>, name: hyper::header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
