//! Response body types
//!
//! Responses are boxed so buffered and chunked bodies share one type.

use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes, Frame, SizeHint};
use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Body type of every response produced by the server
pub type ResponseBody = BoxBody<Bytes, Infallible>;

/// Size of each data frame when chunked transfer is enabled
pub const CHUNK_SIZE: usize = 4096;

/// Buffered body sent in one piece
pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into()).boxed()
}

pub fn empty() -> ResponseBody {
    full(Bytes::new())
}

/// Buffered body yielded in fixed-size frames
///
/// The size hint has no upper bound so the connection falls back to chunked
/// framing, one chunk per frame. The lower bound is the remaining length.
#[derive(Debug)]
pub struct ChunkedBody {
    data: Bytes,
    chunk_size: usize,
}

impl ChunkedBody {
    pub fn new(data: impl Into<Bytes>, chunk_size: usize) -> Self {
        Self {
            data: data.into(),
            chunk_size: chunk_size.max(1),
        }
    }
}

impl Body for ChunkedBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        if self.data.is_empty() {
            return Poll::Ready(None);
        }
        let n = self.chunk_size.min(self.data.len());
        let chunk = self.data.split_to(n);
        Poll::Ready(Some(Ok(Frame::data(chunk))))
    }

    fn is_end_stream(&self) -> bool {
        self.data.is_empty()
    }

    fn size_hint(&self) -> SizeHint {
        let mut hint = SizeHint::new();
        hint.set_lower(self.data.len() as u64);
        hint
    }
}

/// Chunked body boxed as a `ResponseBody`
pub fn chunked(data: impl Into<Bytes>) -> ResponseBody {
    ChunkedBody::new(data, CHUNK_SIZE).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_chunked_frames() {
        let data = vec![7u8; CHUNK_SIZE * 2 + 10];
        let mut body = ChunkedBody::new(data, CHUNK_SIZE);

        let mut sizes = Vec::new();
        while let Some(frame) = body.frame().await {
            let chunk = frame.unwrap().into_data().unwrap();
            sizes.push(chunk.len());
        }
        assert_eq!(sizes, vec![CHUNK_SIZE, CHUNK_SIZE, 10]);
        assert!(body.is_end_stream());
    }

    #[test]
    fn test_chunked_size_hint_is_open() {
        let body = ChunkedBody::new(vec![1u8; 5000], CHUNK_SIZE);
        let hint = body.size_hint();
        assert_eq!(hint.lower(), 5000);
        assert_eq!(hint.upper(), None);
        assert_eq!(hint.exact(), None);
    }

    #[tokio::test]
    async fn test_empty_chunked_body() {
        let mut body = ChunkedBody::new(Bytes::new(), CHUNK_SIZE);
        assert!(body.is_end_stream());
        assert!(body.frame().await.is_none());
    }

    #[tokio::test]
    async fn test_full_collects() {
        let collected = full("hello").collect().await.unwrap().to_bytes();
        assert_eq!(&collected[..], b"hello");
    }
}
