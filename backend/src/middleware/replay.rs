//! Replay-capable body capture.
//!
//! A hyper body can be polled only once. [`capture_body`] drains frames up to
//! a byte limit, keeps a copy of the data, and returns a new body that yields
//! the drained frames first and then the untouched remainder of the original
//! stream, so whoever reads the body next sees exactly what the client (or
//! handler) sent.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    response::Response,
};
use http_body::{Body as HttpBody, Frame, SizeHint};
use http_body_util::BodyExt;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

/// What [`capture_body`] managed to keep of a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapturedBody {
    /// The whole payload, possibly empty.
    Complete(Bytes),
    /// The first `limit` bytes of a payload that is longer than `limit`.
    Truncated(Bytes),
    /// The stream failed before it ended.
    Unavailable,
}

impl CapturedBody {
    pub fn complete(&self) -> Option<&Bytes> {
        match self {
            CapturedBody::Complete(bytes) => Some(bytes),
            _ => None,
        }
    }
}

struct ReplayBody {
    replay: VecDeque<Frame<Bytes>>,
    // Data bytes still queued in `replay`.
    replay_len: u64,
    rest: Body,
    error: Option<axum::Error>,
}

impl HttpBody for ReplayBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        if let Some(frame) = this.replay.pop_front() {
            if let Some(data) = frame.data_ref() {
                this.replay_len = this.replay_len.saturating_sub(data.len() as u64);
            }
            return Poll::Ready(Some(Ok(frame)));
        }
        if let Some(err) = this.error.take() {
            this.rest = Body::empty();
            return Poll::Ready(Some(Err(err)));
        }
        Pin::new(&mut this.rest).poll_frame(cx)
    }

    fn size_hint(&self) -> SizeHint {
        if self.error.is_none() && self.rest.is_end_stream() {
            return SizeHint::with_exact(self.replay_len);
        }
        let rest = self.rest.size_hint();
        let mut hint = SizeHint::new();
        // Upper first: `set_lower` asserts against the current upper bound.
        if let Some(upper) = rest.upper() {
            hint.set_upper(upper.saturating_add(self.replay_len));
        }
        hint.set_lower(rest.lower().saturating_add(self.replay_len));
        hint
    }

    fn is_end_stream(&self) -> bool {
        self.replay.is_empty() && self.error.is_none() && self.rest.is_end_stream()
    }
}

/// Drains `body` into memory and returns a replayable body plus what was
/// captured of it.
///
/// Reading stops at the first frame that crosses `limit`; the returned body
/// still replays everything read so far, followed by the rest of the stream
/// (or the stream error).
pub async fn capture_body(mut body: Body, limit: usize) -> (Body, CapturedBody) {
    let mut replay = VecDeque::new();
    let mut kept = Vec::new();
    let mut truncated = false;
    let mut error = None;

    while let Some(frame_result) = body.frame().await {
        match frame_result {
            Ok(frame) => {
                if let Some(data) = frame.data_ref() {
                    let room = limit - kept.len();
                    if data.len() > room {
                        kept.extend_from_slice(&data[..room]);
                        truncated = true;
                    } else {
                        kept.extend_from_slice(data);
                    }
                }
                replay.push_back(frame);
                if truncated {
                    break;
                }
            }
            Err(err) => {
                error = Some(err);
                break;
            }
        }
    }

    let captured = match (&error, truncated) {
        (Some(_), _) => CapturedBody::Unavailable,
        (None, true) => CapturedBody::Truncated(Bytes::from(kept)),
        (None, false) => CapturedBody::Complete(Bytes::from(kept)),
    };
    let replay_len = replay
        .iter()
        .filter_map(|frame| frame.data_ref().map(|data| data.len() as u64))
        .sum();
    let body = ReplayBody {
        replay,
        replay_len,
        rest: body,
        error,
    };
    (Body::new(body), captured)
}

/// Captures a request payload while leaving it readable for the handler.
pub async fn capture_request_body(request: Request, limit: usize) -> (Request, CapturedBody) {
    let (parts, body) = request.into_parts();
    let (body, captured) = capture_body(body, limit).await;
    (Request::from_parts(parts, body), captured)
}

/// Captures a response payload while leaving it readable for the client.
pub async fn capture_response_body(response: Response, limit: usize) -> (Response, CapturedBody) {
    let (parts, body) = response.into_parts();
    let (body, captured) = capture_body(body, limit).await;
    (Response::from_parts(parts, body), captured)
}
