//! SSE frame parsing for server-streaming calls.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use serde::de::DeserializeOwned;

use crate::error::ClientError;

pub(crate) type ByteStream =
    Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// Parses `data:` frames out of an SSE byte stream, buffering partial lines
/// across chunk boundaries. The stream ends at `data: [DONE]` or when the
/// connection closes. Decoded frames queue up so no poll drops an event.
pub(crate) struct SseStream<T> {
    inner: ByteStream,
    buffer: String,
    pending: VecDeque<Result<T, ClientError>>,
    done: bool,
    timeout_seconds: f64,
}

impl<T: DeserializeOwned> SseStream<T> {
    pub(crate) fn new(inner: ByteStream, timeout_seconds: f64) -> Self {
        Self {
            inner,
            buffer: String::new(),
            pending: VecDeque::new(),
            done: false,
            timeout_seconds,
        }
    }

    fn feed(&mut self, chunk: &[u8]) {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));

        while let Some(newline) = self.buffer.find('\n') {
            let line = self.buffer[..newline].trim().to_string();
            self.buffer.drain(..=newline);

            // Blank lines separate events; lines starting with ':' are
            // comments. Neither carries data.
            if line.is_empty() || line.starts_with(':') {
                continue;
            }
            let Some(data) = line.strip_prefix("data:") else {
                continue;
            };
            let data = data.trim_start();

            if data == "[DONE]" {
                self.done = true;
                break;
            }
            match serde_json::from_str::<T>(data) {
                Ok(frame) => self.pending.push_back(Ok(frame)),
                Err(e) => self.pending.push_back(Err(ClientError::Decode {
                    message: e.to_string(),
                })),
            }
        }
    }
}

impl<T: DeserializeOwned + Unpin> Stream for SseStream<T> {
    type Item = Result<T, ClientError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if let Some(item) = this.pending.pop_front() {
                return Poll::Ready(Some(item));
            }
            if this.done {
                return Poll::Ready(None);
            }
            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => this.feed(&chunk),
                Poll::Ready(Some(Err(e))) => {
                    this.done = true;
                    let error = if e.is_timeout() {
                        ClientError::Timeout {
                            seconds: this.timeout_seconds,
                        }
                    } else {
                        ClientError::Transport {
                            message: e.to_string(),
                        }
                    };
                    this.pending.push_back(Err(error));
                }
                Poll::Ready(None) => this.done = true,
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Frame {
        content: String,
    }

    fn byte_stream(chunks: Vec<&'static str>) -> ByteStream {
        let items: Vec<Result<Bytes, reqwest::Error>> = chunks
            .into_iter()
            .map(|c| Ok(Bytes::from_static(c.as_bytes())))
            .collect();
        Box::pin(futures_util::stream::iter(items))
    }

    #[tokio::test]
    async fn parses_frames_split_across_chunks() {
        let stream = SseStream::<Frame>::new(
            byte_stream(vec![
                "data: {\"content\":\"Hel\"}\n\ndata: {\"con",
                "tent\":\"lo\"}\n\ndata: [DONE]\n\n",
            ]),
            30.0,
        );

        let frames: Vec<_> = stream.map(|r| r.unwrap().content).collect().await;
        assert_eq!(frames, vec!["Hel".to_string(), "lo".to_string()]);
    }

    #[tokio::test]
    async fn skips_comments_and_ends_on_done() {
        let stream = SseStream::<Frame>::new(
            byte_stream(vec![
                ": keepalive\n\ndata: {\"content\":\"a\"}\n\ndata: [DONE]\n\ndata: {\"content\":\"b\"}\n\n",
            ]),
            30.0,
        );

        let frames: Vec<_> = stream.map(|r| r.unwrap().content).collect().await;
        assert_eq!(frames, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn malformed_frame_yields_decode_error() {
        let stream = SseStream::<Frame>::new(
            byte_stream(vec!["data: not-json\n\ndata: {\"content\":\"ok\"}\n\n"]),
            30.0,
        );

        let results: Vec<_> = stream.collect().await;
        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Err(ClientError::Decode { .. })));
        assert_eq!(results[1].as_ref().unwrap().content, "ok");
    }
}
