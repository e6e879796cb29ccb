use bytes::Bytes;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::debug;

use super::types::GenerateChunk;
use crate::utils::{LauncherError, Result};

/// Splits a byte stream into newline-delimited JSON objects
///
/// Bytes are buffered until a newline arrives, so UTF-8 sequences and JSON objects may be split
/// across chunks freely. Lines that do not decode are skipped.
#[derive(Debug, Default)]
pub struct NdjsonDecoder {
    buf: Vec<u8>,
}

impl NdjsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<GenerateChunk> {
        self.buf.extend_from_slice(chunk);

        let mut decoded = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            if let Some(chunk) = decode_line(&line) {
                decoded.push(chunk);
            }
        }
        decoded
    }

    /// Decode whatever is left after the body ended without a trailing newline
    pub fn finish(&mut self) -> Option<GenerateChunk> {
        let rest = std::mem::take(&mut self.buf);
        decode_line(&rest)
    }
}

fn decode_line(line: &[u8]) -> Option<GenerateChunk> {
    let line = line.trim_ascii();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_slice::<GenerateChunk>(line) {
        Ok(chunk) => Some(chunk),
        Err(e) => {
            debug!("skipping malformed line: {}", e);
            None
        }
    }
}

/// Lazy sequence of `response` fragments from one generate call
///
/// Ends when the body ends. A transport error is yielded once and ends the stream.
pub struct FragmentStream {
    inner: BoxStream<'static, Result<String>>,
}

struct BodyState {
    body: BoxStream<'static, Result<Bytes>>,
    decoder: NdjsonDecoder,
    pending: VecDeque<String>,
    done: bool,
}

impl BodyState {
    fn queue(&mut self, chunk: GenerateChunk) {
        if let Some(fragment) = chunk.response {
            self.pending.push_back(fragment);
        }
    }
}

impl FragmentStream {
    pub fn from_body<S, E>(body: S) -> Self
    where
        S: Stream<Item = std::result::Result<Bytes, E>> + Send + 'static,
        E: Into<LauncherError> + 'static,
    {
        let state = BodyState {
            body: body
                .map(|r: std::result::Result<Bytes, E>| -> Result<Bytes> { r.map_err(Into::into) })
                .boxed(),
            decoder: NdjsonDecoder::new(),
            pending: VecDeque::new(),
            done: false,
        };

        let inner = stream::unfold(state, |mut state| async move {
            loop {
                if let Some(fragment) = state.pending.pop_front() {
                    return Some((Ok(fragment), state));
                }
                if state.done {
                    return None;
                }
                match state.body.next().await {
                    Some(Ok(bytes)) => {
                        for chunk in state.decoder.push(&bytes) {
                            state.queue(chunk);
                        }
                    }
                    Some(Err(e)) => {
                        state.done = true;
                        return Some((Err(e), state));
                    }
                    None => {
                        state.done = true;
                        if let Some(chunk) = state.decoder.finish() {
                            state.queue(chunk);
                        }
                    }
                }
            }
        })
        .boxed();

        Self { inner }
    }

    /// Stream over an in-memory body, split into the given chunks
    pub fn from_chunks<I, B>(chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        let chunks: Vec<Result<Bytes>> = chunks.into_iter().map(|c| Ok(c.into())).collect();
        Self::from_body(stream::iter(chunks))
    }
}

impl Stream for FragmentStream {
    type Item = Result<String>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}
