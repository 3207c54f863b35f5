//! Server-Sent Events (SSE) parser for OpenAI-compatible streaming responses.
//!
//! This module turns the raw byte stream of a chat completion response into a
//! stream of text deltas, surfacing malformed events and API error payloads
//! as [`StreamError`]s.

use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;

use super::StreamError;

/// Response structure for streaming chat completions.
#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Option<Delta>,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

/// What a single SSE line means for the delta stream.
#[derive(Debug, PartialEq, Eq)]
enum SseLine {
    Delta(String),
    Done,
    Skip,
}

/// Converts a raw SSE byte stream into a stream of text deltas.
///
/// Lines are split on the byte buffer before decoding, so a multi-byte
/// character split across two network chunks is decoded intact. The stream
/// ends after `data: [DONE]`, and yields at most one error: after a transport
/// failure, a malformed event or an API error payload nothing else is read.
pub fn sse_to_delta_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<String, StreamError>> + Send {
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(StreamError::Transport(e));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=line_end).collect();

                match parse_sse_line(String::from_utf8_lossy(&line).trim()) {
                    Ok(SseLine::Delta(content)) => {
                        yield Ok(content);
                    }
                    Ok(SseLine::Skip) => {}
                    Ok(SseLine::Done) => return,
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }
        }

        // Some servers close the connection without a final newline
        if !buffer.is_empty() {
            match parse_sse_line(String::from_utf8_lossy(&buffer).trim()) {
                Ok(SseLine::Delta(content)) => {
                    yield Ok(content);
                }
                Ok(SseLine::Skip | SseLine::Done) => {}
                Err(e) => {
                    yield Err(e);
                }
            }
        }
    }
}

/// Parses a single trimmed SSE line.
///
/// Only the first choice's `delta.content` is used. Blank lines, comments
/// (`: OPENROUTER PROCESSING`), other SSE fields and empty deltas are skipped.
fn parse_sse_line(line: &str) -> Result<SseLine, StreamError> {
    let Some(data) = line.strip_prefix("data:") else {
        return Ok(SseLine::Skip);
    };
    let data = data.trim_start();

    if data == "[DONE]" {
        return Ok(SseLine::Done);
    }

    let response = serde_json::from_str::<StreamResponse>(data)
        .map_err(|e| StreamError::Malformed(format!("{e}: {data}")))?;

    if let Some(error) = response.error {
        let message = if error.message.is_empty() {
            "unknown error".to_string()
        } else {
            error.message
        };
        return Err(StreamError::Api(message));
    }

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta)
        .and_then(|d| d.content)
        .unwrap_or_default();

    if content.is_empty() {
        Ok(SseLine::Skip)
    } else {
        Ok(SseLine::Delta(content))
    }
}
