//! Streaming chat completion client for OpenAI-compatible APIs.

mod error;
mod http;
mod message;
mod sse_parser;

pub use error::StreamError;
pub use http::{ChatClient, DeltaStream, ModelClient};
pub use message::{Message, Role};
pub use sse_parser::sse_to_delta_stream;
