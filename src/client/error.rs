use std::io;

use thiserror::Error;

/// Failure while opening or draining a streamed completion.
///
/// Every variant is recoverable: the session reports it and keeps running.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("failed to connect to API endpoint {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("stream interrupted: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("malformed stream event: {0}")]
    Malformed(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}
