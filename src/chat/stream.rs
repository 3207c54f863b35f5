use futures_util::{Stream, StreamExt};
use std::io::Write;

use super::pacer::TypingPacer;
use crate::client::StreamError;

/// The result of draining one streamed response.
#[derive(Debug, Default)]
pub struct StreamOutcome {
    /// Every delta received, in arrival order.
    pub text: String,
    /// The error that ended the stream early, if any.
    pub error: Option<StreamError>,
}

/// Drains `stream`, pacing each delta to `out` as it arrives.
///
/// Stops at the first error. Text received before the error is kept in the
/// outcome; nothing already written is taken back.
pub async fn consume<S, W>(stream: S, pacer: &TypingPacer, out: &mut W) -> StreamOutcome
where
    S: Stream<Item = Result<String, StreamError>>,
    W: Write + ?Sized,
{
    let mut stream = std::pin::pin!(stream);
    let mut outcome = StreamOutcome::default();

    while let Some(delta_result) = stream.next().await {
        let delta = match delta_result {
            Ok(delta) => delta,
            Err(e) => {
                outcome.error = Some(e);
                break;
            }
        };

        if delta.is_empty() {
            continue;
        }

        outcome.text.push_str(&delta);

        if let Err(e) = pacer.pace(out, &delta).await {
            outcome.error = Some(StreamError::Output(e));
            break;
        }
    }

    outcome
}
