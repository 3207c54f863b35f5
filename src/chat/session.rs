use anyhow::Result;
use std::io::{self, Write};
use tokio_util::sync::CancellationToken;

use super::command::{Input, parse_input};
use super::history::History;
use super::input::LineReader;
use super::pacer::TypingPacer;
use super::stream::{self, StreamOutcome};
use super::ui;
use crate::client::{ModelClient, StreamError};
use crate::render::MarkdownRender;
use crate::ui::{Spinner, restore_terminal};

/// Configuration for a chat session.
///
/// Resolved once at startup and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// The provider name (for display).
    pub provider_name: String,
    /// The model to use.
    pub model: String,
    /// The system prompt placed at the start of the history.
    pub system_prompt: String,
    /// Whether deltas are written with a typing animation.
    pub typing: bool,
    /// Delay per grapheme in milliseconds. 0 writes each delta at once.
    pub delay_ms: u64,
    /// Whether the final answer is rendered again as markdown.
    pub render: bool,
    /// Whether `:shortcode:` emoji are rendered.
    pub emoji: bool,
    /// Markdown render width in columns.
    pub width: usize,
}

impl SessionConfig {
    /// The pacer implied by the typing settings.
    pub const fn pacer(&self) -> TypingPacer {
        if self.typing {
            TypingPacer::from_millis(self.delay_ms)
        } else {
            TypingPacer::immediate()
        }
    }
}

/// Where the session is in its read-dispatch-stream-render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Dispatching,
    StreamingResponse,
    RenderingFinal,
    Closed,
}

/// An interactive chat session.
///
/// Owns the conversation history and runs one turn at a time: input is not
/// read again until the current answer has been streamed, recorded and
/// optionally rendered.
pub struct ChatSession {
    config: SessionConfig,
    client: Box<dyn ModelClient>,
    renderer: Box<dyn MarkdownRender>,
    history: History,
    pacer: TypingPacer,
    state: SessionState,
    shutdown: CancellationToken,
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
}

impl ChatSession {
    /// Creates a session writing to stdout and stderr.
    ///
    /// Cancelling `shutdown` closes the session from any state.
    pub fn new(
        config: SessionConfig,
        client: Box<dyn ModelClient>,
        renderer: Box<dyn MarkdownRender>,
        shutdown: CancellationToken,
    ) -> Self {
        let history = History::new(config.system_prompt.clone());
        let pacer = config.pacer();

        Self {
            config,
            client,
            renderer,
            history,
            pacer,
            state: SessionState::AwaitingInput,
            shutdown,
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
        }
    }

    /// Redirects conversation output and diagnostics.
    #[must_use]
    pub fn with_output(mut self, out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        self.out = out;
        self.err = err;
        self
    }

    pub const fn history(&self) -> &History {
        &self.history
    }

    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Runs the prompt loop until `/exit`, end of input or a shutdown signal.
    ///
    /// Turn failures, including a broken output sink mid-turn, are reported
    /// and the loop continues. Only failing to read input or to write outside
    /// a turn ends it with an error.
    pub async fn run(&mut self, reader: &mut dyn LineReader) -> Result<()> {
        ui::print_header(&mut self.out, &self.config)?;

        let shutdown = self.shutdown.clone();

        loop {
            self.transition(SessionState::AwaitingInput);

            let line = tokio::select! {
                biased;
                () = shutdown.cancelled() => None,
                line = reader.read_line() => line?,
            };

            let Some(line) = line else {
                break;
            };

            match parse_input(&line) {
                Input::Empty => {}
                Input::Exit => break,
                Input::Clear => {
                    self.history.clear();
                    ui::print_cleared(&mut self.out)?;
                }
                Input::Message(text) => {
                    let interrupted = tokio::select! {
                        biased;
                        () = shutdown.cancelled() => true,
                        result = self.run_turn(text) => {
                            result?;
                            false
                        }
                    };

                    if interrupted {
                        // The turn may have stopped mid-line
                        writeln!(self.out)?;
                        break;
                    }
                }
            }
        }

        self.close()
    }

    async fn run_turn(&mut self, text: String) -> Result<()> {
        self.history.push_user(text);
        self.transition(SessionState::Dispatching);

        let spinner = Spinner::new("Thinking...");
        let opened = self
            .client
            .stream_chat(&self.config.model, self.history.messages())
            .await;
        spinner.stop();

        let deltas = match opened {
            Ok(deltas) => deltas,
            Err(e) => return self.report_stream_error(&e),
        };

        self.transition(SessionState::StreamingResponse);
        if let Err(e) = ui::print_assistant_marker(&mut self.out) {
            return self.report_stream_error(&StreamError::Output(e));
        }

        let StreamOutcome { text, mut error } =
            stream::consume(deltas, &self.pacer, &mut self.out).await;

        if let Err(e) = writeln!(self.out).and_then(|()| self.out.flush())
            && error.is_none()
        {
            error = Some(StreamError::Output(e));
        }

        if let Some(e) = error {
            // Keep whatever arrived so the next turn has the context
            if !text.is_empty() {
                self.history.push_assistant(text);
            }
            return self.report_stream_error(&e);
        }

        self.history.push_assistant(text);

        if self.config.render {
            self.render_final()?;
        }

        Ok(())
    }

    fn render_final(&mut self) -> Result<()> {
        self.transition(SessionState::RenderingFinal);

        let answer = self.history.last().map_or("", |m| m.content());

        match self.renderer.render(answer) {
            Ok(rendered) => {
                if let Err(e) = ui::print_rendered(&mut self.out, &rendered) {
                    return self.report_stream_error(&StreamError::Output(e));
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "markdown render failed");
                ui::print_render_warning(&mut self.err, &e)?;
            }
        }

        Ok(())
    }

    fn report_stream_error(&mut self, error: &StreamError) -> Result<()> {
        tracing::warn!(error = %error, "completion stream failed");
        ui::print_stream_error(&mut self.err, error)?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.transition(SessionState::Closed);
        restore_terminal();
        ui::print_goodbye(&mut self.out)?;
        Ok(())
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "session state");
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(typing: bool, delay_ms: u64) -> SessionConfig {
        SessionConfig {
            provider_name: "openrouter".to_string(),
            model: "openrouter/auto".to_string(),
            system_prompt: "You are a helpful assistant.".to_string(),
            typing,
            delay_ms,
            render: true,
            emoji: true,
            width: 80,
        }
    }

    #[test]
    fn test_pacer_uses_delay_when_typing() {
        assert_eq!(config(true, 6).pacer().delay(), Duration::from_millis(6));
    }

    #[test]
    fn test_pacer_is_immediate_without_typing() {
        assert_eq!(config(false, 6).pacer().delay(), Duration::ZERO);
    }

    #[test]
    fn test_pacer_is_immediate_with_zero_delay() {
        assert_eq!(config(true, 0).pacer(), TypingPacer::immediate());
    }
}
