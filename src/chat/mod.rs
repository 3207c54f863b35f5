//! Interactive chat mode.
//!
//! Provides the REPL that streams answers from the model, paces them to the
//! terminal and keeps the conversation history between turns.

/// Slash command parsing and autocomplete.
pub mod command;
mod history;
/// Line sources for the prompt loop.
pub mod input;
mod pacer;
mod session;
/// Signal handling for graceful shutdown.
pub mod shutdown;
/// Stream consumption for a single turn.
pub mod stream;
mod ui;

pub use history::History;
pub use input::{LineReader, PromptReader, StdinReader};
pub use pacer::TypingPacer;
pub use session::{ChatSession, SessionConfig, SessionState};
