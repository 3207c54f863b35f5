//! Terminal markdown rendering for the final answer.
//!
//! The streamed answer is printed raw while it arrives; once complete it can
//! be rendered again through `termimad`, wrapped to the configured width.

mod emoji;

use std::panic::{self, AssertUnwindSafe};

use termimad::{FmtText, MadSkin};
use thiserror::Error;

pub use emoji::replace_shortcodes;

/// Width used when the terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 80;

/// Failure of the markdown renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("markdown renderer panicked: {0}")]
    Panicked(String),
}

/// Renders assistant answers for the terminal.
pub trait MarkdownRender: Send + Sync {
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

/// Options passed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub emoji: bool,
    pub width: usize,
}

/// `termimad`-backed renderer.
pub struct TermRenderer {
    skin: MadSkin,
    options: RenderOptions,
}

impl TermRenderer {
    pub fn new(options: RenderOptions) -> Self {
        let mut skin = MadSkin::default();
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        Self { skin, options }
    }
}

impl MarkdownRender for TermRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let text = if self.options.emoji {
            replace_shortcodes(markdown)
        } else {
            markdown.to_string()
        };

        // A panic in the engine becomes a render error
        panic::catch_unwind(AssertUnwindSafe(|| {
            FmtText::from(&self.skin, &text, Some(self.options.width)).to_string()
        }))
        .map_err(|payload| RenderError::Panicked(panic_message(payload.as_ref())))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Returns the current terminal width, or [`DEFAULT_WIDTH`] when stdout is
/// not a terminal.
pub fn terminal_width() -> usize {
    termimad::crossterm::terminal::size()
        .ok()
        .map(|(cols, _)| usize::from(cols))
        .filter(|&cols| cols > 0)
        .unwrap_or(DEFAULT_WIDTH)
}
