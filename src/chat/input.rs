//! Line sources for the chat loop.

use anyhow::{Context, Result};
use async_trait::async_trait;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use super::command::SlashCommandCompleter;
use crate::ui::is_prompt_cancelled;

const HELP_MESSAGE: &str = "Type a message, /clear to reset, /exit or Ctrl+C to quit";

/// Supplies one line of user input at a time.
///
/// `Ok(None)` means the input is finished (EOF or a cancelled prompt).
#[async_trait]
pub trait LineReader: Send {
    async fn read_line(&mut self) -> Result<Option<String>>;
}

/// Interactive prompt with slash command autocompletion.
///
/// The prompt blocks on the terminal, so each read runs on tokio's blocking
/// pool.
#[derive(Debug, Default)]
pub struct PromptReader;

impl PromptReader {
    pub const fn new() -> Self {
        Self
    }
}

fn render_config() -> RenderConfig<'static> {
    let prompt_style = Styled::new("You ›")
        .with_fg(Color::DarkGrey)
        .with_attr(Attributes::BOLD);
    let mut render_config = RenderConfig::default()
        .with_prompt_prefix(prompt_style)
        .with_answered_prompt_prefix(prompt_style);

    // Non-highlighted suggestions: gray
    render_config.option = StyleSheet::new().with_fg(Color::Grey);
    // Highlighted suggestion: purple
    render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

    render_config
}

#[async_trait]
impl LineReader for PromptReader {
    async fn read_line(&mut self) -> Result<Option<String>> {
        let answer = tokio::task::spawn_blocking(|| {
            Text::new("")
                .with_render_config(render_config())
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message(HELP_MESSAGE)
                .prompt()
        })
        .await
        .context("Input prompt task failed")?;

        match answer {
            Ok(line) => Ok(Some(line)),
            Err(e) if is_prompt_cancelled(&e) => Ok(None),
            Err(e) => Err(e).context("Failed to read input"),
        }
    }
}

/// Reads lines from a non-interactive stdin (pipes, redirected files).
pub struct StdinReader {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinReader {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineReader for StdinReader {
    async fn read_line(&mut self) -> Result<Option<String>> {
        self.lines
            .next_line()
            .await
            .context("Failed to read from stdin")
    }
}
