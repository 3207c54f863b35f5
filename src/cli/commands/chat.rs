use anyhow::Result;
use std::io::{self, IsTerminal};

use crate::chat::{ChatSession, LineReader, PromptReader, SessionConfig, StdinReader, shutdown};
use crate::cli::Args;
use crate::client::ChatClient;
use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::render::{RenderOptions, TermRenderer, terminal_width};

pub struct ChatOptions {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub system: Option<String>,
    pub no_render: bool,
    pub no_typing: bool,
    pub no_emoji: bool,
    pub delay_ms: Option<u64>,
    pub width: Option<usize>,
}

impl From<&Args> for ChatOptions {
    fn from(args: &Args) -> Self {
        Self {
            provider: args.provider.clone(),
            model: args.model.clone(),
            system: args.system.clone(),
            no_render: args.no_render,
            no_typing: args.no_typing,
            no_emoji: args.no_emoji,
            delay_ms: args.delay_ms,
            width: args.width,
        }
    }
}

/// A session wired to its input source, ready to run.
pub struct PreparedChat {
    session: ChatSession,
    reader: Box<dyn LineReader>,
}

impl PreparedChat {
    pub async fn run(mut self) -> Result<()> {
        self.session.run(self.reader.as_mut()).await
    }
}

/// Resolves configuration and builds the session.
///
/// Fails before anything is shown when the configuration is invalid or the
/// provider's credential is missing. Must be called inside a tokio runtime.
pub fn prepare_chat(options: &ChatOptions) -> Result<PreparedChat> {
    let resolved = load_resolved_config(options)?;
    let config = session_config(&resolved, terminal_width);

    tracing::debug!(
        provider = %config.provider_name,
        model = %config.model,
        render = config.render,
        typing = config.typing,
        delay_ms = config.delay_ms,
        "starting chat session"
    );

    let client = ChatClient::new(resolved.endpoint, resolved.api_key).with_referer_from_env();
    let renderer = TermRenderer::new(RenderOptions {
        emoji: config.emoji,
        width: config.width,
    });

    let session = ChatSession::new(
        config,
        Box::new(client),
        Box::new(renderer),
        shutdown::listen(),
    );

    let reader: Box<dyn LineReader> = if io::stdin().is_terminal() {
        Box::new(PromptReader::new())
    } else {
        Box::new(StdinReader::new())
    };

    Ok(PreparedChat { session, reader })
}

fn load_resolved_config(options: &ChatOptions) -> Result<ResolvedConfig> {
    load_dotenv();

    let manager = ConfigManager::new()?;
    let file_config = manager.load_or_default()?;

    let resolve_options = ResolveOptions {
        provider: options.provider.clone(),
        model: options.model.clone(),
        system: options.system.clone(),
        no_render: options.no_render,
        no_typing: options.no_typing,
        no_emoji: options.no_emoji,
        delay_ms: options.delay_ms,
        width: options.width,
    };

    resolve_config(&resolve_options, &file_config)
}

/// Loads a `.env` file from the current directory or its parents.
///
/// Variables already set in the environment win over the file.
fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env file"),
    }
}

fn session_config(resolved: &ResolvedConfig, fallback_width: impl FnOnce() -> usize) -> SessionConfig {
    SessionConfig {
        provider_name: resolved.provider_name.clone(),
        model: resolved.model.clone(),
        system_prompt: resolved.system_prompt.clone(),
        typing: resolved.typing,
        delay_ms: resolved.delay_ms,
        render: resolved.render,
        emoji: resolved.emoji,
        width: resolved.width.unwrap_or_else(fallback_width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(width: Option<usize>) -> ResolvedConfig {
        ResolvedConfig {
            provider_name: "openrouter".to_string(),
            endpoint: "https://openrouter.ai/api".to_string(),
            api_key: Some("key".to_string()),
            model: "openrouter/auto".to_string(),
            system_prompt: "You are a helpful assistant.".to_string(),
            render: true,
            typing: false,
            emoji: true,
            delay_ms: 6,
            width,
        }
    }

    #[test]
    fn test_session_config_uses_explicit_width() {
        let config = session_config(&resolved(Some(100)), || 42);
        assert_eq!(config.width, 100);
        assert!(!config.typing);
        assert_eq!(config.model, "openrouter/auto");
    }

    #[test]
    fn test_session_config_falls_back_to_terminal_width() {
        let config = session_config(&resolved(None), || 42);
        assert_eq!(config.width, 42);
    }
}
