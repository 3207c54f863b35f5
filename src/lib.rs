//! # termchat - Interactive Terminal AI Chat
//!
//! `termchat` is a command-line chat client for OpenAI-compatible streaming
//! endpoints. Answers are shown as they arrive with a typing animation and
//! can be rendered again as formatted markdown once complete.
//!
//! ## Features
//!
//! - **Streaming answers**: See tokens as they arrive, paced like typing
//! - **Markdown render**: Re-render the finished answer for the terminal
//! - **Conversation context**: Every turn is sent with the full history
//! - **Commands**: `/clear` resets the conversation, `/exit` quits
//!
//! ## Quick Start
//!
//! ```bash
//! export OPENROUTER_API_KEY=...
//!
//! # Chat with the default model
//! termchat
//!
//! # Pick a model and system prompt, skip the markdown render
//! termchat --model openai/gpt-4o --system "Answer briefly." --no-render
//!
//! # Print answers without the typing animation
//! termchat --delay 0
//! ```
//!
//! ## Configuration
//!
//! Settings are read from `~/.config/termchat/config.toml`:
//!
//! ```toml
//! [termchat]
//! provider = "ollama"
//! model = "gemma3:12b"
//! system = "You are a helpful assistant."
//! render = true
//! delay_ms = 6
//!
//! [providers.ollama]
//! endpoint = "http://localhost:11434"
//! models = ["gemma3:12b", "llama3.2"]
//! ```

/// Interactive chat session: history, pacing, streaming and the prompt loop.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Streaming client for OpenAI-compatible APIs.
pub mod client;

/// Configuration file management and provider settings.
pub mod config;

/// Diagnostic logging setup.
pub mod logging;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Terminal markdown rendering.
pub mod render;

/// Terminal UI components (spinner, colors).
pub mod ui;
