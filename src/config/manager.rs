use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::paths;
use crate::ui::Style;

/// Provider used when neither the CLI nor the config file names one.
pub const DEFAULT_PROVIDER: &str = "openrouter";
/// Model used when neither the CLI nor the config file names one.
pub const DEFAULT_MODEL: &str = "openrouter/auto";
/// System prompt used when neither the CLI nor the config file sets one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
/// Typing delay per grapheme, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 6;

const OPENROUTER_ENDPOINT: &str = "https://openrouter.ai/api";
const OPENROUTER_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Default settings in the `[termchat]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatDefaults {
    /// Default provider name.
    pub provider: Option<String>,
    /// Default model name.
    pub model: Option<String>,
    /// Default system prompt.
    pub system: Option<String>,
    /// Render the final answer as markdown.
    pub render: Option<bool>,
    /// Animate streamed output.
    pub typing: Option<bool>,
    /// Render `:shortcode:` emoji.
    pub emoji: Option<bool>,
    /// Typing delay per grapheme, in milliseconds.
    pub delay_ms: Option<u64>,
    /// Markdown render width in columns.
    pub width: Option<usize>,
}

/// Configuration for a completion provider.
///
/// Each provider has an endpoint and optional API key settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// List of available models for this provider.
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// The built-in OpenRouter provider, keyed by `OPENROUTER_API_KEY`.
    pub fn openrouter() -> Self {
        Self {
            endpoint: OPENROUTER_ENDPOINT.to_string(),
            api_key: None,
            api_key_env: Some(OPENROUTER_API_KEY_ENV.to_string()),
            models: vec![],
        }
    }

    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/termchat/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Default settings.
    #[serde(default)]
    pub termchat: ChatDefaults,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The selected provider name.
    pub provider_name: String,
    /// The API endpoint URL.
    pub endpoint: String,
    /// The API key (if required).
    pub api_key: Option<String>,
    /// The model to chat with.
    pub model: String,
    /// The system prompt.
    pub system_prompt: String,
    pub render: bool,
    pub typing: bool,
    pub emoji: bool,
    pub delay_ms: u64,
    /// Explicit render width; `None` means the terminal width.
    pub width: Option<usize>,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Provider name override.
    pub provider: Option<String>,
    /// Model name override.
    pub model: Option<String>,
    /// System prompt override.
    pub system: Option<String>,
    /// `--no-render` was given.
    pub no_render: bool,
    /// `--no-typing` was given.
    pub no_typing: bool,
    /// `--no-emoji` was given.
    pub no_emoji: bool,
    /// Typing delay override in milliseconds.
    pub delay_ms: Option<u64>,
    /// Render width override.
    pub width: Option<usize>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// Priority: CLI options, then the config file, then built-in defaults.
///
/// # Errors
///
/// Returns an error if the provider is not found or if its API key is
/// required but not set.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let defaults = &config_file.termchat;

    // Resolve provider
    let provider_name = options
        .provider
        .as_ref()
        .or(defaults.provider.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());

    // Get provider config, falling back to the built-in OpenRouter entry
    let provider_config = match config_file.providers.get(&provider_name) {
        Some(provider) => provider.clone(),
        None if provider_name == DEFAULT_PROVIDER => ProviderConfig::openrouter(),
        None => {
            let mut available: Vec<_> = config_file.providers.keys().map(String::as_str).collect();
            available.sort_unstable();
            if available.is_empty() {
                bail!(
                    "Provider '{provider_name}' not found\n\n\
                     No providers configured. Add providers to ~/.config/termchat/config.toml"
                );
            }
            bail!(
                "Provider '{provider_name}' not found\n\n\
                 Available providers:\n  \
                 - {}\n\n\
                 Add providers to ~/.config/termchat/config.toml",
                available.join("\n  - ")
            );
        }
    };

    // Resolve model
    let model = options
        .model
        .as_ref()
        .or(defaults.model.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // Warn if model is not in provider's models list
    if !provider_config.models.is_empty() && !provider_config.models.contains(&model) {
        eprintln!(
            "{} Model '{}' is not in the configured models list for '{}'\n\
             Configured models: {}\n\
             Proceeding anyway...\n",
            Style::warning("Warning:"),
            model,
            provider_name,
            provider_config.models.join(", ")
        );
    }

    let system_prompt = options
        .system
        .as_ref()
        .or(defaults.system.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

    // Get API key
    let api_key = provider_config.get_api_key();

    // Check if API key is required but missing
    if provider_config.requires_api_key() && api_key.is_none() {
        let env_var = provider_config.api_key_env.as_deref().unwrap_or("API_KEY");
        bail!(
            "Missing {env_var}: provider '{provider_name}' requires an API key\n\n\
             Please provide it via:\n  \
             export {env_var}=\"your-api-key\"\n  \
             or a .env file in the current directory with {env_var}=your-api-key"
        );
    }

    Ok(ResolvedConfig {
        provider_name,
        endpoint: provider_config.endpoint,
        api_key,
        model,
        system_prompt,
        render: !options.no_render && defaults.render.unwrap_or(true),
        typing: !options.no_typing && defaults.typing.unwrap_or(true),
        emoji: !options.no_emoji && defaults.emoji.unwrap_or(true),
        delay_ms: options
            .delay_ms
            .or(defaults.delay_ms)
            .unwrap_or(DEFAULT_DELAY_MS),
        width: options.width.or(defaults.width).filter(|&w| w > 0),
    })
}

/// Manages loading of the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/termchat/config.toml`
    /// or `~/.config/termchat/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        self.parse(&contents)
    }

    /// Loads the config file, or the defaults when there is none.
    ///
    /// A missing or unreadable file yields the defaults. A file that is read
    /// but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        let contents = match fs::read_to_string(&self.config_path) {
            Ok(contents) => contents,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(
                        path = %self.config_path.display(),
                        error = %e,
                        "config file unreadable, using defaults"
                    );
                }
                return Ok(ConfigFile::default());
            }
        };

        self.parse(&contents)
    }

    fn parse(&self, contents: &str) -> Result<ConfigFile> {
        toml::from_str(contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })
    }
}
