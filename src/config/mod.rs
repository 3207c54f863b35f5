//! Configuration file management and option resolution.

mod manager;

pub use manager::{
    ChatDefaults, ConfigFile, ConfigManager, DEFAULT_DELAY_MS, DEFAULT_MODEL, DEFAULT_PROVIDER,
    DEFAULT_SYSTEM_PROMPT, ProviderConfig, ResolveOptions, ResolvedConfig, resolve_config,
};
