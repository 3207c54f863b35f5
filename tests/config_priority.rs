#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! These tests verify that CLI options take priority over config file settings.
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Config file defaults
//! 3. Built-in defaults

use serial_test::serial;
use std::collections::HashMap;
use termchat_cli::config::{
    ChatDefaults, ConfigFile, DEFAULT_MODEL, DEFAULT_PROVIDER, ProviderConfig, ResolveOptions,
    resolve_config,
};

fn make_config_with_defaults() -> ConfigFile {
    let mut providers = HashMap::new();
    providers.insert(
        "test_provider".to_string(),
        ProviderConfig {
            endpoint: "http://test.local".to_string(),
            api_key: Some("test_key".to_string()),
            api_key_env: None,
            models: vec!["config_model".to_string(), "cli_model".to_string()],
        },
    );

    ConfigFile {
        termchat: ChatDefaults {
            provider: Some("test_provider".to_string()),
            model: Some("config_model".to_string()),
            system: Some("Config system prompt.".to_string()),
            render: Some(false),
            typing: Some(true),
            emoji: Some(false),
            delay_ms: Some(20),
            width: Some(72),
        },
        providers,
    }
}

#[test]
fn test_config_values_used_when_cli_not_specified() {
    let config = make_config_with_defaults();

    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

    assert_eq!(resolved.provider_name, "test_provider");
    assert_eq!(resolved.endpoint, "http://test.local");
    assert_eq!(resolved.api_key.as_deref(), Some("test_key"));
    assert_eq!(resolved.model, "config_model");
    assert_eq!(resolved.system_prompt, "Config system prompt.");
    assert!(!resolved.render);
    assert!(resolved.typing);
    assert!(!resolved.emoji);
    assert_eq!(resolved.delay_ms, 20);
    assert_eq!(resolved.width, Some(72));
}

#[test]
fn test_cli_model_overrides_config_model() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        model: Some("cli_model".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.model, "cli_model");
}

#[test]
fn test_cli_system_overrides_config_system() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        system: Some("CLI system prompt.".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.system_prompt, "CLI system prompt.");
}

#[test]
fn test_cli_delay_and_width_override_config() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        delay_ms: Some(0),
        width: Some(120),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.delay_ms, 0);
    assert_eq!(resolved.width, Some(120));
}

#[test]
fn test_cli_no_typing_overrides_config_typing() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        no_typing: true,
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert!(!resolved.typing);
}

#[test]
fn test_cli_provider_overrides_config_provider() {
    let mut config = make_config_with_defaults();
    config.providers.insert(
        "other_provider".to_string(),
        ProviderConfig {
            endpoint: "http://other.local".to_string(),
            api_key: None,
            api_key_env: None,
            models: vec![],
        },
    );

    let options = ResolveOptions {
        provider: Some("other_provider".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.provider_name, "other_provider");
    assert_eq!(resolved.endpoint, "http://other.local");
    assert!(resolved.api_key.is_none());
}

#[test]
#[serial]
fn test_builtin_openrouter_reads_key_from_env() {
    let original = std::env::var("OPENROUTER_API_KEY").ok();
    unsafe { std::env::set_var("OPENROUTER_API_KEY", "sk-test") };

    let resolved = resolve_config(&ResolveOptions::default(), &ConfigFile::default()).unwrap();

    assert_eq!(resolved.provider_name, DEFAULT_PROVIDER);
    assert_eq!(resolved.model, DEFAULT_MODEL);
    assert_eq!(resolved.endpoint, "https://openrouter.ai/api");
    assert_eq!(resolved.api_key.as_deref(), Some("sk-test"));

    // Restore
    if let Some(val) = original {
        unsafe { std::env::set_var("OPENROUTER_API_KEY", val) };
    } else {
        unsafe { std::env::remove_var("OPENROUTER_API_KEY") };
    }
}

#[test]
#[serial]
fn test_builtin_openrouter_without_key_is_an_error() {
    let original = std::env::var("OPENROUTER_API_KEY").ok();
    unsafe { std::env::remove_var("OPENROUTER_API_KEY") };

    let result = resolve_config(&ResolveOptions::default(), &ConfigFile::default());

    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("OPENROUTER_API_KEY")
    );

    // Restore
    if let Some(val) = original {
        unsafe { std::env::set_var("OPENROUTER_API_KEY", val) };
    }
}
