// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the GameGuru configuration system.

use std::io::Write;

use figment::{providers::Serialized, Figment};
use gameguru_config::diagnostic::ConfigError;
use gameguru_config::model::GameGuruConfig;
use gameguru_config::{
    load_and_validate_path, load_and_validate_str, load_config_from_str, render_toml,
};

#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[agent]
name = "Guru"
log_level = "debug"
max_sessions = 8
history_window = 4
greeting = "Hi!"

[openai]
api_key = "sk-test-123"
base_url = "http://localhost:9999/v1"
model = "gpt-4o-mini"
max_tokens = 256
temperature = 0.2
presence_penalty = 0.0
frequency_penalty = 0.5
timeout_secs = 5

[gateway]
host = "0.0.0.0"
port = 8080
cors_origins = []

[fallback]
message = "Offline."
shortlist = ["1", "2"]
"#;

    let config = load_and_validate_str(toml).expect("valid config");
    assert_eq!(config.agent.name, "Guru");
    assert_eq!(config.agent.max_sessions, 8);
    assert_eq!(config.agent.history_window, 4);
    assert_eq!(config.agent.greeting, "Hi!");
    assert_eq!(config.openai.api_key.as_deref(), Some("sk-test-123"));
    assert_eq!(config.openai.model, "gpt-4o-mini");
    assert_eq!(config.openai.max_tokens, 256);
    assert_eq!(config.openai.timeout_secs, 5);
    assert_eq!(config.gateway.port, 8080);
    assert!(config.gateway.cors_origins.is_empty());
    assert_eq!(config.fallback.shortlist, vec!["1", "2"]);
}

#[test]
fn empty_toml_yields_defaults() {
    let config = load_and_validate_str("").expect("defaults are valid");
    assert_eq!(config.openai.model, "gpt-3.5-turbo");
    assert_eq!(config.openai.max_tokens, 800);
    assert!((config.openai.temperature - 0.7).abs() < f32::EPSILON);
    assert!((config.openai.presence_penalty - 0.1).abs() < f32::EPSILON);
    assert!((config.openai.frequency_penalty - 0.1).abs() < f32::EPSILON);
    assert_eq!(config.openai.timeout_secs, 30);
    assert_eq!(config.agent.history_window, 10);
    assert_eq!(config.fallback.shortlist, vec!["4", "5", "24"]);
    assert!(config.openai.api_key.is_none());
}

#[test]
fn partial_section_keeps_other_defaults() {
    let config = load_config_from_str("[openai]\nmodel = \"gpt-4o\"\n").unwrap();
    assert_eq!(config.openai.model, "gpt-4o");
    assert_eq!(config.openai.max_tokens, 800);
    assert_eq!(config.gateway.port, 5000);
}

#[test]
fn unknown_key_gets_suggestion_and_span() {
    let toml = "[openai]\ntemprature = 0.3\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key,
            suggestion,
            valid_keys,
            ..
        } => {
            assert_eq!(key, "temprature");
            assert_eq!(suggestion.as_deref(), Some("temperature"));
            assert!(valid_keys.contains("max_tokens"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[telegram]\nbot_token = \"x\"\n").unwrap_err();
    assert!(matches!(&errors[0], ConfigError::UnknownKey { key, .. } if key == "telegram"));
}

#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[gateway]\nport = \"eighty\"\n").unwrap_err();
    assert!(
        matches!(&errors[0], ConfigError::InvalidType { key, .. } if key.contains("port")),
        "got {errors:?}"
    );
}

#[test]
fn semantic_errors_surface_from_str_loader() {
    let errors = load_and_validate_str("[agent]\nhistory_window = 0\n").unwrap_err();
    assert!(matches!(&errors[0], ConfigError::Validation { message } if message.contains("history_window")));
}

#[test]
fn later_provider_overrides_earlier() {
    let config: GameGuruConfig = Figment::new()
        .merge(Serialized::defaults(GameGuruConfig::default()))
        .merge(("openai.model", "gpt-4o"))
        .merge(("agent.history_window", 3))
        .extract()
        .unwrap();
    assert_eq!(config.openai.model, "gpt-4o");
    assert_eq!(config.agent.history_window, 3);
}

#[test]
fn load_from_path_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[gateway]\nport = 7001\n").unwrap();
    let config = load_and_validate_path(file.path()).unwrap();
    assert_eq!(config.gateway.port, 7001);
}

#[test]
fn load_from_missing_path_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_and_validate_path(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.gateway.port, 5000);
}

#[test]
fn rendered_toml_masks_api_key() {
    let mut config = GameGuruConfig::default();
    config.openai.api_key = Some("sk-live-secret".into());
    let rendered = render_toml(&config).unwrap();
    assert!(!rendered.contains("sk-live-secret"));
    assert!(rendered.contains("[REDACTED]"));
    assert!(rendered.contains("[fallback]"));
}

#[test]
fn config_serializes_to_json() {
    let json = serde_json::to_value(GameGuruConfig::default()).unwrap();
    assert_eq!(json["openai"]["model"], "gpt-3.5-turbo");
    assert_eq!(json["gateway"]["port"], 5000);
}
