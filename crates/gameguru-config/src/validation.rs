// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that serde attributes cannot express,
//! such as numeric ranges, non-empty strings, and bind addresses.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::GameGuruConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &GameGuruConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    // [agent]
    if config.agent.name.trim().is_empty() {
        fail("agent.name must not be empty".to_string());
    }
    if !LOG_LEVELS.contains(&config.agent.log_level.to_ascii_lowercase().as_str()) {
        fail(format!(
            "agent.log_level `{}` is not one of {}",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        ));
    }
    if config.agent.max_sessions < 1 {
        fail("agent.max_sessions must be at least 1".to_string());
    }
    if config.agent.history_window < 1 {
        fail("agent.history_window must be at least 1".to_string());
    }
    if config.agent.greeting.trim().is_empty() {
        fail("agent.greeting must not be empty".to_string());
    }
    if let Some(path) = &config.agent.system_prompt_file
        && path.trim().is_empty()
    {
        fail("agent.system_prompt_file must not be empty when set".to_string());
    }

    // [openai]
    if config.openai.base_url.trim().is_empty() {
        fail("openai.base_url must not be empty".to_string());
    } else if !(config.openai.base_url.starts_with("http://")
        || config.openai.base_url.starts_with("https://"))
    {
        fail(format!(
            "openai.base_url `{}` must start with http:// or https://",
            config.openai.base_url
        ));
    }
    if config.openai.model.trim().is_empty() {
        fail("openai.model must not be empty".to_string());
    }
    if config.openai.max_tokens == 0 {
        fail("openai.max_tokens must be greater than 0".to_string());
    }
    if !(0.0..=2.0).contains(&config.openai.temperature) {
        fail(format!(
            "openai.temperature must be between 0.0 and 2.0, got {}",
            config.openai.temperature
        ));
    }
    for (key, value) in [
        ("presence_penalty", config.openai.presence_penalty),
        ("frequency_penalty", config.openai.frequency_penalty),
    ] {
        if !(-2.0..=2.0).contains(&value) {
            fail(format!(
                "openai.{key} must be between -2.0 and 2.0, got {value}"
            ));
        }
    }
    if config.openai.timeout_secs == 0 {
        fail("openai.timeout_secs must be greater than 0".to_string());
    }

    // [gateway]
    let host = config.gateway.host.trim();
    if host.is_empty() {
        fail("gateway.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "gateway.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }
    for origin in &config.gateway.cors_origins {
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            fail(format!(
                "gateway.cors_origins entry `{origin}` must start with http:// or https://"
            ));
        }
    }

    // [fallback]
    if config.fallback.message.trim().is_empty() {
        fail("fallback.message must not be empty".to_string());
    }
    if config.fallback.shortlist.is_empty() {
        fail("fallback.shortlist must name at least one game id".to_string());
    }
    let mut seen = HashSet::new();
    for id in &config.fallback.shortlist {
        if !seen.insert(id) {
            fail(format!("duplicate game id `{id}` in fallback.shortlist"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
